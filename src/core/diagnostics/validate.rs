//! Validation diagnostic mapping.

use crate::core::validate::{ValidateError, ValidateErrorKind};

use super::{Diagnostic, DiagnosticValue, string};

pub(super) fn from_validate_error(error: &ValidateError) -> Diagnostic {
    let kind = error.kind();
    let mut diagnostic = Diagnostic::new(
        kind.category(),
        kind.severity(),
        "",
        error.span(),
        error.to_string(),
    );
    let metadata = &mut diagnostic.metadata;
    let (code, suggestion) = match kind {
        ValidateErrorKind::UnsupportedTarget {
            annotation,
            decl_name,
            ..
        } => {
            metadata.insert("annotation".to_string(), string(annotation));
            metadata.insert("decl".to_string(), string(decl_name));
            ("DG-VALIDATE-UNSUPPORTED-TARGET", None)
        }
        ValidateErrorKind::ConflictingSources { param, sources } => {
            metadata.insert("param".to_string(), string(param));
            metadata.insert(
                "sources".to_string(),
                DiagnosticValue::StringList(sources.clone()),
            );
            (
                "DG-VALIDATE-CONFLICTING-SOURCES",
                Some("keep only one of `value`, `field`, or `factory`".to_string()),
            )
        }
        ValidateErrorKind::NonConsecutiveDefaults {
            required,
            defaulted,
        } => {
            metadata.insert("required".to_string(), string(required));
            metadata.insert("defaulted".to_string(), string(defaulted));
            (
                "DG-VALIDATE-NON-CONSECUTIVE-DEFAULTS",
                Some("move defaulted parameters to the end or use builder mode".to_string()),
            )
        }
        ValidateErrorKind::PrivateTarget(decl) => {
            metadata.insert("decl".to_string(), string(decl));
            ("DG-VALIDATE-PRIVATE-TARGET", None)
        }
        ValidateErrorKind::NameConflict { name, holder, other } => {
            metadata.insert("name".to_string(), string(name));
            metadata.insert("holder".to_string(), string(holder));
            metadata.insert("other".to_string(), string(other));
            (
                "DG-VALIDATE-NAME-CONFLICT",
                Some("give one of them an explicit name".to_string()),
            )
        }
        ValidateErrorKind::IncludeAbstractTarget(target, _) => {
            metadata.insert("target".to_string(), string(target));
            ("DG-VALIDATE-INCLUDE-ABSTRACT-TARGET", None)
        }
        ValidateErrorKind::IncludeNoPublicConstructors(target) => {
            metadata.insert("target".to_string(), string(target));
            ("DG-VALIDATE-INCLUDE-NO-PUBLIC-CONSTRUCTORS", None)
        }
        ValidateErrorKind::IncludeNoConventionMatches(target, source) => {
            metadata.insert("target".to_string(), string(target));
            metadata.insert("source".to_string(), string(source));
            ("DG-VALIDATE-INCLUDE-NO-CONVENTION-MATCHES", None)
        }
        ValidateErrorKind::UnmatchedConventionDefault { member, target } => {
            metadata.insert("member".to_string(), string(member));
            metadata.insert("target".to_string(), string(target));
            ("DG-VALIDATE-UNMATCHED-CONVENTION-DEFAULT", None)
        }
        ValidateErrorKind::NoDefaultsDeclared(decl) => {
            metadata.insert("decl".to_string(), string(decl));
            ("DG-VALIDATE-NO-DEFAULTS-DECLARED", None)
        }
    };
    diagnostic.code = code.to_string();
    diagnostic.suggestion = suggestion;
    diagnostic
}
