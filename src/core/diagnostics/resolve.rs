//! Resolve-phase diagnostic mapping.

use crate::core::resolve::{ResolveError, ResolveErrorKind};

use super::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, DiagnosticValue, available, did_you_mean,
    string,
};

pub(super) fn from_resolve_error(error: &ResolveError) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(
        DiagnosticCategory::Resolution,
        DiagnosticSeverity::Error,
        "",
        error.span(),
        error.to_string(),
    );
    let metadata = &mut diagnostic.metadata;
    let (code, suggestion) = match error.kind() {
        ResolveErrorKind::MalformedReference(_) => ("DG-RESOLVE-MALFORMED-REFERENCE", None),
        ResolveErrorKind::NoImportContext {
            name, candidates, ..
        } => {
            metadata.insert("name".to_string(), string(name));
            metadata.insert(
                "candidates".to_string(),
                DiagnosticValue::StringList(candidates.clone()),
            );
            let hint = match candidates.as_slice() {
                [only] => format!("use the qualified name `{only}`"),
                _ => format!("use a qualified name; {}", available(candidates)),
            };
            ("DG-RESOLVE-NO-IMPORT-CONTEXT", Some(hint))
        }
        ResolveErrorKind::TypeNotFound { name, suggestion } => {
            metadata.insert("name".to_string(), string(name));
            (
                "DG-RESOLVE-TYPE-NOT-FOUND",
                suggestion.as_deref().map(did_you_mean),
            )
        }
        ResolveErrorKind::FieldNotFound {
            owner,
            name,
            suggestion,
            factory_hint,
        } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            let hint = if *factory_hint {
                Some(format!(
                    "`{name}` is a static function; use `factory = \"{name}\"` instead"
                ))
            } else {
                suggestion.as_deref().map(did_you_mean)
            };
            ("DG-RESOLVE-FIELD-NOT-FOUND", hint)
        }
        ResolveErrorKind::FieldNotStatic { owner, name } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            ("DG-RESOLVE-FIELD-NOT-STATIC", None)
        }
        ResolveErrorKind::FactoryNotFound {
            owner,
            name,
            suggestion,
            candidates,
        } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            metadata.insert(
                "candidates".to_string(),
                DiagnosticValue::StringList(candidates.clone()),
            );
            let hint = match (suggestion, candidates.is_empty()) {
                (Some(close), _) => Some(did_you_mean(close)),
                (None, false) => Some(available(candidates)),
                (None, true) => Some(format!(
                    "`{owner}` declares no static zero-argument functions"
                )),
            };
            ("DG-RESOLVE-FACTORY-NOT-FOUND", hint)
        }
        ResolveErrorKind::FactoryNotStatic { owner, name } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            ("DG-RESOLVE-FACTORY-NOT-STATIC", None)
        }
        ResolveErrorKind::Inaccessible {
            owner,
            name,
            visibility,
            package,
        } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            metadata.insert("visibility".to_string(), string(&visibility.to_string()));
            metadata.insert("package".to_string(), string(package));
            ("DG-RESOLVE-INACCESSIBLE", None)
        }
        ResolveErrorKind::FactoryHasParameters { owner, name, count } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            metadata.insert(
                "count".to_string(),
                DiagnosticValue::Number(i64::try_from(*count).unwrap_or(i64::MAX)),
            );
            ("DG-RESOLVE-FACTORY-HAS-PARAMETERS", None)
        }
        ResolveErrorKind::FactoryReturnsNothing { owner, name } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(name));
            ("DG-RESOLVE-FACTORY-RETURNS-NOTHING", None)
        }
        ResolveErrorKind::IncompatibleType {
            reference,
            param,
            found,
            expected,
        } => {
            metadata.insert("reference".to_string(), string(reference));
            metadata.insert("param".to_string(), string(param));
            metadata.insert("found".to_string(), string(&found.to_string()));
            metadata.insert("expected".to_string(), string(&expected.to_string()));
            ("DG-RESOLVE-INCOMPATIBLE-TYPE", None)
        }
        ResolveErrorKind::MalformedMemberType { owner, member, .. } => {
            metadata.insert("owner".to_string(), string(owner));
            metadata.insert("name".to_string(), string(member));
            ("DG-RESOLVE-MALFORMED-MEMBER-TYPE", None)
        }
    };
    diagnostic.code = code.to_string();
    diagnostic.suggestion = suggestion;
    diagnostic
}
