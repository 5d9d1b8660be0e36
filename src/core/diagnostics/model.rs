//! Model-build diagnostic mapping.

use crate::core::model::{ModelError, ModelErrorKind};

use super::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, string};

pub(super) fn from_model_error(error: &ModelError) -> Diagnostic {
    let (category, code) = match error.kind() {
        ModelErrorKind::MalformedType(..) => {
            (DiagnosticCategory::Structural, "DG-MODEL-MALFORMED-TYPE")
        }
        ModelErrorKind::EmptyDefault(_) => (DiagnosticCategory::Structural, "DG-MODEL-EMPTY-DEFAULT"),
        ModelErrorKind::MalformedReference(..) => {
            (DiagnosticCategory::Resolution, "DG-MODEL-MALFORMED-REFERENCE")
        }
    };
    let mut diagnostic = Diagnostic::new(
        category,
        DiagnosticSeverity::Error,
        code,
        error.span(),
        error.to_string(),
    );
    let decl = match error.kind() {
        ModelErrorKind::MalformedType(decl, _)
        | ModelErrorKind::EmptyDefault(decl)
        | ModelErrorKind::MalformedReference(decl, _) => decl,
    };
    diagnostic.metadata.insert("decl".to_string(), string(decl));
    if let ModelErrorKind::EmptyDefault(_) = error.kind() {
        diagnostic.suggestion = Some("set exactly one of `value`, `field`, or `factory`".to_string());
    }
    diagnostic
}
