//! Literal-parse diagnostic mapping.

use crate::core::literal::{LiteralError, LiteralErrorKind};

use super::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, DiagnosticValue, available, did_you_mean,
    string,
};

pub(super) fn from_literal_error(error: &LiteralError) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(
        DiagnosticCategory::Parse,
        DiagnosticSeverity::Error,
        "",
        error.span(),
        error.to_string(),
    );
    let metadata = &mut diagnostic.metadata;
    let (code, suggestion) = match error.kind() {
        LiteralErrorKind::EmptyValue(ty) => {
            metadata.insert("type".to_string(), string(&ty.to_string()));
            ("DG-LITERAL-EMPTY-VALUE", None)
        }
        LiteralErrorKind::Unparseable { text, ty } => {
            metadata.insert("text".to_string(), string(text));
            metadata.insert("type".to_string(), string(&ty.to_string()));
            ("DG-LITERAL-UNPARSEABLE", None)
        }
        LiteralErrorKind::OutOfRange { text, ty } => {
            metadata.insert("text".to_string(), string(text));
            metadata.insert("type".to_string(), string(&ty.to_string()));
            ("DG-LITERAL-OUT-OF-RANGE", None)
        }
        LiteralErrorKind::NullForPrimitive(ty) => {
            metadata.insert("type".to_string(), string(&ty.to_string()));
            let hint = ty
                .primitive_kind()
                .map(|kind| format!("declare the parameter as `{}` to allow null", kind.box_name()));
            ("DG-LITERAL-NULL-FOR-PRIMITIVE", hint)
        }
        LiteralErrorKind::UnknownEnumConstant {
            text,
            enum_name,
            suggestion,
            constants,
        } => {
            metadata.insert("text".to_string(), string(text));
            metadata.insert("enum".to_string(), string(enum_name));
            metadata.insert(
                "constants".to_string(),
                DiagnosticValue::StringList(constants.clone()),
            );
            let hint = match suggestion {
                Some(close) => did_you_mean(close),
                None => available(constants),
            };
            ("DG-LITERAL-UNKNOWN-ENUM-CONSTANT", Some(hint))
        }
        LiteralErrorKind::UnsupportedType(ty) => {
            metadata.insert("type".to_string(), string(&ty.to_string()));
            ("DG-LITERAL-UNSUPPORTED-TYPE", None)
        }
    };
    diagnostic.code = code.to_string();
    diagnostic.suggestion = suggestion;
    diagnostic
}
