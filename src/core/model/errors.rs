use thiserror::Error;

use crate::core::diag::{Span, SpannedError};
use crate::core::reference::ReferenceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelErrorKind {
    #[error("Malformed type `{1}` on `{0}`")]
    MalformedType(String, String),

    #[error("@Default on `{0}` declares no value, field, or factory")]
    EmptyDefault(String),

    #[error("Malformed default reference on `{0}`: {1}")]
    MalformedReference(String, ReferenceError),
}

pub type ModelError = SpannedError<ModelErrorKind>;

impl ModelErrorKind {
    pub fn at(self, span: Span) -> ModelError {
        ModelError::new(self, span)
    }
}
