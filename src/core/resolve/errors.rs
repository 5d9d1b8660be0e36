use thiserror::Error;

use crate::core::diag::{Span, SpannedError};
use crate::core::facts::Visibility;
use crate::core::reference::ReferenceError;
use crate::core::types::Type;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ResolveErrorKind {
    #[error("Malformed reference: {0}")]
    MalformedReference(ReferenceError),

    #[error(
        "Type `{name}` is not declared in package `{package}`; no import context is available to resolve a simple name from another package"
    )]
    NoImportContext {
        name: String,
        package: String,
        candidates: Vec<String>,
    },

    #[error("Unknown type `{name}`")]
    TypeNotFound {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unknown static field `{name}` in `{owner}`")]
    FieldNotFound {
        owner: String,
        name: String,
        suggestion: Option<String>,
        /// A static zero-argument function with this exact name exists.
        factory_hint: bool,
    },

    #[error("Field `{owner}.{name}` is not static")]
    FieldNotStatic { owner: String, name: String },

    #[error("Unknown factory function `{name}` in `{owner}`")]
    FactoryNotFound {
        owner: String,
        name: String,
        suggestion: Option<String>,
        candidates: Vec<String>,
    },

    #[error("Factory function `{owner}.{name}` is not static")]
    FactoryNotStatic { owner: String, name: String },

    #[error("`{owner}.{name}` is {visibility} and not accessible from package `{package}`")]
    Inaccessible {
        owner: String,
        name: String,
        visibility: Visibility,
        package: String,
    },

    #[error("Factory function `{owner}.{name}` must take no arguments, found {count}")]
    FactoryHasParameters {
        owner: String,
        name: String,
        count: usize,
    },

    #[error("Factory function `{owner}.{name}` returns nothing")]
    FactoryReturnsNothing { owner: String, name: String },

    #[error(
        "`{reference}` has type `{found}`, which is not assignable to parameter `{param}` of type `{expected}`"
    )]
    IncompatibleType {
        reference: String,
        param: String,
        found: Type,
        expected: Type,
    },

    #[error("Malformed declared type `{text}` on `{owner}.{member}`")]
    MalformedMemberType {
        owner: String,
        member: String,
        text: String,
    },
}

pub type ResolveError = SpannedError<ResolveErrorKind>;

impl ResolveErrorKind {
    pub fn at(self, span: Span) -> ResolveError {
        ResolveError::new(self, span)
    }
}
