use thiserror::Error;

use crate::core::diag::{Span, SpannedError};
use crate::core::diagnostics::{DiagnosticCategory, DiagnosticSeverity};
use crate::core::model::DeclKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateErrorKind {
    #[error("{annotation} is not supported on {decl_kind} (`{decl_name}`)")]
    UnsupportedTarget {
        annotation: &'static str,
        decl_kind: DeclKind,
        decl_name: String,
    },

    #[error("Parameter `{param}` declares more than one default source: {}", sources.join(", "))]
    ConflictingSources { param: String, sources: Vec<String> },

    #[error(
        "Non-consecutive defaults: required parameter `{required}` follows defaulted parameter `{defaulted}`"
    )]
    NonConsecutiveDefaults { required: String, defaulted: String },

    #[error("`{0}` is private; generated code cannot call it")]
    PrivateTarget(String),

    #[error("Derived name `{name}` requested in `{holder}` is also produced by `{other}`")]
    NameConflict {
        name: String,
        holder: String,
        other: String,
    },

    #[error("@IncludeDefaults target `{0}` is {1}")]
    IncludeAbstractTarget(String, &'static str),

    #[error("@IncludeDefaults target `{0}` has no public constructors")]
    IncludeNoPublicConstructors(String),

    #[error("Convention source `{1}` defines no members matching a constructor parameter of `{0}`")]
    IncludeNoConventionMatches(String, String),

    #[error("`{member}` does not match any parameter in the selected constructor of `{target}`")]
    UnmatchedConventionDefault { member: String, target: String },

    #[error("@GenerateDefaults on `{0}` has no parameters with defaults")]
    NoDefaultsDeclared(String),
}

pub type ValidateError = SpannedError<ValidateErrorKind>;

impl ValidateErrorKind {
    pub fn at(self, span: Span) -> ValidateError {
        ValidateError::new(self, span)
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            ValidateErrorKind::IncludeNoConventionMatches(..)
            | ValidateErrorKind::UnmatchedConventionDefault { .. }
            | ValidateErrorKind::NoDefaultsDeclared(_) => DiagnosticSeverity::Warning,
            _ => DiagnosticSeverity::Error,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self.severity() {
            DiagnosticSeverity::Warning => DiagnosticCategory::Convention,
            DiagnosticSeverity::Error => DiagnosticCategory::Structural,
        }
    }
}
