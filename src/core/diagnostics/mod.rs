//! Unified diagnostics model.
//!
//! Every stage reports through its own error-kind enum; this layer normalizes
//! them into one category-tagged representation with stable codes, an
//! optional "did you mean" suggestion, and structured metadata.

mod literal;
mod model;
mod resolve;
mod validate;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::diag::{Span, format_error};
use crate::core::literal::LiteralError;
use crate::core::model::ModelError;
use crate::core::resolve::ResolveError;
use crate::core::validate::ValidateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    /// Bad annotation combination, visibility, declaration kind, or name.
    Structural,
    /// A reference that does not bind to a usable member.
    Resolution,
    /// Literal text that is not a constant of the declared type.
    Parse,
    /// Informational findings from convention matching.
    Convention,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum DiagnosticValue {
    String(String),
    Number(i64),
    Bool(bool),
    StringList(Vec<String>),
}

pub type DiagnosticMetadata = BTreeMap<String, DiagnosticValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: String,
    pub severity: DiagnosticSeverity,
    pub span: Span,
    pub message: String,
    pub suggestion: Option<String>,
    /// Signature of the callable the diagnostic belongs to, when known.
    pub subject: Option<String>,
    pub metadata: DiagnosticMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireDiagnostic {
    pub category: DiagnosticCategory,
    pub code: String,
    pub severity: DiagnosticSeverity,
    pub span: Span,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub metadata: DiagnosticMetadata,
}

impl Diagnostic {
    pub fn from_model_error(error: &ModelError) -> Self {
        model::from_model_error(error)
    }

    pub fn from_resolve_error(error: &ResolveError) -> Self {
        resolve::from_resolve_error(error)
    }

    pub fn from_literal_error(error: &LiteralError) -> Self {
        literal::from_literal_error(error)
    }

    pub fn from_validate_error(error: &ValidateError) -> Self {
        validate::from_validate_error(error)
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        if self.subject.is_none() {
            self.subject = Some(subject.to_string());
        }
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn to_wire(&self) -> WireDiagnostic {
        WireDiagnostic {
            category: self.category,
            code: self.code.clone(),
            severity: self.severity,
            span: self.span,
            message: self.message.clone(),
            suggestion: self.suggestion.clone(),
            subject: self.subject.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// Human-readable form. With source text the span is shown as a snippet.
    pub fn render(&self, source: Option<&str>) -> String {
        let headline = format!("{}[{}]: {}", self.severity, self.code, self.message);
        let mut out = match source {
            Some(source) => format_error(source, self.span, headline),
            None => format!(
                "({}:{}) {headline}\n",
                self.span.start.line, self.span.start.column
            ),
        };
        if let Some(subject) = &self.subject {
            out.push_str(&format!("  = in: {subject}\n"));
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("  = help: {suggestion}\n"));
        }
        out
    }

    fn new(
        category: DiagnosticCategory,
        severity: DiagnosticSeverity,
        code: &str,
        span: Span,
        message: String,
    ) -> Self {
        Self {
            category,
            code: code.to_string(),
            severity,
            span,
            message,
            suggestion: None,
            subject: None,
            metadata: DiagnosticMetadata::new(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

fn did_you_mean(name: &str) -> String {
    format!("did you mean `{name}`?")
}

fn available(names: &[String]) -> String {
    let listed = names
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("available: {listed}")
}

fn string(value: &str) -> DiagnosticValue {
    DiagnosticValue::String(value.to_string())
}

#[cfg(test)]
#[path = "../../tests/diagnostics/t_diagnostics.rs"]
mod tests;
