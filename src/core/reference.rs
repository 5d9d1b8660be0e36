//! Textual member references (`name`, `Class.name`, `pkg.Class.name`).
//!
//! Parsing only splits and checks shape; binding a locator to a declaration
//! is the resolver's job.

use std::fmt;

use thiserror::Error;

/// Where to look for the type that owns a referenced member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypePath {
    /// No type given: the enclosing type of the annotated declaration.
    Enclosing,
    /// A simple name, looked up in the enclosing package.
    Simple(String),
    /// A fully qualified name, split into segments.
    Qualified(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub type_path: TypePath,
    pub member: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Empty reference")]
    Empty,

    #[error("Reference `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("Reference `{0}` contains invalid identifier `{1}`")]
    InvalidIdentifier(String, String),
}

impl Locator {
    pub fn parse(text: &str) -> Result<Locator, ReferenceError> {
        let mut segments = split_segments(text)?;
        let member = segments.pop().ok_or(ReferenceError::Empty)?;
        Ok(Locator {
            type_path: TypePath::from_segments(segments),
            member,
        })
    }

    pub fn member_of(type_path: TypePath, member: impl Into<String>) -> Self {
        Locator {
            type_path,
            member: member.into(),
        }
    }
}

impl TypePath {
    /// Parses a reference that names a type rather than a member.
    pub fn parse(text: &str) -> Result<TypePath, ReferenceError> {
        let segments = split_segments(text)?;
        Ok(TypePath::from_segments(segments))
    }

    fn from_segments(mut segments: Vec<String>) -> TypePath {
        match segments.len() {
            0 => TypePath::Enclosing,
            1 => TypePath::Simple(segments.remove(0)),
            _ => TypePath::Qualified(segments),
        }
    }
}

fn split_segments(text: &str) -> Result<Vec<String>, ReferenceError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ReferenceError::Empty);
    }
    text.split('.')
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(ReferenceError::EmptySegment(text.to_string()));
            }
            if !is_identifier(segment) {
                return Err(ReferenceError::InvalidIdentifier(
                    text.to_string(),
                    segment.to_string(),
                ));
            }
            Ok(segment.to_string())
        })
        .collect()
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePath::Enclosing => write!(f, "<enclosing>"),
            TypePath::Simple(name) => write!(f, "{name}"),
            TypePath::Qualified(segments) => write!(f, "{}", segments.join(".")),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_path {
            TypePath::Enclosing => write!(f, "{}", self.member),
            path => write!(f, "{path}.{}", self.member),
        }
    }
}

#[cfg(test)]
#[path = "../tests/reference/t_reference.rs"]
mod tests;
