//! Declared-type model for parameters, fields, and function results.
//!
//! Types arrive from the host as text (`int`, `java.lang.String`,
//! `List<String>`, `byte[]`) and are parsed into a small closed model that is
//! just rich enough for assignability and literal checks.

mod relations;
mod render;

use thiserror::Error;

pub use relations::{TypeAssignability, TypeHierarchy, type_assignable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Char,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn box_name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveKind::Boolean)
    }

    fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == text)
    }

    fn from_box_name(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.box_name() == text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Primitive(PrimitiveKind),
    Boxed(PrimitiveKind),
    String,
    Object,
    Named { name: String, args: Vec<Type> },
    Array(Box<Type>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("Empty type text")]
    Empty,

    #[error("Malformed type `{0}`")]
    Malformed(String),

    #[error("Unbalanced type arguments in `{0}`")]
    UnbalancedArgs(String),
}

const LANG_PREFIX: &str = "java.lang.";

impl Type {
    pub fn parse(text: &str) -> Result<Type, TypeParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TypeParseError::Empty);
        }

        if let Some(elem) = text.strip_suffix("[]") {
            return Ok(Type::Array(Box::new(Type::parse(elem)?)));
        }

        if text.starts_with('?') {
            // Wildcards only appear as type arguments; keep them opaque.
            return Ok(Type::Named {
                name: text.to_string(),
                args: Vec::new(),
            });
        }

        let (base, args) = match text.find('<') {
            Some(open) => {
                let Some(inner) = text[open + 1..].strip_suffix('>') else {
                    return Err(TypeParseError::UnbalancedArgs(text.to_string()));
                };
                let args = split_type_args(inner)
                    .ok_or_else(|| TypeParseError::UnbalancedArgs(text.to_string()))?
                    .into_iter()
                    .map(Type::parse)
                    .collect::<Result<Vec<_>, _>>()?;
                (text[..open].trim(), args)
            }
            None => (text, Vec::new()),
        };

        if !is_type_name(base) {
            return Err(TypeParseError::Malformed(text.to_string()));
        }

        if args.is_empty() {
            if base == "void" {
                return Ok(Type::Void);
            }
            if let Some(kind) = PrimitiveKind::from_keyword(base) {
                return Ok(Type::Primitive(kind));
            }
            let lang_name = base.strip_prefix(LANG_PREFIX).unwrap_or(base);
            if let Some(kind) = PrimitiveKind::from_box_name(lang_name) {
                return Ok(Type::Boxed(kind));
            }
            match lang_name {
                "String" => return Ok(Type::String),
                "Object" => return Ok(Type::Object),
                _ => {}
            }
        }

        Ok(Type::Named {
            name: base.to_string(),
            args,
        })
    }

    /// Every non-primitive type admits `null`.
    pub fn is_nullable(&self) -> bool {
        !matches!(self, Type::Primitive(_) | Type::Void)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Types that accept a textual literal verbatim.
    pub fn is_string_like(&self) -> bool {
        match self {
            Type::String | Type::Object => true,
            Type::Named { name, args } => {
                args.is_empty() && simple_name(name) == "CharSequence"
            }
            _ => false,
        }
    }

    /// Primitive kind behind a primitive or its box.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Type::Primitive(kind) | Type::Boxed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Name of a user-declared nominal type, if this is one.
    pub fn nominal_name(&self) -> Option<&str> {
        match self {
            Type::Named { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn is_type_name(text: &str) -> bool {
    !text.is_empty()
        && text.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        })
}

fn split_type_args(inner: &str) -> Option<Vec<&str>> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    args.push(inner[start..].trim());
    if args.iter().any(|arg| arg.is_empty()) {
        return None;
    }
    Some(args)
}

#[cfg(test)]
#[path = "../../tests/types/t_types.rs"]
mod tests;
