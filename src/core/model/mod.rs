//! In-memory model of defaultable callables.
//!
//! A `DefaultableCallable` is built once per annotated declaration (or per
//! external inclusion request) and is immutable afterwards; resolution,
//! validation, and generation all read it.

mod builder;
mod errors;
mod inclusion;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::diag::Span;
use crate::core::facts::{TypeId, Visibility};
use crate::core::reference::Locator;
use crate::core::types::Type;

pub use builder::{CallableRequest, ModelOutput, build_model};
pub use errors::{ModelError, ModelErrorKind};
pub use inclusion::{ConstructorScore, select_constructor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionMode {
    #[default]
    Overloads,
    Builder,
}

impl FromStr for EmissionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overloads" => Ok(EmissionMode::Overloads),
            "builder" => Ok(EmissionMode::Builder),
            other => Err(format!(
                "unknown emission mode `{other}` (expected `overloads` or `builder`)"
            )),
        }
    }
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmissionMode::Overloads => write!(f, "overloads"),
            EmissionMode::Builder => write!(f, "builder"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Constructor,
    InstanceMethod,
    StaticMethod,
    RecordConstructor,
}

impl CallableKind {
    /// Constructor-like callables are reached through a named factory.
    pub fn is_constructor_like(self) -> bool {
        matches!(
            self,
            CallableKind::Constructor | CallableKind::RecordConstructor
        )
    }
}

/// Kinds of declarations an annotation can sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Type,
    Constructor,
    Method,
    Parameter,
    RecordComponent,
    Field,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DeclKind::Type => "a type",
            DeclKind::Constructor => "a constructor",
            DeclKind::Method => "a function",
            DeclKind::Parameter => "a parameter",
            DeclKind::RecordComponent => "a record component",
            DeclKind::Field => "a field",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultSource {
    Literal(String),
    FieldRef(Locator),
    FactoryRef(Locator),
    /// Bound by external-inclusion matching; resolves like a field or factory.
    ConventionMatch(Locator),
}

impl fmt::Display for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::Literal(text) => write!(f, "value \"{text}\""),
            DefaultSource::FieldRef(locator) => write!(f, "field `{locator}`"),
            DefaultSource::FactoryRef(locator) => write!(f, "factory `{locator}`"),
            DefaultSource::ConventionMatch(locator) => write!(f, "convention member `{locator}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub declared_type: Type,
    /// Sources as declared. More than one is rejected by validation.
    pub sources: Vec<DefaultSource>,
    /// Set when a default annotation is present, even one that failed to
    /// produce a usable source.
    pub declares_default: bool,
    pub span: Span,
}

impl Parameter {
    pub fn has_default(&self) -> bool {
        self.declares_default || !self.sources.is_empty()
    }

    pub fn default_source(&self) -> Option<&DefaultSource> {
        match self.sources.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Package-qualified reference to a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub package: String,
    pub name: String,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallableOrigin {
    Annotated,
    /// Built from `@IncludeDefaults` on the enclosing type.
    Included { convention_source: TypeRef },
}

/// An annotation found on a declaration kind it does not support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisplacedAnnotation {
    pub annotation: &'static str,
    pub decl_kind: DeclKind,
    pub decl_name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DefaultableCallable {
    pub kind: CallableKind,
    /// Type whose callable is invoked by the generated code.
    pub declaring_type: TypeRef,
    pub declaring_id: TypeId,
    /// Type that owns the generation request; derived names are unique per
    /// enclosing type and derived code lands in its package.
    pub enclosing: TypeId,
    pub package: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub visibility: Visibility,
    pub emission: EmissionMode,
    pub factory_name: String,
    pub explicit_name: Option<String>,
    pub misplaced: Vec<MisplacedAnnotation>,
    pub origin: CallableOrigin,
    pub span: Span,
}

impl DefaultableCallable {
    /// Number of trailing parameters that carry a default.
    pub fn defaulted_suffix_len(&self) -> usize {
        self.parameters
            .iter()
            .rev()
            .take_while(|param| param.has_default())
            .count()
    }

    /// First required parameter that follows a defaulted one, together with
    /// that defaulted parameter.
    pub fn first_non_consecutive(&self) -> Option<(&Parameter, &Parameter)> {
        let mut last_defaulted = None;
        for param in &self.parameters {
            if param.has_default() {
                last_defaulted = Some(param);
            } else if let Some(defaulted) = last_defaulted {
                return Some((param, defaulted));
            }
        }
        None
    }

    pub fn has_any_default(&self) -> bool {
        self.parameters.iter().any(Parameter::has_default)
    }

    /// Human-readable signature used in diagnostics, e.g.
    /// `app.Server(String host, int port)` or `app.Greeter.greet(String name)`.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|param| format!("{} {}", param.declared_type, param.name))
            .collect::<Vec<_>>()
            .join(", ");
        if self.kind.is_constructor_like() {
            format!("{}({params})", self.declaring_type)
        } else {
            format!("{}.{}({params})", self.declaring_type, self.name)
        }
    }
}

/// How often a resolved default is evaluated by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalTiming {
    Constant,
    /// Evaluated once when a builder is constructed, then reused.
    ComputedOnce,
    /// Evaluated on every generated-overload invocation.
    ComputedEachCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultExpr {
    /// Host-language literal text, already rendered.
    Literal(String),
    Null,
    StaticField { owner: TypeRef, name: String },
    StaticCall { owner: TypeRef, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDefault {
    pub timing: EvalTiming,
    pub value_type: Type,
    pub expr: DefaultExpr,
}

#[cfg(test)]
#[path = "../../tests/model/t_model.rs"]
mod tests;
