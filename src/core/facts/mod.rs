//! Read-only declaration facts supplied by the host toolchain.
//!
//! The host parser and type system are external collaborators; this module
//! fixes the shape of what they hand over. A snapshot is immutable for the
//! whole run and deserializes from JSON so the CLI can consume it directly.

mod symtab;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::diag::Span;
use crate::core::model::EmissionMode;

pub use symtab::{SymbolTable, TypeId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramFacts {
    #[serde(default)]
    pub types: Vec<TypeFacts>,
}

impl ProgramFacts {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    #[default]
    Package,
    Protected,
    Public,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Visibility::Private => "private",
            Visibility::Package => "package-private",
            Visibility::Protected => "protected",
            Visibility::Public => "public",
        };
        write!(f, "{text}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Record,
    Enum,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFacts {
    #[serde(default)]
    pub package: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub visibility: Visibility,
    /// Declared supertypes (extends/implements), as written.
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldFacts>,
    #[serde(default)]
    pub methods: Vec<MethodFacts>,
    #[serde(default)]
    pub constructors: Vec<ConstructorFacts>,
    /// Record components, in declaration order.
    #[serde(default)]
    pub components: Vec<ParamFacts>,
    #[serde(default)]
    pub enum_constants: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
    #[serde(default)]
    pub span: Span,
}

impl TypeFacts {
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldFacts> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodFacts> {
        self.methods.iter().filter(move |method| method.name == name)
    }

    pub fn public_constructors(&self) -> impl Iterator<Item = (usize, &ConstructorFacts)> {
        self.constructors
            .iter()
            .enumerate()
            .filter(|(_, ctor)| ctor.visibility == Visibility::Public)
    }

    pub fn is_abstract_target(&self) -> bool {
        self.is_abstract || self.kind == TypeKind::Interface
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFacts {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFacts {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamFacts>,
    /// Absent for `void`.
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
    #[serde(default)]
    pub span: Span,
}

impl MethodFacts {
    pub fn returns_value(&self) -> bool {
        self.return_type
            .as_deref()
            .is_some_and(|ty| ty.trim() != "void")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorFacts {
    #[serde(default)]
    pub params: Vec<ParamFacts>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamFacts {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub annotations: Vec<AnnotationFacts>,
    #[serde(default)]
    pub span: Span,
}

/// Per-parameter default source: exactly one of the three should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultAnnotation {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub factory: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// Generation settings on a function, constructor, or type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateAnnotation {
    #[serde(default)]
    pub mode: Option<EmissionMode>,
    #[serde(default)]
    pub factory_name: Option<String>,
    /// Explicit derived name (overload set or builder type).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub span: Span,
}

/// Request to generate defaults for a type that cannot be annotated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeAnnotation {
    pub target: String,
    /// Type supplying convention defaults; the annotated type when absent.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub mode: Option<EmissionMode>,
    #[serde(default)]
    pub factory_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "annotation", rename_all = "snake_case")]
pub enum AnnotationFacts {
    Default(DefaultAnnotation),
    GenerateDefaults(GenerateAnnotation),
    IncludeDefaults(IncludeAnnotation),
}

impl AnnotationFacts {
    pub fn span(&self) -> Span {
        match self {
            AnnotationFacts::Default(a) => a.span,
            AnnotationFacts::GenerateDefaults(a) => a.span,
            AnnotationFacts::IncludeDefaults(a) => a.span,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AnnotationFacts::Default(_) => "@Default",
            AnnotationFacts::GenerateDefaults(_) => "@GenerateDefaults",
            AnnotationFacts::IncludeDefaults(_) => "@IncludeDefaults",
        }
    }
}
