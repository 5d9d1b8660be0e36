//! Lowering of validated callables into derived declarations, and the
//! textual emitter for them.

mod builder;
mod naming;
mod overloads;
mod render;

use crate::core::model::{CallableKind, DefaultExpr, DefaultableCallable, ResolvedDefault, TypeRef};
use crate::core::options::GenerateOptions;
use crate::core::types::Type;

pub use naming::{DerivedName, capitalize, derived_name, holder_type};
pub use render::{GeneratedUnit, render_units};

#[derive(Debug, Clone, PartialEq)]
pub enum DerivedDecl {
    OverloadSet(OverloadSet),
    Builder(BuilderType),
}

/// Static methods named `name` on a holder type, one per call arity.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadSet {
    pub holder: TypeRef,
    pub name: String,
    pub overloads: Vec<Overload>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overload {
    pub params: Vec<GenParam>,
    pub return_type: Type,
    pub call: CallTarget,
    pub args: Vec<Arg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenParam {
    pub name: String,
    pub ty: Type,
}

/// What a derived declaration delegates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    Constructor(TypeRef),
    Static { owner: TypeRef, name: String },
    /// A function invoked on the value held in `receiver`.
    Instance { receiver: String, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Param(String),
    /// A resolved default, typed so a null can be disambiguated.
    Default { expr: DefaultExpr, ty: Type },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderType {
    pub name: TypeRef,
    pub target: CallTarget,
    pub receiver: Option<GenParam>,
    pub fields: Vec<BuilderField>,
    pub terminal: String,
    pub return_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderField {
    pub name: String,
    pub ty: Type,
    /// Initializer evaluated once when the builder is constructed.
    pub init: Option<DefaultExpr>,
    pub required: bool,
}

/// Lowers one callable that passed validation and resolution. `resolved` is
/// indexed like the callable's parameters.
pub fn lower_callable(
    callable: &DefaultableCallable,
    resolved: &[Option<ResolvedDefault>],
    options: &GenerateOptions,
) -> Option<DerivedDecl> {
    match derived_name(callable, options) {
        DerivedName::OverloadSet { holder, name } => {
            overloads::lower_overloads(callable, resolved, options, holder, name)
                .map(DerivedDecl::OverloadSet)
        }
        DerivedName::Builder(name) => Some(DerivedDecl::Builder(builder::lower_builder(
            callable, resolved, options, name,
        ))),
    }
}

fn call_target(callable: &DefaultableCallable, receiver: &str) -> CallTarget {
    match callable.kind {
        CallableKind::Constructor | CallableKind::RecordConstructor => {
            CallTarget::Constructor(callable.declaring_type.clone())
        }
        CallableKind::StaticMethod => CallTarget::Static {
            owner: callable.declaring_type.clone(),
            name: callable.name.clone(),
        },
        CallableKind::InstanceMethod => CallTarget::Instance {
            receiver: receiver.to_string(),
            name: callable.name.clone(),
        },
    }
}

/// Receiver parameter for instance functions, renamed away from the
/// callable's own parameter names.
fn receiver_param(callable: &DefaultableCallable, options: &GenerateOptions) -> Option<GenParam> {
    if callable.kind != CallableKind::InstanceMethod {
        return None;
    }
    let taken = |name: &str| callable.parameters.iter().any(|param| param.name == name);
    let mut name = options.receiver_name.clone();
    let mut counter = 1;
    while taken(&name) {
        name = format!("{}{counter}", options.receiver_name);
        counter += 1;
    }
    Some(GenParam {
        name,
        ty: declaring_type(callable),
    })
}

fn declaring_type(callable: &DefaultableCallable) -> Type {
    let declaring = &callable.declaring_type;
    let name = if declaring.package == callable.package {
        declaring.name.clone()
    } else {
        declaring.qualified()
    };
    Type::Named {
        name,
        args: Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/codegen/t_codegen.rs"]
mod tests;
