//! Derived-declaration names.

use std::fmt;

use crate::core::model::{DefaultableCallable, EmissionMode, TypeRef};
use crate::core::options::GenerateOptions;

/// The name a generation request claims within its enclosing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DerivedName {
    /// A static method set on a holder type.
    OverloadSet { holder: TypeRef, name: String },
    Builder(TypeRef),
}

impl fmt::Display for DerivedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivedName::OverloadSet { holder, name } => write!(f, "{holder}.{name}"),
            DerivedName::Builder(builder) => write!(f, "{builder}"),
        }
    }
}

pub fn derived_name(callable: &DefaultableCallable, options: &GenerateOptions) -> DerivedName {
    let declaring = &callable.declaring_type.name;
    match callable.emission {
        EmissionMode::Overloads => {
            let name = callable.explicit_name.clone().unwrap_or_else(|| {
                if callable.kind.is_constructor_like() {
                    callable.factory_name.clone()
                } else {
                    callable.name.clone()
                }
            });
            DerivedName::OverloadSet {
                holder: holder_type(callable, options),
                name,
            }
        }
        EmissionMode::Builder => {
            let name = callable.explicit_name.clone().unwrap_or_else(|| {
                if callable.kind.is_constructor_like() {
                    format!("{declaring}{}", options.builder_suffix)
                } else {
                    format!(
                        "{declaring}{}{}",
                        capitalize(&callable.name),
                        options.builder_suffix
                    )
                }
            });
            DerivedName::Builder(TypeRef::new(&callable.package, name))
        }
    }
}

/// Holder type for the overload sets of callables declared on one type.
pub fn holder_type(callable: &DefaultableCallable, options: &GenerateOptions) -> TypeRef {
    TypeRef::new(
        &callable.package,
        format!("{}{}", callable.declaring_type.name, options.holder_suffix),
    )
}

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
