//! Centralized type compatibility rules.
//!
//! This module defines a small, table-driven set of conversion rules between
//! type categories ("tags"). Exact matches are handled directly, while
//! non-exact conversions consult per-source rule tables.
//!
//! How to use:
//! - Call `type_assignable(from, to, hierarchy)` to decide whether a value of
//!   `from` may initialize a parameter of type `to`.
//! - When adding a new conversion, add a rule in `type_rules_for` and a small
//!   helper like `foo_to_bar`.

use super::{PrimitiveKind, Type, simple_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAssignability {
    Exact,
    Widening,
    Boxing,
    Unboxing,
    Reference,
    Incompatible,
}

impl TypeAssignability {
    pub fn is_assignable(self) -> bool {
        !matches!(self, TypeAssignability::Incompatible)
    }
}

/// Declared subtype relation between nominal types, supplied by the fact base.
pub trait TypeHierarchy {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeTag {
    Primitive,
    Boxed,
    String,
    Object,
    Named,
    Array,
    Void,
}

#[derive(Clone, Copy)]
struct TypeRule {
    target: TypeTag,
    apply: fn(&Type, &Type, &dyn TypeHierarchy) -> Option<TypeAssignability>,
}

pub fn type_assignable(from: &Type, to: &Type, hierarchy: &dyn TypeHierarchy) -> TypeAssignability {
    if from == to {
        return TypeAssignability::Exact;
    }

    let from_tag = type_tag(from);
    let to_tag = type_tag(to);
    for rule in type_rules_for(from_tag) {
        if rule.target == to_tag {
            if let Some(assignability) = (rule.apply)(from, to, hierarchy) {
                return assignability;
            }
        }
    }
    TypeAssignability::Incompatible
}

fn type_tag(ty: &Type) -> TypeTag {
    match ty {
        Type::Primitive(_) => TypeTag::Primitive,
        Type::Boxed(_) => TypeTag::Boxed,
        Type::String => TypeTag::String,
        Type::Object => TypeTag::Object,
        Type::Named { .. } => TypeTag::Named,
        Type::Array(_) => TypeTag::Array,
        Type::Void => TypeTag::Void,
    }
}

// --- Type Rules ---

const PRIMITIVE_TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        target: TypeTag::Primitive,
        apply: primitive_to_primitive,
    },
    TypeRule {
        target: TypeTag::Boxed,
        apply: primitive_to_boxed,
    },
    TypeRule {
        target: TypeTag::Object,
        apply: boxing_to_reference,
    },
    TypeRule {
        target: TypeTag::Named,
        apply: boxing_to_reference,
    },
];

const BOXED_TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        target: TypeTag::Primitive,
        apply: boxed_to_primitive,
    },
    TypeRule {
        target: TypeTag::Object,
        apply: any_to_object,
    },
    TypeRule {
        target: TypeTag::Named,
        apply: boxed_to_named,
    },
];

const STRING_TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        target: TypeTag::Object,
        apply: any_to_object,
    },
    TypeRule {
        target: TypeTag::Named,
        apply: string_to_named,
    },
];

const NAMED_TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        target: TypeTag::Object,
        apply: any_to_object,
    },
    TypeRule {
        target: TypeTag::Named,
        apply: named_to_named,
    },
];

const ARRAY_TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        target: TypeTag::Object,
        apply: any_to_object,
    },
    TypeRule {
        target: TypeTag::Array,
        apply: array_to_array,
    },
];

fn type_rules_for(tag: TypeTag) -> &'static [TypeRule] {
    match tag {
        TypeTag::Primitive => PRIMITIVE_TYPE_RULES,
        TypeTag::Boxed => BOXED_TYPE_RULES,
        TypeTag::String => STRING_TYPE_RULES,
        TypeTag::Named => NAMED_TYPE_RULES,
        TypeTag::Array => ARRAY_TYPE_RULES,
        TypeTag::Object | TypeTag::Void => &[],
    }
}

fn primitive_to_primitive(
    from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (Type::Primitive(from), Type::Primitive(to)) = (from, to) else {
        return None;
    };
    widens(*from, *to).then_some(TypeAssignability::Widening)
}

fn primitive_to_boxed(
    from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (Type::Primitive(from), Type::Boxed(to)) = (from, to) else {
        return None;
    };
    (from == to).then_some(TypeAssignability::Boxing)
}

fn boxing_to_reference(
    from: &Type,
    to: &Type,
    hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let Type::Primitive(kind) = from else {
        return None;
    };
    let boxed = Type::Boxed(*kind);
    type_assignable(&boxed, to, hierarchy)
        .is_assignable()
        .then_some(TypeAssignability::Boxing)
}

fn boxed_to_primitive(
    from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (Type::Boxed(from), Type::Primitive(to)) = (from, to) else {
        return None;
    };
    (from == to || widens(*from, *to)).then_some(TypeAssignability::Unboxing)
}

fn boxed_to_named(
    from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (Type::Boxed(kind), Type::Named { name, args }) = (from, to) else {
        return None;
    };
    let target = simple_name(name);
    let matches = args.is_empty()
        && match target {
            "Number" => kind.is_numeric() && *kind != PrimitiveKind::Char,
            "Comparable" | "Serializable" => true,
            _ => false,
        };
    matches.then_some(TypeAssignability::Reference)
}

fn string_to_named(
    _from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let Type::Named { name, .. } = to else {
        return None;
    };
    matches!(
        simple_name(name),
        "CharSequence" | "Comparable" | "Serializable"
    )
    .then_some(TypeAssignability::Reference)
}

fn any_to_object(
    _from: &Type,
    to: &Type,
    _hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    matches!(to, Type::Object).then_some(TypeAssignability::Reference)
}

fn named_to_named(
    from: &Type,
    to: &Type,
    hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (
        Type::Named {
            name: from_name,
            args: from_args,
        },
        Type::Named {
            name: to_name,
            args: to_args,
        },
    ) = (from, to)
    else {
        return None;
    };

    // Raw uses of a generic type are accepted against any parameterization.
    let args_compatible = from_args.is_empty() || to_args.is_empty() || from_args == to_args;
    if !args_compatible {
        return None;
    }

    if same_nominal(from_name, to_name) {
        return Some(TypeAssignability::Exact);
    }
    hierarchy
        .is_subtype(from_name, to_name)
        .then_some(TypeAssignability::Reference)
}

fn array_to_array(
    from: &Type,
    to: &Type,
    hierarchy: &dyn TypeHierarchy,
) -> Option<TypeAssignability> {
    let (Type::Array(from_elem), Type::Array(to_elem)) = (from, to) else {
        return None;
    };
    // Arrays are covariant over reference elements only.
    if matches!(**from_elem, Type::Primitive(_)) {
        return None;
    }
    match type_assignable(from_elem, to_elem, hierarchy) {
        TypeAssignability::Exact | TypeAssignability::Reference => {
            Some(TypeAssignability::Reference)
        }
        _ => None,
    }
}

/// Nominal names match when equal, or when one side is written unqualified
/// and the simple names agree.
fn same_nominal(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let qualified = |name: &str| name.contains('.');
    if qualified(a) && qualified(b) {
        return false;
    }
    simple_name(a) == simple_name(b)
}

fn widens(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    match from {
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short | Char => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
        Double | Boolean => false,
    }
}
