//! Whole-program type index over a facts snapshot.
//!
//! This is deliberately not a type checker: it answers exactly the queries
//! default resolution needs (type lookup by name, member enumeration,
//! accessibility, declared supertypes).

use std::collections::HashSet;

use indexmap::IndexMap;

use super::{ProgramFacts, TypeFacts, TypeKind, Visibility};
use crate::core::types::{TypeHierarchy, simple_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

pub struct SymbolTable<'a> {
    facts: &'a ProgramFacts,
    by_qualified: IndexMap<String, TypeId>,
    by_simple: IndexMap<String, Vec<TypeId>>,
}

impl<'a> SymbolTable<'a> {
    pub fn new(facts: &'a ProgramFacts) -> Self {
        let mut by_qualified = IndexMap::new();
        let mut by_simple: IndexMap<String, Vec<TypeId>> = IndexMap::new();
        for (index, ty) in facts.types.iter().enumerate() {
            let id = TypeId(index as u32);
            // First declaration wins on duplicate qualified names.
            by_qualified.entry(ty.qualified_name()).or_insert(id);
            by_simple.entry(ty.name.clone()).or_default().push(id);
        }
        Self {
            facts,
            by_qualified,
            by_simple,
        }
    }

    pub fn facts(&self) -> &'a ProgramFacts {
        self.facts
    }

    pub fn get(&self, id: TypeId) -> &'a TypeFacts {
        &self.facts.types[id.0 as usize]
    }

    pub fn types(&self) -> impl Iterator<Item = (TypeId, &'a TypeFacts)> {
        self.facts
            .types
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId(index as u32), ty))
    }

    pub fn lookup_qualified(&self, name: &str) -> Option<TypeId> {
        self.by_qualified.get(name).copied()
    }

    pub fn lookup_in_package(&self, package: &str, simple: &str) -> Option<TypeId> {
        self.with_simple_name(simple)
            .iter()
            .copied()
            .find(|id| self.get(*id).package == package)
    }

    pub fn with_simple_name(&self, simple: &str) -> &[TypeId] {
        self.by_simple.get(simple).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        self.by_qualified.keys().map(String::as_str)
    }

    /// Best-effort lookup of a type name as written in a declaration:
    /// qualified first, then the context package, then a unique simple name.
    pub fn lookup_written(&self, name: &str, context_package: &str) -> Option<TypeId> {
        if let Some(id) = self.lookup_qualified(name) {
            return Some(id);
        }
        let simple = simple_name(name);
        if let Some(id) = self.lookup_in_package(context_package, simple) {
            return Some(id);
        }
        match self.with_simple_name(simple) {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Whether a member with `visibility` declared on `owner` can be reached
    /// from generated code placed in `from_package`.
    pub fn is_accessible(&self, owner: TypeId, visibility: Visibility, from_package: &str) -> bool {
        let owner = self.get(owner);
        let same_package = owner.package == from_package;
        let type_visible = match owner.visibility {
            Visibility::Private => false,
            Visibility::Package | Visibility::Protected => same_package,
            Visibility::Public => true,
        };
        let member_visible = match visibility {
            Visibility::Private => false,
            Visibility::Package | Visibility::Protected => same_package,
            Visibility::Public => true,
        };
        type_visible && member_visible
    }

    pub fn enum_constants(&self, id: TypeId) -> Option<&'a [String]> {
        let ty = self.get(id);
        (ty.kind == TypeKind::Enum).then_some(ty.enum_constants.as_slice())
    }

    /// Hierarchy view with unqualified names resolved against `package`.
    pub fn hierarchy<'t>(&'t self, package: &'t str) -> PackageHierarchy<'t, 'a> {
        PackageHierarchy {
            table: self,
            package,
        }
    }
}

pub struct PackageHierarchy<'t, 'a> {
    table: &'t SymbolTable<'a>,
    package: &'t str,
}

impl TypeHierarchy for PackageHierarchy<'_, '_> {
    fn is_subtype(&self, sub: &str, sup: &str) -> bool {
        let Some(start) = self.table.lookup_written(sub, self.package) else {
            return false;
        };
        let target = self.table.lookup_written(sup, self.package);

        let mut seen = HashSet::new();
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let ty = self.table.get(id);
            for written in &ty.supertypes {
                // Strip type arguments; the hierarchy is nominal.
                let base = written.split('<').next().unwrap_or(written).trim();
                match self.table.lookup_written(base, &ty.package) {
                    Some(next) if Some(next) == target => return true,
                    Some(next) => pending.push(next),
                    None if target.is_none() && simple_name(base) == simple_name(sup) => {
                        return true;
                    }
                    None => {}
                }
            }
        }
        false
    }
}
