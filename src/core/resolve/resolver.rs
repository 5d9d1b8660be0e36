use tracing::trace;

use crate::core::diag::Span;
use crate::core::diagnostics::Diagnostic;
use crate::core::facts::{FieldFacts, MethodFacts, SymbolTable, TypeFacts, TypeId};
use crate::core::literal::{self, EnumInfo};
use crate::core::model::{
    DefaultExpr, DefaultSource, DefaultableCallable, EmissionMode, EvalTiming, Parameter,
    ResolvedDefault, TypeRef,
};
use crate::core::names;
use crate::core::reference::{Locator, TypePath};
use crate::core::resolve::{ResolveError, ResolveErrorKind};
use crate::core::types::{Type, type_assignable};

/// Resolved defaults for one callable, indexed like its parameters.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDefaults {
    pub defaults: Vec<Option<ResolvedDefault>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Thin query layer over the symbol table: member existence, static-ness,
/// accessibility, and assignability. Nothing more.
pub struct SymbolResolver<'a, 't> {
    table: &'a SymbolTable<'t>,
}

/// Where a reference is being resolved from.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'c> {
    /// Type that an unqualified reference refers to.
    pub origin: TypeId,
    /// Package the generated declaration lands in.
    pub package: &'c str,
    pub emission: EmissionMode,
}

pub fn resolve_callable(table: &SymbolTable<'_>, callable: &DefaultableCallable) -> ResolvedDefaults {
    let resolver = SymbolResolver::new(table);
    let ctx = ResolveContext {
        origin: callable.enclosing,
        package: &callable.package,
        emission: callable.emission,
    };
    let subject = callable.signature();

    let mut out = ResolvedDefaults::default();
    for param in &callable.parameters {
        let Some(source) = param.default_source() else {
            out.defaults.push(None);
            continue;
        };
        match resolver.resolve_source(&ctx, source, param) {
            Ok(resolved) => {
                trace!(param = %param.name, ?resolved.timing, "resolved default");
                out.defaults.push(Some(resolved));
            }
            Err(diagnostic) => {
                out.defaults.push(None);
                out.diagnostics.push(diagnostic.with_subject(&subject));
            }
        }
    }
    out
}

impl<'a, 't> SymbolResolver<'a, 't> {
    pub fn new(table: &'a SymbolTable<'t>) -> Self {
        Self { table }
    }

    pub fn resolve_source(
        &self,
        ctx: &ResolveContext<'_>,
        source: &DefaultSource,
        param: &Parameter,
    ) -> Result<ResolvedDefault, Diagnostic> {
        match source {
            DefaultSource::Literal(text) => {
                let enum_owner = self.enum_owner(&param.declared_type, ctx.package);
                let enum_info = enum_owner.as_ref().map(|(owner, constants)| EnumInfo {
                    owner,
                    constants: *constants,
                });
                literal::parse_literal(text, &param.declared_type, enum_info)
                    .map(|expr| ResolvedDefault {
                        timing: EvalTiming::Constant,
                        value_type: param.declared_type.clone(),
                        expr,
                    })
                    .map_err(|kind| Diagnostic::from_literal_error(&kind.at(param.span)))
            }
            DefaultSource::FieldRef(locator) => self
                .resolve_field(ctx, locator, param)
                .map_err(|kind| Diagnostic::from_resolve_error(&kind.at(param.span))),
            DefaultSource::FactoryRef(locator) => self
                .resolve_factory(ctx, locator, param)
                .map_err(|kind| Diagnostic::from_resolve_error(&kind.at(param.span))),
            DefaultSource::ConventionMatch(locator) => self
                .resolve_convention(ctx, locator, param)
                .map_err(|kind| Diagnostic::from_resolve_error(&kind.at(param.span))),
        }
    }

    pub fn resolve_type_path(
        &self,
        origin: TypeId,
        path: &TypePath,
        span: Span,
    ) -> Result<TypeId, ResolveError> {
        self.lookup_type(origin, path).map_err(|kind| kind.at(span))
    }

    fn lookup_type(&self, origin: TypeId, path: &TypePath) -> Result<TypeId, ResolveErrorKind> {
        match path {
            TypePath::Enclosing => Ok(origin),
            TypePath::Simple(name) => {
                let package = &self.table.get(origin).package;
                if let Some(id) = self.table.lookup_in_package(package, name) {
                    return Ok(id);
                }
                let candidates = self
                    .table
                    .with_simple_name(name)
                    .iter()
                    .map(|id| self.table.get(*id).qualified_name())
                    .collect::<Vec<_>>();
                if !candidates.is_empty() {
                    return Err(ResolveErrorKind::NoImportContext {
                        name: name.clone(),
                        package: package.clone(),
                        candidates,
                    });
                }
                let same_package = self
                    .table
                    .types()
                    .filter(|(_, ty)| &ty.package == package)
                    .map(|(_, ty)| ty.name.as_str());
                Err(ResolveErrorKind::TypeNotFound {
                    name: name.clone(),
                    suggestion: names::suggest(name, same_package),
                })
            }
            TypePath::Qualified(segments) => {
                let qualified = segments.join(".");
                self.table.lookup_qualified(&qualified).ok_or_else(|| {
                    ResolveErrorKind::TypeNotFound {
                        suggestion: names::suggest(&qualified, self.table.qualified_names()),
                        name: qualified,
                    }
                })
            }
        }
    }

    fn resolve_field(
        &self,
        ctx: &ResolveContext<'_>,
        locator: &Locator,
        param: &Parameter,
    ) -> Result<ResolvedDefault, ResolveErrorKind> {
        let owner_id = self.lookup_type(ctx.origin, &locator.type_path)?;
        let owner = self.table.get(owner_id);
        let Some(field) = owner.field(&locator.member) else {
            let statics = owner
                .fields
                .iter()
                .filter(|field| field.is_static)
                .map(|field| field.name.as_str());
            return Err(ResolveErrorKind::FieldNotFound {
                owner: owner.qualified_name(),
                name: locator.member.clone(),
                suggestion: names::suggest(&locator.member, statics),
                factory_hint: owner
                    .methods_named(&locator.member)
                    .any(|method| method.is_static && method.params.is_empty()),
            });
        };
        self.check_field(ctx, owner_id, field)?;
        let value_type = self.member_type(owner, &field.name, &field.ty)?;
        self.check_assignable(ctx, locator, &value_type, param)?;
        Ok(ResolvedDefault {
            timing: EvalTiming::Constant,
            value_type,
            expr: DefaultExpr::StaticField {
                owner: type_ref(owner),
                name: field.name.clone(),
            },
        })
    }

    fn check_field(
        &self,
        ctx: &ResolveContext<'_>,
        owner_id: TypeId,
        field: &FieldFacts,
    ) -> Result<(), ResolveErrorKind> {
        let owner = self.table.get(owner_id);
        if !field.is_static {
            return Err(ResolveErrorKind::FieldNotStatic {
                owner: owner.qualified_name(),
                name: field.name.clone(),
            });
        }
        if !self.table.is_accessible(owner_id, field.visibility, ctx.package) {
            return Err(ResolveErrorKind::Inaccessible {
                owner: owner.qualified_name(),
                name: field.name.clone(),
                visibility: field.visibility,
                package: ctx.package.to_string(),
            });
        }
        Ok(())
    }

    fn resolve_factory(
        &self,
        ctx: &ResolveContext<'_>,
        locator: &Locator,
        param: &Parameter,
    ) -> Result<ResolvedDefault, ResolveErrorKind> {
        let owner_id = self.lookup_type(ctx.origin, &locator.type_path)?;
        let owner = self.table.get(owner_id);
        let overloads = owner.methods_named(&locator.member).collect::<Vec<_>>();
        // Prefer the zero-argument overload when the name is overloaded.
        let Some(method) = overloads
            .iter()
            .find(|method| method.params.is_empty())
            .or_else(|| overloads.first())
            .copied()
        else {
            let candidates = factory_candidates(owner);
            return Err(ResolveErrorKind::FactoryNotFound {
                owner: owner.qualified_name(),
                name: locator.member.clone(),
                suggestion: names::suggest(
                    &locator.member,
                    candidates.iter().map(String::as_str),
                ),
                candidates,
            });
        };
        self.check_factory(ctx, owner_id, method)?;
        let text = method.return_type.as_deref().unwrap_or("void");
        let value_type = self.member_type(owner, &method.name, text)?;
        self.check_assignable(ctx, locator, &value_type, param)?;
        let timing = match ctx.emission {
            EmissionMode::Overloads => EvalTiming::ComputedEachCall,
            EmissionMode::Builder => EvalTiming::ComputedOnce,
        };
        Ok(ResolvedDefault {
            timing,
            value_type,
            expr: DefaultExpr::StaticCall {
                owner: type_ref(owner),
                name: method.name.clone(),
            },
        })
    }

    fn check_factory(
        &self,
        ctx: &ResolveContext<'_>,
        owner_id: TypeId,
        method: &MethodFacts,
    ) -> Result<(), ResolveErrorKind> {
        let owner = self.table.get(owner_id);
        if !method.is_static {
            return Err(ResolveErrorKind::FactoryNotStatic {
                owner: owner.qualified_name(),
                name: method.name.clone(),
            });
        }
        if !self.table.is_accessible(owner_id, method.visibility, ctx.package) {
            return Err(ResolveErrorKind::Inaccessible {
                owner: owner.qualified_name(),
                name: method.name.clone(),
                visibility: method.visibility,
                package: ctx.package.to_string(),
            });
        }
        if !method.params.is_empty() {
            return Err(ResolveErrorKind::FactoryHasParameters {
                owner: owner.qualified_name(),
                name: method.name.clone(),
                count: method.params.len(),
            });
        }
        if !method.returns_value() {
            return Err(ResolveErrorKind::FactoryReturnsNothing {
                owner: owner.qualified_name(),
                name: method.name.clone(),
            });
        }
        Ok(())
    }

    fn resolve_convention(
        &self,
        ctx: &ResolveContext<'_>,
        locator: &Locator,
        param: &Parameter,
    ) -> Result<ResolvedDefault, ResolveErrorKind> {
        let owner_id = self.lookup_type(ctx.origin, &locator.type_path)?;
        if self.table.get(owner_id).field(&locator.member).is_some() {
            self.resolve_field(ctx, locator, param)
        } else {
            self.resolve_factory(ctx, locator, param)
        }
    }

    fn member_type(
        &self,
        owner: &TypeFacts,
        member: &str,
        text: &str,
    ) -> Result<Type, ResolveErrorKind> {
        Type::parse(text).map_err(|_| ResolveErrorKind::MalformedMemberType {
            owner: owner.qualified_name(),
            member: member.to_string(),
            text: text.to_string(),
        })
    }

    fn check_assignable(
        &self,
        ctx: &ResolveContext<'_>,
        locator: &Locator,
        found: &Type,
        param: &Parameter,
    ) -> Result<(), ResolveErrorKind> {
        let hierarchy = self.table.hierarchy(ctx.package);
        if type_assignable(found, &param.declared_type, &hierarchy).is_assignable() {
            return Ok(());
        }
        Err(ResolveErrorKind::IncompatibleType {
            reference: locator.to_string(),
            param: param.name.clone(),
            found: found.clone(),
            expected: param.declared_type.clone(),
        })
    }

    /// Owner and constants when `ty` names an enum declared in the facts.
    fn enum_owner(&self, ty: &Type, package: &str) -> Option<(TypeRef, &'t [String])> {
        let id = self.table.lookup_written(ty.nominal_name()?, package)?;
        let constants = self.table.enum_constants(id)?;
        Some((type_ref(self.table.get(id)), constants))
    }
}

fn type_ref(ty: &TypeFacts) -> TypeRef {
    TypeRef::new(&ty.package, &ty.name)
}

/// Static, zero-argument, value-returning functions of a type.
fn factory_candidates(owner: &TypeFacts) -> Vec<String> {
    let mut names = Vec::new();
    for method in &owner.methods {
        let viable = method.is_static && method.params.is_empty() && method.returns_value();
        if viable && !names.contains(&method.name) {
            names.push(method.name.clone());
        }
    }
    names
}
