//! External inclusion: convention matching and constructor selection.
//!
//! A type that cannot be annotated is targeted from another type with
//! `@IncludeDefaults`. Static constants and zero-argument functions of the
//! convention source are matched to constructor parameters by normalized
//! name, the best-covered public constructor is selected, and the result is
//! modeled like any directly annotated constructor.

use tracing::debug;

use super::builder::{CallableRequest, first_generate, resolve_settings};
use super::{
    CallableKind, CallableOrigin, DefaultSource, DefaultableCallable, ModelErrorKind, Parameter,
    TypeRef,
};
use crate::core::diag::Span;
use crate::core::diagnostics::Diagnostic;
use crate::core::facts::{
    ConstructorFacts, GenerateAnnotation, IncludeAnnotation, SymbolTable, TypeFacts, TypeId,
    TypeKind, Visibility,
};
use crate::core::names;
use crate::core::options::GenerateOptions;
use crate::core::reference::{Locator, TypePath};
use crate::core::resolve::{ResolveErrorKind, SymbolResolver};
use crate::core::types::Type;
use crate::core::validate::ValidateErrorKind;

/// Match coverage of one candidate constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorScore {
    /// Position among the target's declared constructors.
    pub index: usize,
    pub matched: usize,
    pub total: usize,
}

/// Picks the constructor with the most matched parameters; ties prefer more
/// total parameters, then earlier declaration order.
pub fn select_constructor(scores: &[ConstructorScore]) -> Option<usize> {
    scores
        .iter()
        .min_by(|a, b| {
            b.matched
                .cmp(&a.matched)
                .then(b.total.cmp(&a.total))
                .then(a.index.cmp(&b.index))
        })
        .map(|score| score.index)
}

/// A static member of the convention source usable as a default.
#[derive(Debug, Clone)]
struct ConventionMember<'t> {
    name: &'t str,
    key: String,
}

fn convention_members(source: &TypeFacts) -> Vec<ConventionMember<'_>> {
    let fields = source
        .fields
        .iter()
        .filter(|field| field.is_static)
        .map(|field| field.name.as_str());
    let factories = source
        .methods
        .iter()
        .filter(|method| method.is_static && method.params.is_empty() && method.returns_value())
        .map(|method| method.name.as_str());
    // Fields come first so a constant wins over a same-named factory.
    fields
        .chain(factories)
        .map(|name| ConventionMember {
            name,
            key: names::normalize(name),
        })
        .collect()
}

fn match_member<'m, 't>(
    members: &'m [ConventionMember<'t>],
    param: &str,
) -> Option<&'m ConventionMember<'t>> {
    let key = names::normalize(param);
    members.iter().find(|member| member.key == key)
}

pub(super) fn build_inclusion(
    table: &SymbolTable<'_>,
    options: &GenerateOptions,
    holder: TypeId,
    include: &IncludeAnnotation,
) -> Result<CallableRequest, Vec<Diagnostic>> {
    let resolver = SymbolResolver::new(table);
    let span = include.span;
    let resolve_path = |text: &str| -> Result<TypeId, Diagnostic> {
        let path = TypePath::parse(text).map_err(|error| {
            Diagnostic::from_resolve_error(&ResolveErrorKind::MalformedReference(error).at(span))
        })?;
        resolver
            .resolve_type_path(holder, &path, span)
            .map_err(|error| Diagnostic::from_resolve_error(&error))
    };

    let target_id = resolve_path(&include.target).map_err(|d| vec![d])?;
    let source_id = match &include.source {
        Some(source) => resolve_path(source).map_err(|d| vec![d])?,
        None => holder,
    };
    debug!(target = %include.target, ?source_id, "processing inclusion request");

    let target = table.get(target_id);
    let source = table.get(source_id);
    let holder_facts = table.get(holder);
    let target_name = target.qualified_name();

    if target.is_abstract_target() {
        let kind = if target.kind == TypeKind::Interface {
            "an interface"
        } else {
            "abstract"
        };
        return Err(vec![Diagnostic::from_validate_error(
            &ValidateErrorKind::IncludeAbstractTarget(target_name, kind).at(span),
        )]);
    }

    let candidates = target.public_constructors().collect::<Vec<_>>();
    if candidates.is_empty() {
        return Err(vec![Diagnostic::from_validate_error(
            &ValidateErrorKind::IncludeNoPublicConstructors(target_name).at(span),
        )]);
    }

    let members = convention_members(source);
    let scores = candidates
        .iter()
        .map(|(index, ctor)| ConstructorScore {
            index: *index,
            matched: ctor
                .params
                .iter()
                .filter(|param| match_member(&members, &param.name).is_some())
                .count(),
            total: ctor.params.len(),
        })
        .collect::<Vec<_>>();
    let Some(selected) = select_constructor(&scores) else {
        return Err(Vec::new());
    };
    let ctor = &target.constructors[selected];
    debug!(target = %target_name, selected, ?scores, "selected constructor");

    let source_path = if source_id == holder {
        TypePath::Enclosing
    } else {
        TypePath::Qualified(
            source
                .qualified_name()
                .split('.')
                .map(str::to_string)
                .collect(),
        )
    };

    let mut diagnostics = Vec::new();
    let (parameters, malformed) = convention_parameters(ctor, &members, &source_path, span);
    diagnostics.extend(malformed);

    let any_matched = scores.iter().any(|score| score.matched > 0);
    let source_name = source.qualified_name();
    if !any_matched {
        diagnostics.push(Diagnostic::from_validate_error(
            &ValidateErrorKind::IncludeNoConventionMatches(target_name.clone(), source_name.clone())
                .at(span),
        ));
    } else {
        for member in &members {
            let convention_default = names::has_default_prefix(member.name);
            let used = ctor
                .params
                .iter()
                .any(|param| names::normalize(&param.name) == member.key);
            if convention_default && !used {
                diagnostics.push(Diagnostic::from_validate_error(
                    &ValidateErrorKind::UnmatchedConventionDefault {
                        member: format!("{source_name}.{}", member.name),
                        target: target_name.clone(),
                    }
                    .at(span),
                ));
            }
        }
    }

    let settings = resolve_settings(
        Some(&generate_view(include)),
        first_generate(&holder_facts.annotations),
        options,
    );
    let callable = DefaultableCallable {
        kind: CallableKind::Constructor,
        declaring_type: TypeRef::new(&target.package, &target.name),
        declaring_id: target_id,
        enclosing: holder,
        package: holder_facts.package.clone(),
        name: target.name.clone(),
        parameters,
        return_type: Type::Named {
            name: if target.package == holder_facts.package {
                target.name.clone()
            } else {
                target_name.clone()
            },
            args: Vec::new(),
        },
        visibility: Visibility::Public,
        emission: settings.emission,
        factory_name: settings.factory_name,
        explicit_name: settings.explicit_name,
        misplaced: Vec::new(),
        origin: CallableOrigin::Included {
            convention_source: TypeRef::new(&source.package, &source.name),
        },
        span,
    };
    let subject = callable.signature();
    let diagnostics = diagnostics
        .into_iter()
        .map(|diagnostic| diagnostic.with_subject(&subject))
        .collect();
    Ok(CallableRequest {
        callable,
        diagnostics,
    })
}

fn convention_parameters(
    ctor: &ConstructorFacts,
    members: &[ConventionMember<'_>],
    source_path: &TypePath,
    span: Span,
) -> (Vec<Parameter>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let parameters = ctor
        .params
        .iter()
        .map(|param| {
            let declared_type = Type::parse(&param.ty).unwrap_or_else(|_| {
                diagnostics.push(Diagnostic::from_model_error(
                    &ModelErrorKind::MalformedType(param.name.clone(), param.ty.clone())
                        .at(span),
                ));
                Type::Named {
                    name: param.ty.clone(),
                    args: Vec::new(),
                }
            });
            let sources = match_member(members, &param.name)
                .map(|member| {
                    vec![DefaultSource::ConventionMatch(Locator::member_of(
                        source_path.clone(),
                        member.name,
                    ))]
                })
                .unwrap_or_default();
            Parameter {
                name: param.name.clone(),
                declared_type,
                declares_default: !sources.is_empty(),
                sources,
                span,
            }
        })
        .collect();
    (parameters, diagnostics)
}

/// Inclusion settings seen through the same nearest-wins chain as
/// `@GenerateDefaults`.
fn generate_view(include: &IncludeAnnotation) -> GenerateAnnotation {
    GenerateAnnotation {
        mode: include.mode,
        factory_name: include.factory_name.clone(),
        name: include.name.clone(),
        span: include.span,
    }
}

#[cfg(test)]
#[path = "../../tests/model/t_inclusion.rs"]
mod tests;
