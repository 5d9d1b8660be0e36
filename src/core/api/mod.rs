//! Pipeline entrypoint: facts in, derived declarations and diagnostics out.
//!
//! Callables are grouped by enclosing type and each group is validated and
//! resolved on its own. Derived names are then claimed run-wide: every
//! claimant of a clashing name is rejected, whatever the claim order. A
//! callable with an error diagnostic is dropped, its siblings are not.

use tracing::{debug, info};

use crate::core::codegen::{
    self, DerivedDecl, DerivedName, GeneratedUnit, derived_name, render_units,
};
use crate::core::diagnostics::Diagnostic;
use crate::core::facts::{ProgramFacts, SymbolTable, TypeId};
use crate::core::model::{CallableOrigin, CallableRequest, ResolvedDefault, build_model};
use crate::core::options::GenerateOptions;
use crate::core::resolve::resolve_callable;
use crate::core::validate::{ConflictRegistry, ValidateErrorKind, check_misplaced, validate_callable};

#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub derived: Vec<DerivedDecl>,
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }
}

pub fn generate(facts: &ProgramFacts, options: &GenerateOptions) -> GenerationOutput {
    let table = SymbolTable::new(facts);
    let model = build_model(&table, options);

    let mut output = GenerationOutput {
        diagnostics: model.diagnostics,
        ..GenerationOutput::default()
    };
    output.diagnostics.extend(check_misplaced(&model.misplaced));

    let mut checked = Vec::new();
    for (enclosing, requests) in &model.groups {
        checked.extend(check_enclosing_type(&table, options, *enclosing, requests));
    }
    claim_derived_names(&mut checked);

    for checked in checked {
        let callable = &checked.request.callable;
        if checked.diagnostics.iter().any(Diagnostic::is_error) {
            debug!(callable = %callable.signature(), "skipped: has errors");
        } else if let Some(decl) = codegen::lower_callable(callable, &checked.defaults, options) {
            output.derived.push(decl);
        }
        output.diagnostics.extend(checked.diagnostics);
    }
    output.units = render_units(&output.derived);

    info!(
        derived = output.derived.len(),
        units = output.units.len(),
        errors = output.error_count(),
        warnings = output.warning_count(),
        "generation finished"
    );
    output
}

/// A callable after validation and resolution, before the emit decision.
struct Checked<'r> {
    request: &'r CallableRequest,
    enclosing: String,
    name: DerivedName,
    diagnostics: Vec<Diagnostic>,
    defaults: Vec<Option<ResolvedDefault>>,
}

#[tracing::instrument(skip_all, fields(enclosing = %table.get(enclosing).qualified_name()))]
fn check_enclosing_type<'r>(
    table: &SymbolTable<'_>,
    options: &GenerateOptions,
    enclosing: TypeId,
    requests: &'r [CallableRequest],
) -> Vec<Checked<'r>> {
    let enclosing = table.get(enclosing).qualified_name();
    let checked = requests
        .iter()
        .map(|request| {
            let callable = &request.callable;
            let mut diagnostics = request.diagnostics.clone();
            diagnostics.extend(validate_callable(callable));
            let resolved = resolve_callable(table, callable);
            diagnostics.extend(resolved.diagnostics);
            Checked {
                request,
                enclosing: enclosing.clone(),
                name: derived_name(callable, options),
                diagnostics,
                defaults: resolved.defaults,
            }
        })
        .collect::<Vec<_>>();
    debug!(callables = checked.len(), "checked enclosing type");
    checked
}

/// Registers every derived name for the whole run. Holders and builders
/// live in the declaring type's package, so requests from different
/// enclosing types can still produce the same unit.
fn claim_derived_names(checked: &mut [Checked<'_>]) {
    let mut registry = ConflictRegistry::new();
    for index in 0..checked.len() {
        let current = &checked[index];
        let source = conflict_source(current);
        let Err(clash) = registry.claim(current.name.clone(), index, &source) else {
            continue;
        };

        let current_diagnostic = name_conflict(current, &clash.first_subject);
        checked[index].diagnostics.push(current_diagnostic);
        if clash.first_newly_clashed {
            let first_diagnostic = name_conflict(&checked[clash.first], &source);
            checked[clash.first].diagnostics.push(first_diagnostic);
        }
    }
    debug!(claimed = registry.len(), "claimed derived names");
}

/// How a conflicting request is named to the other claimant. Included
/// callables share their target's signature, so the including type is added.
fn conflict_source(checked: &Checked<'_>) -> String {
    let callable = &checked.request.callable;
    match &callable.origin {
        CallableOrigin::Annotated => callable.signature(),
        CallableOrigin::Included { .. } => {
            format!("{} included by {}", callable.signature(), checked.enclosing)
        }
    }
}

fn name_conflict(checked: &Checked<'_>, other: &str) -> Diagnostic {
    let callable = &checked.request.callable;
    Diagnostic::from_validate_error(
        &ValidateErrorKind::NameConflict {
            name: checked.name.to_string(),
            holder: checked.enclosing.clone(),
            other: other.to_string(),
        }
        .at(callable.span),
    )
    .with_subject(&callable.signature())
}

#[cfg(test)]
#[path = "../../tests/api/t_api.rs"]
mod tests;
