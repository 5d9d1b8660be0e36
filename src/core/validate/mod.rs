//! Structural rules over the callable model.
//!
//! Validation never looks at symbols: reference binding and literal parsing
//! belong to resolution. Rules here depend only on the model itself, so a
//! callable's structural diagnostics are the same whatever else is processed.

mod errors;
mod registry;

use tracing::trace;

use crate::core::diagnostics::Diagnostic;
use crate::core::facts::Visibility;
use crate::core::model::{CallableOrigin, DefaultableCallable, EmissionMode, MisplacedAnnotation};

pub use errors::{ValidateError, ValidateErrorKind};
pub use registry::{ConflictRegistry, NameClash};

pub fn validate_callable(callable: &DefaultableCallable) -> Vec<Diagnostic> {
    let subject = callable.signature();
    let mut errors = Vec::new();

    for misplaced in &callable.misplaced {
        errors.push(unsupported_target(misplaced));
    }

    if callable.visibility == Visibility::Private {
        errors.push(ValidateErrorKind::PrivateTarget(subject.clone()).at(callable.span));
    }

    for param in &callable.parameters {
        if param.sources.len() > 1 {
            errors.push(
                ValidateErrorKind::ConflictingSources {
                    param: param.name.clone(),
                    sources: param.sources.iter().map(ToString::to_string).collect(),
                }
                .at(param.span),
            );
        }
    }

    if callable.emission == EmissionMode::Overloads {
        if let Some((required, defaulted)) = callable.first_non_consecutive() {
            errors.push(
                ValidateErrorKind::NonConsecutiveDefaults {
                    required: required.name.clone(),
                    defaulted: defaulted.name.clone(),
                }
                .at(required.span),
            );
        }
    }

    // Inclusion reports its own finding when nothing matched.
    if callable.origin == CallableOrigin::Annotated && !callable.has_any_default() {
        errors.push(ValidateErrorKind::NoDefaultsDeclared(subject.clone()).at(callable.span));
    }

    trace!(callable = %subject, findings = errors.len(), "validated");
    errors
        .iter()
        .map(|error| Diagnostic::from_validate_error(error).with_subject(&subject))
        .collect()
}

/// Annotations found where no callable is built (types, fields).
pub fn check_misplaced(misplaced: &[MisplacedAnnotation]) -> Vec<Diagnostic> {
    misplaced
        .iter()
        .map(|m| Diagnostic::from_validate_error(&unsupported_target(m)))
        .collect()
}

fn unsupported_target(misplaced: &MisplacedAnnotation) -> ValidateError {
    ValidateErrorKind::UnsupportedTarget {
        annotation: misplaced.annotation,
        decl_kind: misplaced.decl_kind,
        decl_name: misplaced.decl_name.clone(),
    }
    .at(misplaced.span)
}

#[cfg(test)]
#[path = "../../tests/validate/t_validate.rs"]
mod tests;
