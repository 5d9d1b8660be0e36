use tracing::trace;

use super::{BuilderField, BuilderType, call_target, receiver_param};
use crate::core::model::{DefaultableCallable, ResolvedDefault, TypeRef};
use crate::core::options::GenerateOptions;

const CALL_TERMINAL: &str = "call";

pub(super) fn lower_builder(
    callable: &DefaultableCallable,
    resolved: &[Option<ResolvedDefault>],
    options: &GenerateOptions,
    name: TypeRef,
) -> BuilderType {
    let receiver = receiver_param(callable, options);
    let receiver_name = receiver
        .as_ref()
        .map(|param| param.name.as_str())
        .unwrap_or_default();
    let target = call_target(callable, receiver_name);

    let fields = callable
        .parameters
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let init = resolved
                .get(index)
                .and_then(Option::as_ref)
                .map(|default| default.expr.clone());
            BuilderField {
                name: param.name.clone(),
                ty: param.declared_type.clone(),
                required: init.is_none(),
                init,
            }
        })
        .collect::<Vec<_>>();

    let terminal = if callable.kind.is_constructor_like() {
        callable.factory_name.clone()
    } else {
        CALL_TERMINAL.to_string()
    };
    trace!(builder = %name, fields = fields.len(), %terminal, "lowered builder");

    BuilderType {
        name,
        target,
        receiver,
        fields,
        terminal,
        return_type: callable.return_type.clone(),
    }
}
