//! Overload ladders: one derived callable per supplied-argument count.

use tracing::trace;

use super::{Arg, GenParam, Overload, OverloadSet, call_target, receiver_param};
use crate::core::model::{DefaultableCallable, ResolvedDefault, TypeRef};
use crate::core::options::GenerateOptions;

/// Lowers to overloads taking `n - d ..= n` arguments, where `d` is the
/// defaulted suffix length. The full-arity call is only emitted for
/// constructor-like callables, whose factory is a new name; for functions it
/// would duplicate the declared callable. Returns `None` when nothing would be emitted.
pub(super) fn lower_overloads(
    callable: &DefaultableCallable,
    resolved: &[Option<ResolvedDefault>],
    options: &GenerateOptions,
    holder: TypeRef,
    name: String,
) -> Option<OverloadSet> {
    let total = callable.parameters.len();
    let defaulted = callable.defaulted_suffix_len();
    let highest = if callable.kind.is_constructor_like() {
        total
    } else {
        total.checked_sub(1)?
    };
    let lowest = total - defaulted;
    if lowest > highest {
        return None;
    }

    let receiver = receiver_param(callable, options);
    let receiver_name = receiver
        .as_ref()
        .map(|param| param.name.as_str())
        .unwrap_or_default();
    let call = call_target(callable, receiver_name);

    let mut overloads = Vec::with_capacity(highest - lowest + 1);
    for supplied in lowest..=highest {
        let mut params = Vec::with_capacity(supplied + 1);
        params.extend(receiver.clone());
        let mut args = Vec::with_capacity(total);
        for (index, param) in callable.parameters.iter().enumerate() {
            if index < supplied {
                params.push(GenParam {
                    name: param.name.clone(),
                    ty: param.declared_type.clone(),
                });
                args.push(Arg::Param(param.name.clone()));
                continue;
            }
            // Validation and resolution guarantee every omitted parameter
            // has a resolved default.
            let default = resolved.get(index).and_then(Option::as_ref)?;
            args.push(Arg::Default {
                expr: default.expr.clone(),
                ty: param.declared_type.clone(),
            });
        }
        overloads.push(Overload {
            params,
            return_type: callable.return_type.clone(),
            call: call.clone(),
            args,
        });
    }
    trace!(%holder, %name, overloads = overloads.len(), "lowered overload set");
    Some(OverloadSet {
        holder,
        name,
        overloads,
    })
}
