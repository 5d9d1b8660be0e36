//! Default-source resolution against the whole-program symbol table.

pub mod errors;
mod resolver;

pub use errors::{ResolveError, ResolveErrorKind};
pub use resolver::{ResolveContext, ResolvedDefaults, SymbolResolver, resolve_callable};

#[cfg(test)]
#[path = "../../tests/resolve/t_resolve.rs"]
mod tests;
