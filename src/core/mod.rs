//! Default-argument analysis and generation pipeline.

pub mod api;
pub mod codegen;
pub mod diag;
pub mod diagnostics;
pub mod facts;
pub mod literal;
pub mod model;
pub mod names;
pub mod options;
pub mod reference;
pub mod resolve;
pub mod types;
pub mod validate;
