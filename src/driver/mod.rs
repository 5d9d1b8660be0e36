pub mod generate;

pub use generate::{DiagnosticsFormat, DriverError, DriverOptions, DriverOutput, run};
