pub mod core;
pub mod driver;
