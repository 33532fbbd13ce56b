//! CLI command implementations

pub mod price;
