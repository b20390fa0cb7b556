//! CLI command implementations.

pub mod compile;
pub mod demo;
pub mod run;
pub mod version;
