//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod rules;
