//! Subcommand implementations

pub mod evaluate;
pub mod generate;
pub mod solve;
