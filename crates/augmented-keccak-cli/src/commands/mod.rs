//! Subcommand implementations.

pub mod hash;
pub mod preimage;
