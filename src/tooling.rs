//! Tooling & Integration Layer
//!
//! Command-line access to the loader, for checking a deployment's declared
//! configuration without starting the front end.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
