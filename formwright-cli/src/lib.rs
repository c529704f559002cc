//! Formwright CLI library: argument definitions, command handlers and
//! terminal output helpers used by the `formwright` binary.

pub mod cli;
pub mod commands;
pub mod table;

pub use cli::{Cli, Commands};
