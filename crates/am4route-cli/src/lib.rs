//! am4route CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling for the
//! `am4route-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
