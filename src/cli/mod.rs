//! Command-line surface: argument parsing and command handlers.

mod clap_parser;
mod commands;

pub use clap_parser::Cli;
pub use commands::run;
