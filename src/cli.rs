//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod edit;
pub mod remove;
pub mod rules;
pub mod show;
pub mod sync;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use common::GlobalOptions;
