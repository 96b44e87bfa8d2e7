#![forbid(unsafe_code)]

//! nccm: Net Class Clearance Matrix
//!
//! Keeps a matrix of minimum clearances between pairs of net classes and
//! stores it as rule statements in a marked-off section of a KiCad custom
//! rules file (`.kicad_dru`), leaving the rest of that file alone.

pub mod clearance;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod matrix;
pub mod output;
pub mod rule_file;
pub mod section;
pub mod session;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, HostError, MatrixError, NccmError, RuleFileError, SectionError};

// Re-export core domain types for convenient access
pub use clearance::ClearanceValue;
pub use host::{Host, KicadProject};
pub use matrix::{ClassMatrix, Validation};
pub use rule_file::{LoadOutcome, RemoveOutcome, RuleFile, WriteOutcome};
pub use session::Session;
pub use types::{Position, Severity, Triangle};
