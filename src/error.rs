//! Error types for nccm
//!
//! This module defines the error types used throughout nccm, following
//! a hierarchical structure with specific error variants for each layer:
//! configuration, the host project, the owned rule section, the matrix
//! and the rule file itself.

use std::path::PathBuf;

/// Configuration-related errors (nccm.toml)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Errors raised while talking to the host design project
///
/// Every variant is fatal for a session: the matrix is never built from a
/// guessed class list.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No usable project at the given location
    #[error("No design project available at {}: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// Project file exists but is not valid JSON
    #[error("Project file {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// I/O error while reading the project
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Malformed sentinel markers around the owned rule section
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// A start marker appeared inside an open section
    #[error("line {line}: section start marker found inside an open section")]
    NestedStart { line: usize },

    /// An end marker appeared with no open section
    #[error("line {line}: section end marker found without a matching start marker")]
    UnmatchedEnd { line: usize },

    /// The file ended while a section was still open
    #[error("section opened on line {start_line} is never closed")]
    Unterminated { start_line: usize },
}

/// Matrix construction and editing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// The host supplied no net classes
    #[error("the project defines no net classes")]
    NoClasses,

    /// A net class has an empty name
    #[error("net class #{index} has an empty name")]
    EmptyClassName { index: usize },

    /// Two net classes share a name
    #[error("net class '{0}' appears more than once")]
    DuplicateClass(String),

    /// Position outside the N×N grid
    #[error("cell ({row}, {col}) is outside the {size}x{size} matrix")]
    OutOfRange { row: usize, col: usize, size: usize },

    /// Position in the mirrored triangle
    #[error("cell ({row}, {col}) mirrors another cell and cannot be edited")]
    NotEditable { row: usize, col: usize },

    /// Net class name not known to the project
    #[error("unknown net class '{0}'")]
    UnknownClass(String),
}

/// Rule file (.kicad_dru) errors
#[derive(Debug, thiserror::Error)]
pub enum RuleFileError {
    /// I/O error on the rule file
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Owned section markers are malformed
    #[error("{}: {source}", path.display())]
    Section {
        path: PathBuf,
        #[source]
        source: SectionError,
    },
}

/// Top-level error type for nccm
#[derive(Debug, thiserror::Error)]
pub enum NccmError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host project error
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Matrix error
    #[error("Matrix error: {0}")]
    Matrix(#[from] MatrixError),

    /// Rule file error
    #[error("Rule file error: {0}")]
    RuleFile(#[from] RuleFileError),
}

impl NccmError {
    /// Whether the error means the host project cannot be used at all
    pub fn is_host_unavailable(&self) -> bool {
        matches!(self, NccmError::Host(_))
    }
}
