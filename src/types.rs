#![forbid(unsafe_code)]

//! Core domain types for nccm
//!
//! This module defines the small value types shared by the matrix, the
//! rule section codec and the configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule severity written into each generated rule statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Ignore,
}

impl Severity {
    /// Token used in the `(severity ...)` clause
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of the matrix holds the editable cells
///
/// Both halves include the diagonal, so every unordered class pair
/// (self-pairs included) has exactly one editable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Triangle {
    /// Cells with `row <= col`
    #[default]
    Upper,
    /// Cells with `col <= row`
    Lower,
}

impl Triangle {
    /// Whether `(row, col)` lies in this triangle
    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self {
            Triangle::Upper => row <= col,
            Triangle::Lower => col <= row,
        }
    }
}

/// A cell of the class matrix
///
/// Ordering is row-major, which is also the order rules are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The cell on the other side of the diagonal
    pub fn mirrored(&self) -> Self {
        Position {
            row: self.col,
            col: self.row,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}
