#![forbid(unsafe_code)]

//! The net class clearance matrix
//!
//! An N×N grid indexed by net class on both axes. Clearance is symmetric,
//! so only one diagonal-inclusive triangle is editable; the mirrored cells
//! always show [`NOT_APPLICABLE`]. Every edit revalidates the whole grid so
//! a cleared cell can never leave a stale value behind.

use crate::clearance::ClearanceValue;
use crate::error::MatrixError;
use crate::types::{Position, Triangle};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Display text of cells in the mirrored triangle
pub const NOT_APPLICABLE: &str = "-";

/// Result of a full-matrix validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Rendered text for every one of the N² cells
    pub display: BTreeMap<Position, String>,
    /// Non-zero clearances, keyed by valid position
    pub values: BTreeMap<Position, ClearanceValue>,
}

/// Triangular matrix of clearances between net classes
#[derive(Debug, Clone)]
pub struct ClassMatrix {
    classes: Vec<String>,
    triangle: Triangle,
    valid: BTreeSet<Position>,
    invalid: BTreeSet<Position>,
    state: Validation,
}

impl ClassMatrix {
    /// Builds an empty matrix for the host's ordered class list
    ///
    /// # Errors
    ///
    /// Returns `MatrixError` if the list is empty, contains an empty name,
    /// or names a class twice.
    pub fn new(classes: Vec<String>, triangle: Triangle) -> Result<Self, MatrixError> {
        if classes.is_empty() {
            return Err(MatrixError::NoClasses);
        }

        let mut seen = HashSet::new();
        for (index, name) in classes.iter().enumerate() {
            if name.is_empty() {
                return Err(MatrixError::EmptyClassName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(MatrixError::DuplicateClass(name.clone()));
            }
        }

        let size = classes.len();
        let mut valid = BTreeSet::new();
        let mut invalid = BTreeSet::new();
        for row in 0..size {
            for col in 0..size {
                let pos = Position::new(row, col);
                if triangle.contains(row, col) {
                    valid.insert(pos);
                } else {
                    invalid.insert(pos);
                }
            }
        }

        let mut matrix = ClassMatrix {
            classes,
            triangle,
            valid,
            invalid,
            state: Validation::default(),
        };
        matrix.revalidate();
        Ok(matrix)
    }

    /// Number of net classes (N)
    pub fn size(&self) -> usize {
        self.classes.len()
    }

    pub fn triangle(&self) -> Triangle {
        self.triangle
    }

    /// Net class names in host order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_name(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    pub fn class_index(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == name)
    }

    /// Editable positions, row-major
    pub fn valid_positions(&self) -> &BTreeSet<Position> {
        &self.valid
    }

    /// Mirrored, never-editable positions, row-major
    pub fn invalid_positions(&self) -> &BTreeSet<Position> {
        &self.invalid
    }

    pub fn is_valid(&self, pos: Position) -> bool {
        self.valid.contains(&pos)
    }

    /// The editable cell for an unordered pair of class names
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::UnknownClass` if either name is not a class of
    /// this matrix.
    pub fn position_for_pair(&self, a: &str, b: &str) -> Result<Position, MatrixError> {
        let row = self
            .class_index(a)
            .ok_or_else(|| MatrixError::UnknownClass(a.to_string()))?;
        let col = self
            .class_index(b)
            .ok_or_else(|| MatrixError::UnknownClass(b.to_string()))?;

        let pos = Position::new(row, col);
        if self.triangle.contains(row, col) {
            Ok(pos)
        } else {
            Ok(pos.mirrored())
        }
    }

    /// Class names of a cell: row class, then column class
    pub fn class_pair(&self, pos: Position) -> Option<(&str, &str)> {
        Some((self.class_name(pos.row)?, self.class_name(pos.col)?))
    }

    /// Current text of a cell
    pub fn display(&self, pos: Position) -> &str {
        self.state.display.get(&pos).map_or("", String::as_str)
    }

    /// Non-zero clearances from the last validation
    pub fn values(&self) -> &BTreeMap<Position, ClearanceValue> {
        &self.state.values
    }

    /// Display text and values from the last validation
    pub fn state(&self) -> &Validation {
        &self.state
    }

    /// Validates every cell using `read_cell` as the source of raw text
    ///
    /// Invalid cells render as [`NOT_APPLICABLE`]. Valid cells render as
    /// `"<value> mm"` when their text starts with a number and as an empty
    /// string otherwise. Zero clearances render but are left out of
    /// `values`.
    pub fn validate_all<F, S>(&self, mut read_cell: F) -> Validation
    where
        F: FnMut(Position) -> S,
        S: AsRef<str>,
    {
        let mut validation = Validation::default();

        for &pos in &self.invalid {
            validation
                .display
                .insert(pos, NOT_APPLICABLE.to_string());
        }

        for &pos in &self.valid {
            let raw = read_cell(pos);
            match ClearanceValue::parse_leading(raw.as_ref()) {
                Some(value) => {
                    validation.display.insert(pos, value.to_cell_text());
                    if !value.is_zero() {
                        validation.values.insert(pos, value);
                    }
                }
                None => {
                    validation.display.insert(pos, String::new());
                }
            }
        }

        validation
    }

    /// Revalidates the whole matrix against its own cell text
    pub fn revalidate(&mut self) -> &Validation {
        let state = self.validate_all(|pos| self.display(pos).to_string());
        self.state = state;
        &self.state
    }

    /// Replaces the raw text of one editable cell without revalidating
    ///
    /// Only bulk loads use this, followed by one [`Self::revalidate`].
    ///
    /// # Errors
    ///
    /// Returns `MatrixError::OutOfRange` or `MatrixError::NotEditable` for a
    /// cell outside the grid or in the mirrored triangle.
    pub(crate) fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), MatrixError> {
        self.check_editable(pos)?;
        self.state.display.insert(pos, text.to_string());
        Ok(())
    }

    /// Commits an edit and revalidates the whole matrix
    ///
    /// This is the single entry point a presentation layer calls when the
    /// user finishes editing a cell.
    pub fn commit_cell(&mut self, pos: Position, text: &str) -> Result<&Validation, MatrixError> {
        self.set_cell(pos, text)?;
        Ok(self.revalidate())
    }

    /// Empties every editable cell and drops all values
    pub fn clear(&mut self) {
        for &pos in &self.valid {
            self.state.display.insert(pos, String::new());
        }
        self.state.values.clear();
    }

    fn check_editable(&self, pos: Position) -> Result<(), MatrixError> {
        let size = self.size();
        if pos.row >= size || pos.col >= size {
            return Err(MatrixError::OutOfRange {
                row: pos.row,
                col: pos.col,
                size,
            });
        }
        if !self.is_valid(pos) {
            return Err(MatrixError::NotEditable {
                row: pos.row,
                col: pos.col,
            });
        }
        Ok(())
    }
}
