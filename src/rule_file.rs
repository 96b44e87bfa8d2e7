#![forbid(unsafe_code)]

//! Reading and rewriting the custom rules file
//!
//! Everything outside the owned section is kept verbatim and in order.
//! Each write or remove builds the complete new file content in memory
//! before the file is opened, then replaces the whole file.

use crate::clearance::ClearanceValue;
use crate::error::{RuleFileError, SectionError};
use crate::matrix::ClassMatrix;
use crate::section::{self, ClassPair, HEADER};
use crate::types::{Position, Severity};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What `load` found in the rule file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file does not exist yet
    NoRuleFile,
    /// The file has no owned section, or an empty one
    NoSection,
    /// Rules were read into the matrix
    Loaded {
        /// Distinct cells that received a non-zero clearance
        applied: usize,
        /// Class pairs naming a class the project no longer has
        dropped: Vec<ClassPair>,
    },
}

/// What `write` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// A new rule file was created
    Created,
    /// An existing rule file was rewritten
    Updated,
}

/// What `remove` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The owned section was removed from the file
    Removed,
    /// The file exists but has no owned section
    NoSection,
    /// There is no rule file, nothing was created
    NothingToRemove,
}

/// A custom rules file holding an owned section
#[derive(Debug, Clone)]
pub struct RuleFile {
    path: PathBuf,
    severity: Severity,
}

impl RuleFile {
    pub fn new(path: impl Into<PathBuf>, severity: Severity) -> Self {
        RuleFile {
            path: path.into(),
            severity,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Repopulates `matrix` from the owned section
    ///
    /// A missing file or an empty section leaves the matrix untouched. Rules
    /// naming a class the matrix does not have are skipped.
    ///
    /// # Errors
    ///
    /// Returns `RuleFileError` if the file cannot be read or its section
    /// markers are malformed.
    pub fn load(&self, matrix: &mut ClassMatrix) -> Result<LoadOutcome, RuleFileError> {
        let Some(content) = self.read()? else {
            log::debug!("{} does not exist", self.path.display());
            return Ok(LoadOutcome::NoRuleFile);
        };

        let lines = section::split_lines(&content);
        let section_lines = section::extract(&lines).map_err(|e| self.section_error(e))?;
        if section_lines.is_empty() {
            return Ok(LoadOutcome::NoSection);
        }

        // Resolve in file order so a later rule for the same cell wins,
        // whichever way round it names the classes.
        let mut cells: BTreeMap<Position, Option<ClearanceValue>> = BTreeMap::new();
        let mut dropped = Vec::new();
        for ((a, b), text) in section::parse_section(&section_lines) {
            match matrix.position_for_pair(&a, &b) {
                Ok(pos) => {
                    cells.insert(pos, ClearanceValue::parse_leading(&text));
                }
                Err(e) => {
                    log::debug!("skipping rule {} to {}: {}", a, b, e);
                    dropped.push((a, b));
                }
            }
        }

        let mut applied = 0;
        for (pos, value) in cells {
            let cell_text = value.map(|v| v.to_cell_text()).unwrap_or_default();
            if let Err(e) = matrix.set_cell(pos, &cell_text) {
                log::debug!("skipping cell {}: {}", pos, e);
                continue;
            }
            if value.is_some_and(|v| !v.is_zero()) {
                applied += 1;
            }
        }

        matrix.revalidate();
        log::info!(
            "loaded {} rules from {} ({} skipped)",
            applied,
            self.path.display(),
            dropped.len()
        );

        Ok(LoadOutcome::Loaded { applied, dropped })
    }

    /// Writes the matrix values into the owned section
    ///
    /// Creates the file with a version header if it does not exist. When the
    /// matrix holds no values the section is left out entirely.
    ///
    /// # Errors
    ///
    /// Returns `RuleFileError` on I/O failure or malformed section markers;
    /// the file is not modified in that case.
    pub fn write(&self, matrix: &ClassMatrix) -> Result<WriteOutcome, RuleFileError> {
        let existing = self.read()?;
        let outcome = if existing.is_some() {
            WriteOutcome::Updated
        } else {
            WriteOutcome::Created
        };

        let content = self.render_content(existing.as_deref(), matrix)?;
        self.replace(&content)?;
        log::info!(
            "wrote {} rules to {}",
            matrix.values().len(),
            self.path.display()
        );

        Ok(outcome)
    }

    /// The content `write` would produce, without touching the file
    pub fn preview(&self, matrix: &ClassMatrix) -> Result<String, RuleFileError> {
        let existing = self.read()?;
        self.render_content(existing.as_deref(), matrix)
    }

    /// Removes the owned section and clears the matrix
    ///
    /// A missing file is reported as [`RemoveOutcome::NothingToRemove`] and
    /// neither the disk nor the matrix is touched.
    pub fn remove(&self, matrix: &mut ClassMatrix) -> Result<RemoveOutcome, RuleFileError> {
        let Some(content) = self.read()? else {
            return Ok(RemoveOutcome::NothingToRemove);
        };

        let lines = section::split_lines(&content);
        let kept = section::excise(&lines).map_err(|e| self.section_error(e))?;
        let had_section = kept.len() < lines.len();

        matrix.clear();

        if !had_section {
            return Ok(RemoveOutcome::NoSection);
        }

        self.replace(&kept.concat())?;
        log::info!("removed owned section from {}", self.path.display());
        Ok(RemoveOutcome::Removed)
    }

    fn render_content(
        &self,
        existing: Option<&str>,
        matrix: &ClassMatrix,
    ) -> Result<String, RuleFileError> {
        let mut content = String::new();

        match existing {
            None => {
                content.push_str(HEADER);
                content.push('\n');
            }
            Some(existing) => {
                let lines = section::split_lines(existing);
                let kept = section::excise(&lines).map_err(|e| self.section_error(e))?;
                if !kept.iter().any(|line| line.contains(HEADER)) {
                    content.push_str(HEADER);
                    content.push('\n');
                }

                for line in kept {
                    content.push_str(line);
                }
                if !content.ends_with('\n') {
                    content.push('\n');
                }
            }
        }

        let statements = section::render(
            matrix.values(),
            |index| matrix.class_name(index).unwrap_or_default(),
            self.severity,
        );
        if !statements.is_empty() {
            content.push_str(&section::render_section(&statements));
        }

        Ok(content)
    }

    fn read(&self) -> Result<Option<String>, RuleFileError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(RuleFileError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn replace(&self, content: &str) -> Result<(), RuleFileError> {
        fs::write(&self.path, content).map_err(|source| RuleFileError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn section_error(&self, source: SectionError) -> RuleFileError {
        RuleFileError::Section {
            path: self.path.clone(),
            source,
        }
    }
}
