#![forbid(unsafe_code)]

//! Per-session context
//!
//! A [`Session`] is built once from a [`Host`] and owns everything the
//! presentation layer works with: the matrix, sized to the host's class
//! list and filled from the rule file, and the rule file itself.

use crate::config::Config;
use crate::error::{HostError, NccmError};
use crate::host::Host;
use crate::matrix::{ClassMatrix, Validation};
use crate::rule_file::{LoadOutcome, RemoveOutcome, RuleFile, WriteOutcome};
use crate::types::Position;

/// An editing session on one project's clearance matrix
#[derive(Debug, Clone)]
pub struct Session {
    matrix: ClassMatrix,
    rule_file: RuleFile,
    config: Config,
}

impl Session {
    /// Opens a session and loads any existing rules
    ///
    /// # Errors
    ///
    /// Returns `NccmError::Host` if the host cannot supply a usable class
    /// list or rule file location, and `NccmError::RuleFile` if the rule
    /// file exists but cannot be read.
    pub fn open(host: &dyn Host, config: Config) -> Result<(Session, LoadOutcome), NccmError> {
        let classes = host.net_class_names()?;
        let rule_path = host.rule_file_path()?;

        let mut matrix = ClassMatrix::new(classes, config.matrix.triangle).map_err(|e| {
            HostError::Unavailable {
                path: rule_path.clone(),
                reason: e.to_string(),
            }
        })?;

        let rule_file = RuleFile::new(rule_path, config.rules.severity);
        let outcome = rule_file.load(&mut matrix)?;

        Ok((
            Session {
                matrix,
                rule_file,
                config,
            },
            outcome,
        ))
    }

    pub fn matrix(&self) -> &ClassMatrix {
        &self.matrix
    }

    pub fn rule_file(&self) -> &RuleFile {
        &self.rule_file
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Commits the text of one cell and returns the revalidated matrix
    pub fn commit_cell(
        &mut self,
        row: usize,
        col: usize,
        text: &str,
    ) -> Result<&Validation, NccmError> {
        Ok(self.matrix.commit_cell(Position::new(row, col), text)?)
    }

    /// Commits a clearance for a pair of classes given by name, in any order
    pub fn commit_pair(&mut self, a: &str, b: &str, text: &str) -> Result<&Validation, NccmError> {
        let pos = self.matrix.position_for_pair(a, b)?;
        Ok(self.matrix.commit_cell(pos, text)?)
    }

    /// Writes the current values to the rule file
    pub fn save(&self) -> Result<WriteOutcome, NccmError> {
        Ok(self.rule_file.write(&self.matrix)?)
    }

    /// The rule file content `save` would write
    pub fn preview(&self) -> Result<String, NccmError> {
        Ok(self.rule_file.preview(&self.matrix)?)
    }

    /// Removes the owned section from the rule file and clears the matrix
    pub fn remove(&mut self) -> Result<RemoveOutcome, NccmError> {
        Ok(self.rule_file.remove(&mut self.matrix)?)
    }
}
