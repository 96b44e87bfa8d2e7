//! Remove command implementation
//!
//! Drops the owned section from the rule file, leaving every other line in
//! place. A missing rule file is not an error: there is nothing to remove
//! and no file is created.

use crate::cli::common::{self, EXIT_SUCCESS, GlobalOptions};
use crate::error::NccmError;
use crate::rule_file::RemoveOutcome;

/// Run the remove command
pub fn run_remove(options: &GlobalOptions) -> i32 {
    match run_remove_inner(options) {
        Ok(outcome) => {
            match outcome {
                RemoveOutcome::Removed => {
                    eprintln!("Removed NCCM entry from the custom rules file.")
                }
                RemoveOutcome::NoSection => {
                    eprintln!("No NCCM entry found in the custom rules file.")
                }
                RemoveOutcome::NothingToRemove => {
                    eprintln!("No custom rules file detected; nothing to remove.")
                }
            }
            EXIT_SUCCESS
        }
        Err(e) => common::fail(&e),
    }
}

fn run_remove_inner(options: &GlobalOptions) -> Result<RemoveOutcome, NccmError> {
    let (mut session, _) = common::open_session(options)?;
    session.remove()
}
