//! Sync command implementation
//!
//! Loads the owned section against the project's current class list and
//! writes it back. Values are normalized on the way and rules for classes
//! the project no longer has are dropped.

use crate::cli::common::{self, EXIT_SUCCESS, GlobalOptions};
use crate::error::NccmError;
use crate::rule_file::LoadOutcome;

/// Run the sync command
pub fn run_sync(options: &GlobalOptions, dry_run: bool) -> i32 {
    match run_sync_inner(options, dry_run) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => common::fail(&e),
    }
}

fn run_sync_inner(options: &GlobalOptions, dry_run: bool) -> Result<(), NccmError> {
    let (session, outcome) = common::open_session(options)?;
    common::report_load(&outcome);

    if !dry_run {
        match outcome {
            LoadOutcome::NoRuleFile => {
                eprintln!("No custom rules file detected; nothing to sync.");
                return Ok(());
            }
            LoadOutcome::NoSection => {
                eprintln!("No NCCM entry found in the custom rules file; nothing to sync.");
                return Ok(());
            }
            LoadOutcome::Loaded { .. } => {}
        }
    }

    if dry_run {
        print!("{}", session.preview()?);
        return Ok(());
    }

    session.save()?;
    eprintln!(
        "Synced {} clearance rule(s) in {}.",
        session.matrix().values().len(),
        session.rule_file().path().display()
    );

    Ok(())
}
