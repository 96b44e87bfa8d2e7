//! Set and unset command implementation
//!
//! Both commands commit one cell of the matrix by class names, revalidate
//! the whole matrix, and write the rule file (or print it with
//! `--dry-run`).

use crate::cli::common::{self, EXIT_SUCCESS, GlobalOptions};
use crate::clearance::ClearanceValue;
use crate::error::NccmError;
use crate::rule_file::WriteOutcome;

/// Run the set command
pub fn run_set(
    options: &GlobalOptions,
    class_a: &str,
    class_b: &str,
    value: &str,
    dry_run: bool,
) -> i32 {
    if ClearanceValue::parse_leading(value).is_none() {
        eprintln!(
            "Warning: '{}' does not start with a number; the clearance will be cleared",
            value
        );
    }
    run_edit(options, class_a, class_b, value, dry_run)
}

/// Run the unset command
pub fn run_unset(options: &GlobalOptions, class_a: &str, class_b: &str, dry_run: bool) -> i32 {
    run_edit(options, class_a, class_b, "", dry_run)
}

fn run_edit(
    options: &GlobalOptions,
    class_a: &str,
    class_b: &str,
    text: &str,
    dry_run: bool,
) -> i32 {
    match run_edit_inner(options, class_a, class_b, text, dry_run) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => common::fail(&e),
    }
}

fn run_edit_inner(
    options: &GlobalOptions,
    class_a: &str,
    class_b: &str,
    text: &str,
    dry_run: bool,
) -> Result<(), NccmError> {
    let (mut session, outcome) = common::open_session(options)?;
    common::report_load(&outcome);

    let pos = session.matrix().position_for_pair(class_a, class_b)?;
    let state = session.commit_pair(class_a, class_b, text)?;
    let shown = state.display.get(&pos).map(String::as_str).unwrap_or_default();

    if shown.is_empty() {
        eprintln!("{} to {}: cleared", class_a, class_b);
    } else if state.values.contains_key(&pos) {
        eprintln!("{} to {}: {}", class_a, class_b, shown);
    } else {
        eprintln!("{} to {}: {} (zero, no rule written)", class_a, class_b, shown);
    }

    if dry_run {
        print!("{}", session.preview()?);
        return Ok(());
    }

    match session.save()? {
        WriteOutcome::Created => eprintln!(
            "No custom rules file (.kicad_dru) was found, therefore one was created: {}",
            session.rule_file().path().display()
        ),
        WriteOutcome::Updated => eprintln!("Updated custom rules."),
    }

    Ok(())
}
