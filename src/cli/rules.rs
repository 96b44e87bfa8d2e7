//! Rules command implementation
//!
//! Prints the owned section exactly as it would be written for the matrix
//! currently stored in the rule file.

use crate::cli::common::{self, EXIT_SUCCESS, GlobalOptions};
use crate::error::NccmError;
use crate::section;

/// Run the rules command
pub fn run_rules(options: &GlobalOptions) -> i32 {
    match run_rules_inner(options) {
        Ok(text) => {
            print!("{}", text);
            EXIT_SUCCESS
        }
        Err(e) => common::fail(&e),
    }
}

fn run_rules_inner(options: &GlobalOptions) -> Result<String, NccmError> {
    let (session, outcome) = common::open_session(options)?;
    common::report_load(&outcome);

    let matrix = session.matrix();
    let statements = section::render(
        matrix.values(),
        |index| matrix.class_name(index).unwrap_or_default(),
        session.rule_file().severity(),
    );

    if statements.is_empty() {
        eprintln!("No clearances set.");
        return Ok(String::new());
    }

    Ok(section::render_section(&statements))
}
