//! Show and classes command implementation
//!
//! `nccm show` prints the clearance matrix as loaded from the rule file,
//! either as a grid or as JSON Lines. `nccm classes` lists the project's
//! net classes in matrix order.

use crate::cli::args::OutputFormat;
use crate::cli::common::{self, EXIT_ERROR, EXIT_SUCCESS, GlobalOptions};
use crate::config;
use crate::error::NccmError;
use crate::host::{Host, KicadProject};
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::rule_file::LoadOutcome;
use termcolor::StandardStream;

/// Error type specific to show command
#[derive(Debug, thiserror::Error)]
enum ShowError {
    #[error(transparent)]
    Nccm(#[from] NccmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the show command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Error (malformed rule file, I/O error)
/// - 3: No usable project
pub fn run_show(options: &GlobalOptions, format: Option<OutputFormat>) -> i32 {
    match run_show_inner(options, format) {
        Ok(()) => EXIT_SUCCESS,
        Err(ShowError::Nccm(e)) => common::fail(&e),
        Err(ShowError::Io(e)) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_show_inner(options: &GlobalOptions, format: Option<OutputFormat>) -> Result<(), ShowError> {
    let (session, outcome) = common::open_session(options)?;
    common::report_load(&outcome);

    let format = format.unwrap_or(match session.config().output.format {
        config::OutputFormat::Human => OutputFormat::Human,
        config::OutputFormat::Jsonl => OutputFormat::Jsonl,
    });

    match format {
        OutputFormat::Human => {
            let color = common::color_choice(options.color, session.config().output.color);
            let mut stdout = StandardStream::stdout(color);
            HumanFormatter::new().write(session.matrix(), &mut stdout)?;

            match outcome {
                LoadOutcome::NoRuleFile => eprintln!(
                    "\nNo custom rules file yet ({}).",
                    session.rule_file().path().display()
                ),
                LoadOutcome::NoSection => eprintln!(
                    "\nNo clearance matrix rules in {}.",
                    session.rule_file().path().display()
                ),
                LoadOutcome::Loaded { .. } => eprintln!(
                    "\n{} clearance rule(s) in {}.",
                    session.matrix().values().len(),
                    session.rule_file().path().display()
                ),
            }
        }
        OutputFormat::Jsonl => {
            print!(
                "{}",
                JsonlFormatter::new().format(session.matrix(), session.rule_file().path())
            );
        }
    }

    Ok(())
}

/// Run the classes command
pub fn run_classes(options: &GlobalOptions) -> i32 {
    match run_classes_inner(options) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => common::fail(&e),
    }
}

fn run_classes_inner(options: &GlobalOptions) -> Result<(), NccmError> {
    let project = KicadProject::open(&options.project)?;
    for (index, name) in project.net_class_names()?.iter().enumerate() {
        println!("{:>3}  {}", index, name);
    }
    Ok(())
}
