//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for opening the project,
//! loading configuration, reporting load results and mapping errors to
//! exit codes.

use crate::cli::args::{Cli, ColorChoice};
use crate::config::{ColorOption, Config};
use crate::error::NccmError;
use crate::host::{Host, KicadProject};
use crate::rule_file::LoadOutcome;
use crate::session::Session;
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_HOST_UNAVAILABLE: i32 = 3;

/// Options every command receives from the global flags
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub project: PathBuf,
    pub config: Option<PathBuf>,
    pub color: ColorChoice,
}

impl From<&Cli> for GlobalOptions {
    fn from(cli: &Cli) -> Self {
        GlobalOptions {
            project: cli.project.clone(),
            config: cli.config.clone(),
            color: cli.color,
        }
    }
}

/// Initializes env_logger
///
/// The default level is `warn`; each `-v` raises it one step. `RUST_LOG`
/// takes precedence when set.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

/// Load the configuration for a project
///
/// An explicit path must exist; otherwise nccm.toml next to the project is
/// used when present.
pub(crate) fn load_config(host: &dyn Host, explicit: Option<&Path>) -> Result<Config, NccmError> {
    let config = match explicit {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(host.project_dir()?)?,
    };
    Ok(config)
}

/// Open the KiCad project and start a session on it
///
/// # Errors
///
/// Returns `NccmError::Host` if no usable project is found, so the caller
/// can stop before touching any file.
pub(crate) fn open_session(options: &GlobalOptions) -> Result<(Session, LoadOutcome), NccmError> {
    let project = KicadProject::open(&options.project)?;
    let config = load_config(&project, options.config.as_deref())?;
    Session::open(&project, config)
}

/// Tell the user about rules that could not be loaded
pub(crate) fn report_load(outcome: &LoadOutcome) {
    if let LoadOutcome::Loaded { dropped, .. } = outcome
        && !dropped.is_empty()
    {
        eprintln!(
            "Warning: {} existing rule(s) name net classes the project no longer has:",
            dropped.len()
        );
        for (a, b) in dropped {
            eprintln!("  {} to {}", a, b);
        }
    }
}

/// Report an error and pick the exit code for it
pub(crate) fn fail(error: &NccmError) -> i32 {
    eprintln!("Error: {}", error);
    if error.is_host_unavailable() {
        eprintln!("Open a KiCad project (.kicad_pro) with net classes and try again.");
        EXIT_HOST_UNAVAILABLE
    } else {
        EXIT_ERROR
    }
}

/// Resolve the color setting: an explicit flag wins over the config file
pub(crate) fn color_choice(flag: ColorChoice, config: ColorOption) -> termcolor::ColorChoice {
    let resolved = match flag {
        ColorChoice::Auto => config,
        ColorChoice::Always => ColorOption::Always,
        ColorChoice::Never => ColorOption::Never,
    };
    match resolved {
        ColorOption::Auto => {
            if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
                termcolor::ColorChoice::Auto
            } else {
                termcolor::ColorChoice::Never
            }
        }
        ColorOption::Always => termcolor::ColorChoice::Always,
        ColorOption::Never => termcolor::ColorChoice::Never,
    }
}
