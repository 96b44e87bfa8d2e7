//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for nccm commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable grid
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// nccm CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "nccm")]
#[command(about = "Net class clearance matrix for KiCad custom design rules")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// KiCad project file (.kicad_pro) or the directory holding it
    #[arg(short, long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file (defaults to nccm.toml next to the project)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available nccm subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the clearance matrix
    Show {
        /// Output format (defaults to the configured format)
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List the project's net classes in matrix order
    Classes,

    /// Set the clearance between two net classes and update the rule file
    Set {
        /// First net class
        class_a: String,

        /// Second net class (may equal the first)
        class_b: String,

        /// Clearance in millimeters, e.g. 0.2 or "0,2 mm"
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Print the resulting rule file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Clear the clearance between two net classes and update the rule file
    Unset {
        /// First net class
        class_a: String,

        /// Second net class
        class_b: String,

        /// Print the resulting rule file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the rule statements generated from the current matrix
    Rules,

    /// Rewrite the owned section from its current contents
    Sync {
        /// Print the resulting rule file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove the owned section from the rule file
    Remove,
}
