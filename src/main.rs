//! nccm CLI entry point

use clap::Parser;
use nccm::cli::{Command, GlobalOptions, args::Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    nccm::cli::common::init_logging(cli.verbose);
    let options = GlobalOptions::from(&cli);

    let exit_code = match cli.command {
        Command::Show { format } => nccm::cli::show::run_show(&options, format),
        Command::Classes => nccm::cli::show::run_classes(&options),
        Command::Set {
            class_a,
            class_b,
            value,
            dry_run,
        } => nccm::cli::edit::run_set(&options, &class_a, &class_b, &value, dry_run),
        Command::Unset {
            class_a,
            class_b,
            dry_run,
        } => nccm::cli::edit::run_unset(&options, &class_a, &class_b, dry_run),
        Command::Rules => nccm::cli::rules::run_rules(&options),
        Command::Sync { dry_run } => nccm::cli::sync::run_sync(&options, dry_run),
        Command::Remove => nccm::cli::remove::run_remove(&options),
    };

    process::exit(exit_code);
}
