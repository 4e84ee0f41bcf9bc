//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

/// Size-tracker log auditor - replay a size-tracker log and report
/// inconsistencies in its running totals
#[derive(Parser, Debug)]
#[command(name = "sizeaudit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log file to audit
    #[arg(value_name = "LOG_FILE", env = "SIZEAUDIT_LOG")]
    pub log_file: Option<PathBuf>,

    /// Enable diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print discrepancies and the final summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Usage text printed when no log file is given.
pub fn usage() -> String {
    format!(
        "{}\nExample: sizeaudit combined.log",
        Cli::command().render_usage()
    )
}
