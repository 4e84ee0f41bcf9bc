//! Size-tracker log auditor CLI
//!
//! Replays one size-tracker log and reports every inconsistency found in its
//! running totals. Exit code is 0 whenever the log was read to the end, even
//! if discrepancies were found; 1 for usage and I/O errors.

mod audit;
mod cli;
mod error;
mod render;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::Cli;
use error::{CliError, Result};

fn main() {
    match run() {
        Ok(()) => {}
        Err(CliError::Usage { usage }) => {
            println!("{}", usage);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return Err(CliError::usage(e.render().to_string().trim_end())),
    };

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Diagnostics go to stderr so they never interleave with the report
    if cli.verbose > 0 {
        let level = if cli.verbose > 1 {
            Level::TRACE
        } else {
            Level::DEBUG
        };
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let Some(path) = cli.log_file else {
        return Err(CliError::usage(cli::usage()));
    };
    audit::run_audit(&path, cli.quiet)
}
