//! Text report rendering

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use sizeaudit_core::{Discrepancy, Step, StepStyle, Summary, format_grouped};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Header printed before the first line is read
pub fn write_header(out: &mut impl Write, path: &Path) -> io::Result<()> {
    writeln!(out, "{} {}", "Analyzing log file:".bold(), path.display())?;
    writeln!(out, "{}", rule())?;
    writeln!(out)
}

/// Render one audit step.
///
/// In quiet mode only the step's discrepancies are written.
pub fn write_step(out: &mut impl Write, step: &Step, quiet: bool) -> io::Result<()> {
    if quiet {
        for discrepancy in &step.discrepancies {
            write_discrepancy(out, discrepancy)?;
        }
        return Ok(());
    }

    let prefix = format!("[{}] [{}]", step.line_number, step.timestamp);
    match step.style {
        StepStyle::Trace => {
            writeln!(out, "{} {}", prefix.dimmed(), step.headline)?;
            for discrepancy in &step.discrepancies {
                write_discrepancy(out, discrepancy)?;
            }
        }
        StepStyle::Banner => {
            writeln!(out)?;
            writeln!(out, "{}", rule())?;
            writeln!(out, "{} {}", prefix.dimmed(), step.headline.cyan().bold())?;
            for discrepancy in &step.discrepancies {
                write_discrepancy(out, discrepancy)?;
            }
            writeln!(out, "{}", rule())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_discrepancy(out: &mut impl Write, discrepancy: &Discrepancy) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}",
        "!".yellow().bold(),
        discrepancy.to_string().yellow()
    )
}

/// Final summary block
pub fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", "ANALYSIS SUMMARY".bold())?;
    writeln!(out, "{}", rule())?;
    writeln!(out, "Total lines processed: {}", summary.lines_processed)?;
    writeln!(out, "Total files tracked: {}", summary.files_tracked)?;
    writeln!(
        out,
        "Pending delta (since last sync): {:+}",
        summary.pending_delta
    )?;

    let counts = &summary.counts;
    writeln!(
        out,
        "Operations: {} add, {} copy, {} delete, {} rename, {} sync, {} epoch change",
        counts.adds,
        counts.copies,
        counts.deletes,
        counts.renames,
        counts.syncs,
        counts.epoch_changes
    )?;
    writeln!(
        out,
        "Ignored lines: {} unrecognized, {} without timestamp",
        counts.unrecognized, counts.untimestamped
    )?;
    writeln!(out)?;

    if summary.discrepancies.is_empty() {
        writeln!(out, "{}", "No discrepancies found!".green().bold())?;
    } else {
        let noun = if summary.discrepancies.len() == 1 {
            "discrepancy"
        } else {
            "discrepancies"
        };
        let heading = format!("Found {} {}:", summary.discrepancies.len(), noun);
        writeln!(out, "{}", heading.yellow().bold())?;
        for (i, discrepancy) in summary.discrepancies.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, discrepancy)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Files with known size: {}", summary.known_size_files)?;
    writeln!(out, "Files with unknown size: {}", summary.unknown_size_files)?;
    if summary.known_size_files > 0 {
        writeln!(
            out,
            "Total size of tracked files: {} bytes ({:.2} GB)",
            format_grouped(summary.known_size_total),
            summary.known_size_gb()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizeaudit_core::{DiscrepancyKind, OperationCounts};

    const TS: &str = "Mon Jan 15 10:00:04.000000 AM 2024";

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn mismatch() -> Discrepancy {
        Discrepancy {
            line_number: 5,
            timestamp: TS.to_string(),
            kind: DiscrepancyKind::DeleteDelta,
            message: "DeleteFile size mismatch for '/b': expected delta=-2048, got delta=-1"
                .to_string(),
        }
    }

    fn step(style: StepStyle, discrepancies: Vec<Discrepancy>) -> Step {
        Step {
            line_number: 5,
            timestamp: TS.to_string(),
            style,
            headline: "DeleteFile: '/b' (delta=-1)".to_string(),
            discrepancies,
        }
    }

    #[test]
    fn test_trace_step() {
        let text = render(|out| write_step(out, &step(StepStyle::Trace, vec![mismatch()]), false));
        assert_eq!(
            text,
            format!(
                "[5] [{TS}] DeleteFile: '/b' (delta=-1)\n  ! [5] [{TS}] DeleteFile size mismatch for '/b': expected delta=-2048, got delta=-1\n"
            )
        );
    }

    #[test]
    fn test_banner_step_is_framed() {
        let text = render(|out| write_step(out, &step(StepStyle::Banner, Vec::new()), false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "=".repeat(80));
        assert_eq!(lines[3], "=".repeat(80));
        assert_eq!(lines[4], "");
    }

    #[test]
    fn test_quiet_step_keeps_only_discrepancies() {
        let clean = render(|out| write_step(out, &step(StepStyle::Trace, Vec::new()), true));
        assert_eq!(clean, "");

        let flagged = render(|out| write_step(out, &step(StepStyle::Trace, vec![mismatch()]), true));
        assert_eq!(flagged.lines().count(), 1);
        assert!(flagged.starts_with("  ! [5]"));
    }

    #[test]
    fn test_summary_snapshot() {
        let summary = Summary {
            lines_processed: 6,
            files_tracked: 2,
            pending_delta: 3,
            discrepancies: vec![mismatch()],
            known_size_files: 1,
            unknown_size_files: 1,
            known_size_total: 1536,
            counts: OperationCounts {
                adds: 1,
                copies: 2,
                deletes: 1,
                renames: 1,
                syncs: 0,
                epoch_changes: 0,
                unrecognized: 1,
                untimestamped: 0,
            },
        };
        let text = render(|out| write_summary(out, &summary));
        insta::assert_snapshot!(text.trim(), @r"
================================================================================
ANALYSIS SUMMARY
================================================================================
Total lines processed: 6
Total files tracked: 2
Pending delta (since last sync): +3
Operations: 1 add, 2 copy, 1 delete, 1 rename, 0 sync, 0 epoch change
Ignored lines: 1 unrecognized, 0 without timestamp

Found 1 discrepancy:
  1. [5] [Mon Jan 15 10:00:04.000000 AM 2024] DeleteFile size mismatch for '/b': expected delta=-2048, got delta=-1

Files with known size: 1
Files with unknown size: 1
Total size of tracked files: 1,536 bytes (0.00 GB)
");
    }

    #[test]
    fn test_summary_without_findings() {
        let summary = Summary {
            lines_processed: 0,
            files_tracked: 0,
            pending_delta: 0,
            discrepancies: Vec::new(),
            known_size_files: 0,
            unknown_size_files: 0,
            known_size_total: 0,
            counts: OperationCounts::default(),
        };
        let text = render(|out| write_summary(out, &summary));
        assert!(text.contains("Pending delta (since last sync): +0\n"));
        assert!(text.contains("No discrepancies found!\n"));
        assert!(!text.contains("Total size of tracked files"));
    }
}
