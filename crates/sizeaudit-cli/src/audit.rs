//! The audit command: stream a log through the auditor and report.

use std::io::{self, Write};
use std::path::Path;

use sizeaudit_core::Auditor;

use crate::error::Result;
use crate::render;

/// Audit the log at `path`, writing the report to stdout.
pub fn run_audit(path: &Path, quiet: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    audit_to(&mut out, path, quiet)
}

/// Audit the log at `path`, writing the report to `out`.
///
/// Discrepancies never fail the run; only I/O on the log or on `out` does.
pub fn audit_to(out: &mut impl Write, path: &Path, quiet: bool) -> Result<()> {
    render::write_header(out, path)?;

    let mut auditor = Auditor::new();
    let mut write_error: Option<io::Error> = None;
    auditor.run_file(path, |step| {
        if write_error.is_none() {
            write_error = render::write_step(out, step, quiet).err();
        }
    })?;
    if let Some(e) = write_error {
        return Err(e.into());
    }

    let summary = auditor.summary();
    tracing::debug!(
        discrepancies = summary.discrepancies.len(),
        files = summary.files_tracked,
        "audit complete"
    );
    render::write_summary(out, &summary)?;
    out.flush()?;
    Ok(())
}
