//! Replay of size-tracker events against the ledger and running totals.
//!
//! [`apply`] is the single entry point for one parsed event: it mutates the
//! [`RunState`] and [`Ledger`] in place and returns a [`Step`] describing what
//! happened, including any [`Discrepancy`] found on that line. [`Auditor`]
//! wraps it with line numbering, timestamp extraction and the discrepancy log.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use tracing::{debug, warn};

use crate::event::{SizeDescriptor, SizeEvent, parse_event};
use crate::ledger::{FileInfo, Ledger};
use crate::reader::{LossyLines, open_log};
use crate::summary::Summary;
use crate::timestamp::extract_timestamp;
use crate::{Error, Result};

/// Which check produced a [`Discrepancy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscrepancyKind {
    /// `CopyFromFile` reported an old size that differs from the ledger.
    CopyOldSize,
    /// `DeleteFile` removed a different amount than the ledger holds.
    DeleteDelta,
    /// An epoch change discarded a delta other than the one accumulated.
    EpochDelta,
    /// A sync started from a total other than the last synced one.
    SyncTotal,
    /// A sync applied a delta other than the one accumulated.
    SyncDelta,
}

/// A mismatch between an expected and an observed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub line_number: usize,
    pub timestamp: String,
    pub kind: DiscrepancyKind,
    pub message: String,
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] [{}] {}", self.line_number, self.timestamp, self.message)
    }
}

/// How many lines of each kind were seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub adds: usize,
    pub copies: usize,
    pub deletes: usize,
    pub renames: usize,
    pub syncs: usize,
    pub epoch_changes: usize,
    /// Timestamped lines that matched no message shape.
    pub unrecognized: usize,
    /// Lines without a leading timestamp.
    pub untimestamped: usize,
}

/// Accumulators that live for one audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Sum of deltas seen since the last sync or epoch change.
    pub total_delta: i64,
    /// Most recently confirmed running total.
    pub last_sync_total: Option<i64>,
    /// Set by an epoch change; cleared when the next sync total mismatch is
    /// reported.
    pub epoch_changed: bool,
    /// True until the first sync or epoch change.
    pub first_sync: bool,
    /// 1-based number of the last line read.
    pub line_number: usize,
    pub counts: OperationCounts,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            total_delta: 0,
            last_sync_total: None,
            epoch_changed: false,
            first_sync: true,
            line_number: 0,
            counts: OperationCounts::default(),
        }
    }
}

/// Position of the line being applied.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub line_number: usize,
    pub timestamp: &'a str,
}

/// Presentation hint for a [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStyle {
    /// A single trace line for a file operation.
    Trace,
    /// A framed block for a sync or epoch change.
    Banner,
}

/// Result of applying one recognized event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line_number: usize,
    pub timestamp: String,
    pub style: StepStyle,
    pub headline: String,
    pub discrepancies: Vec<Discrepancy>,
}

impl Step {
    fn new(ctx: &LineContext<'_>, style: StepStyle, headline: String) -> Self {
        Self {
            line_number: ctx.line_number,
            timestamp: ctx.timestamp.to_string(),
            style,
            headline,
            discrepancies: Vec::new(),
        }
    }

    fn flag(&mut self, ctx: &LineContext<'_>, kind: DiscrepancyKind, message: String) {
        warn!(line = ctx.line_number, ?kind, "{}", message);
        self.discrepancies.push(Discrepancy {
            line_number: ctx.line_number,
            timestamp: ctx.timestamp.to_string(),
            kind,
            message,
        });
    }
}

/// Applies one event to the run state and ledger.
///
/// Returns `None` for [`SizeEvent::Unrecognized`], which changes nothing but
/// the unrecognized counter.
pub fn apply(
    state: &mut RunState,
    ledger: &mut Ledger,
    ctx: &LineContext<'_>,
    event: SizeEvent,
) -> Option<Step> {
    let step = match event {
        SizeEvent::Add { delta } => {
            state.counts.adds += 1;
            handle_add(state, ctx, delta)
        }
        SizeEvent::CopyFromFile { path, size } => {
            state.counts.copies += 1;
            handle_copy_from_file(ledger, ctx, path, size)
        }
        SizeEvent::DeleteFile { path, delta } => {
            state.counts.deletes += 1;
            handle_delete_file(ledger, ctx, &path, delta)
        }
        SizeEvent::RenameFile { src, dst } => {
            state.counts.renames += 1;
            handle_rename_file(ledger, ctx, &src, dst)
        }
        SizeEvent::EpochChange {
            local,
            file,
            discarded,
        } => {
            state.counts.epoch_changes += 1;
            handle_epoch_change(state, ctx, local, file, discarded)
        }
        SizeEvent::Sync {
            old_total,
            delta,
            new_total,
        } => {
            state.counts.syncs += 1;
            handle_sync(state, ctx, old_total, delta, new_total)
        }
        SizeEvent::Unrecognized => {
            state.counts.unrecognized += 1;
            return None;
        }
    };
    Some(step)
}

fn handle_add(state: &mut RunState, ctx: &LineContext<'_>, delta: i64) -> Step {
    state.total_delta = state.total_delta.saturating_add(delta);
    Step::new(
        ctx,
        StepStyle::Trace,
        format!(
            "Add delta: {:+}, cumulative delta: {:+}",
            delta, state.total_delta
        ),
    )
}

fn handle_copy_from_file(
    ledger: &mut Ledger,
    ctx: &LineContext<'_>,
    path: String,
    size: SizeDescriptor,
) -> Step {
    match size {
        SizeDescriptor::Legacy { delta } => {
            // Only existing entries are adjusted; the old format carries no
            // absolute size to start a new entry from.
            if let Some(info) = ledger.get(&path).cloned() {
                let updated = FileInfo {
                    size: info.size.map(|s| s.saturating_add(delta)),
                    last_updated: ctx.timestamp.to_string(),
                };
                ledger.insert(path.as_str(), updated);
            }
            Step::new(
                ctx,
                StepStyle::Trace,
                format!("CopyFromFile (OLD STYLE): '{}' -> delta={:+}", path, delta),
            )
        }
        SizeDescriptor::Current { new_size, old_size } => {
            let mut step = Step::new(
                ctx,
                StepStyle::Trace,
                format!(
                    "CopyFromFile: '{}' -> size={} (delta={:+})",
                    path,
                    new_size,
                    size.delta()
                ),
            );
            if let Some(tracked) = ledger.known_size(&path) {
                if tracked != old_size {
                    step.flag(
                        ctx,
                        DiscrepancyKind::CopyOldSize,
                        format!(
                            "CopyFromFile size mismatch for '{}': expected old_size={}, got old_size={}",
                            path, tracked, old_size
                        ),
                    );
                }
            }
            ledger.insert(path, FileInfo::known(new_size, ctx.timestamp));
            step
        }
    }
}

fn handle_delete_file(ledger: &mut Ledger, ctx: &LineContext<'_>, path: &str, delta: i64) -> Step {
    let Some(info) = ledger.remove(path) else {
        return Step::new(
            ctx,
            StepStyle::Trace,
            format!("DeleteFile: '{}' (delta={:+}) [file not tracked]", path, delta),
        );
    };

    let mut step = Step::new(
        ctx,
        StepStyle::Trace,
        format!("DeleteFile: '{}' (delta={:+})", path, delta),
    );
    if let Some(tracked) = info.size {
        let expected = 0i64.saturating_sub(tracked);
        if delta != expected {
            step.flag(
                ctx,
                DiscrepancyKind::DeleteDelta,
                format!(
                    "DeleteFile size mismatch for '{}': expected delta={}, got delta={}",
                    path, expected, delta
                ),
            );
        }
    }
    step
}

fn handle_rename_file(ledger: &mut Ledger, ctx: &LineContext<'_>, src: &str, dst: String) -> Step {
    if ledger.rename(src, &dst) {
        return Step::new(
            ctx,
            StepStyle::Trace,
            format!("RenameFile: '{}' -> '{}'", src, dst),
        );
    }

    let headline = format!("RenameFile: '{}' -> '{}' [src not tracked]", src, dst);
    ledger.insert(dst, FileInfo::unknown(ctx.timestamp));
    Step::new(ctx, StepStyle::Trace, headline)
}

fn handle_epoch_change(
    state: &mut RunState,
    ctx: &LineContext<'_>,
    local: u64,
    file: u64,
    discarded: i64,
) -> Step {
    let mut step = Step::new(
        ctx,
        StepStyle::Banner,
        format!(
            "EPOCH CHANGE: local={} -> file={}, discarding delta={:+}",
            local, file, discarded
        ),
    );
    if state.total_delta != discarded {
        step.flag(
            ctx,
            DiscrepancyKind::EpochDelta,
            format!(
                "Delta mismatch: expected delta={}. Discarded delta is off by {}!",
                state.total_delta,
                discarded.saturating_sub(state.total_delta)
            ),
        );
    }

    state.total_delta = 0;
    state.epoch_changed = true;
    state.first_sync = false;
    step
}

fn handle_sync(
    state: &mut RunState,
    ctx: &LineContext<'_>,
    old_total: i64,
    delta: i64,
    new_total: i64,
) -> Step {
    let mut step = Step::new(
        ctx,
        StepStyle::Banner,
        format!("SYNC: {} + {:+} = {}", old_total, delta, new_total),
    );

    if let Some(last) = state.last_sync_total {
        if old_total != last {
            let mut message = format!(
                "Sync size mismatch: {} != {} (off by {})!",
                old_total,
                last,
                old_total.saturating_sub(last)
            );
            if state.epoch_changed {
                message.push_str(" (reconciled by epoch reset)");
                state.epoch_changed = false;
            }
            step.flag(ctx, DiscrepancyKind::SyncTotal, message);
        }
    }

    if !state.first_sync && state.total_delta != delta {
        step.flag(
            ctx,
            DiscrepancyKind::SyncDelta,
            format!(
                "Sync delta mismatch: tracked={:+}, sync={:+}, difference={:+}",
                state.total_delta,
                delta,
                state.total_delta.saturating_sub(delta)
            ),
        );
    }

    state.last_sync_total = Some(new_total);
    state.total_delta = 0;
    state.first_sync = false;
    step
}

/// Drives a whole log through [`apply`], one line at a time.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    state: RunState,
    ledger: Ledger,
    discrepancies: Vec<Discrepancy>,
}

impl Auditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one raw line.
    ///
    /// The line counter always advances. Lines without a timestamp and lines
    /// that match no message shape yield `None`.
    pub fn process_line(&mut self, line: &str) -> Option<Step> {
        self.state.line_number += 1;

        let Some(timestamp) = extract_timestamp(line) else {
            self.state.counts.untimestamped += 1;
            return None;
        };
        let ctx = LineContext {
            line_number: self.state.line_number,
            timestamp,
        };

        let step = apply(&mut self.state, &mut self.ledger, &ctx, parse_event(line))?;
        self.discrepancies.extend(step.discrepancies.iter().cloned());
        Some(step)
    }

    /// Streams every line of `reader` through [`Auditor::process_line`],
    /// handing each produced step to `on_step`.
    pub fn run<R: BufRead>(&mut self, reader: R, on_step: impl FnMut(&Step)) -> Result<()> {
        self.consume(LossyLines::new(reader), on_step)
    }

    /// Opens `path` and audits it.
    pub fn run_file(&mut self, path: &Path, on_step: impl FnMut(&Step)) -> Result<()> {
        let lines = open_log(path)?;
        self.consume(lines, on_step)?;
        debug!(
            path = %path.display(),
            lines = self.state.line_number,
            "finished auditing log"
        );
        Ok(())
    }

    fn consume<R: BufRead>(
        &mut self,
        lines: LossyLines<R>,
        mut on_step: impl FnMut(&Step),
    ) -> Result<()> {
        for line in lines {
            let line = line.map_err(|source| Error::Read { source })?;
            if let Some(step) = self.process_line(&line) {
                on_step(&step);
            }
        }
        Ok(())
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Every discrepancy found so far, in line order.
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    pub fn summary(&self) -> Summary {
        Summary::collect(&self.state, &self.ledger, &self.discrepancies)
    }
}
