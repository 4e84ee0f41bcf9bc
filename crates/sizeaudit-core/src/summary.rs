//! End-of-run summary model.

use crate::audit::{Discrepancy, OperationCounts, RunState};
use crate::ledger::Ledger;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Aggregate view of a finished (or paused) audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub lines_processed: usize,
    pub files_tracked: usize,
    /// Delta accumulated since the last sync or epoch change.
    pub pending_delta: i64,
    pub discrepancies: Vec<Discrepancy>,
    pub known_size_files: usize,
    pub unknown_size_files: usize,
    /// Sum of all known sizes in the ledger.
    pub known_size_total: i64,
    pub counts: OperationCounts,
}

impl Summary {
    pub fn collect(state: &RunState, ledger: &Ledger, discrepancies: &[Discrepancy]) -> Self {
        let (known, unknown): (Vec<_>, Vec<_>) =
            ledger.iter().partition(|(_, info)| info.size.is_some());
        let known_size_total = known
            .iter()
            .filter_map(|(_, info)| info.size)
            .fold(0i64, i64::saturating_add);

        Self {
            lines_processed: state.line_number,
            files_tracked: ledger.len(),
            pending_delta: state.total_delta,
            discrepancies: discrepancies.to_vec(),
            known_size_files: known.len(),
            unknown_size_files: unknown.len(),
            known_size_total,
            counts: state.counts,
        }
    }

    /// Known total expressed in GiB.
    pub fn known_size_gb(&self) -> f64 {
        self.known_size_total as f64 / BYTES_PER_GIB
    }
}

/// Formats `value` with `,` between groups of three digits.
///
/// ```
/// use sizeaudit_core::format_grouped;
///
/// assert_eq!(format_grouped(1234567), "1,234,567");
/// assert_eq!(format_grouped(-1000), "-1,000");
/// assert_eq!(format_grouped(999), "999");
/// ```
pub fn format_grouped(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
