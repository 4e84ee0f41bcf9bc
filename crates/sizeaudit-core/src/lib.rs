//! Size-tracker log auditor.
//!
//! Replays the textual journal emitted by a file cache's size tracker and
//! checks that the running totals it reports are internally consistent.
//!
//! The pipeline for one line is:
//!
//! ```text
//! raw line -> timestamp::extract_timestamp -> event::parse_event -> audit::apply
//! ```
//!
//! [`Auditor`] drives that pipeline over a whole log, keeping the [`Ledger`]
//! of per-file sizes, the [`RunState`] accumulators and the ordered list of
//! [`Discrepancy`] records. Discrepancies are values, never errors: the only
//! failures surfaced through [`Error`] are I/O problems with the log itself.
//!
//! # Example
//!
//! ```
//! use sizeaudit_core::Auditor;
//!
//! let log = "\
//! Mon Jan 15 10:00:00.000001 AM 2024 journal.go: SizeTracker::Add : 100
//! Mon Jan 15 10:00:01.000001 AM 2024 journal.go: SizeTracker::sync : 0 + 100 = 100
//! ";
//!
//! let mut auditor = Auditor::new();
//! auditor.run(log.as_bytes(), |_| {}).unwrap();
//!
//! assert!(auditor.discrepancies().is_empty());
//! assert_eq!(auditor.state().last_sync_total, Some(100));
//! ```

pub mod audit;
pub mod error;
pub mod event;
pub mod ledger;
pub mod reader;
pub mod summary;
pub mod timestamp;

pub use audit::{
    Auditor, Discrepancy, DiscrepancyKind, LineContext, OperationCounts, RunState, Step,
    StepStyle, apply,
};
pub use error::{Error, Result};
pub use event::{MessageKind, SizeDescriptor, SizeEvent, parse_event, route};
pub use ledger::{FileInfo, Ledger};
pub use reader::{LossyLines, open_log};
pub use summary::{Summary, format_grouped};
pub use timestamp::extract_timestamp;
