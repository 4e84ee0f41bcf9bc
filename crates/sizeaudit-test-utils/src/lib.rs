//! Shared test utilities for the sizeaudit workspace.
//!
//! This crate provides log fixtures so crate test suites do not hand-write
//! timestamped size-tracker lines. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`log`] provides [`LogBuilder`] for size-tracker message lines
//! - [`file`] provides [`TestLog`], which writes a built log to a temporary directory

pub mod file;
pub mod log;

pub use file::TestLog;
pub use log::{LogBuilder, timestamp};
