//! Routing and parsing of size-tracker messages.
//!
//! A timestamped line is first routed to a [`MessageKind`] by substring
//! containment, trying the routes in a fixed priority. Only then is the
//! kind's detailed pattern applied. A routed line whose fields do not parse
//! is [`SizeEvent::Unrecognized`]; it does not fall through to a later route.

use regex::Regex;
use std::sync::LazyLock;

/// The five message families emitted by the size tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Add,
    CopyFromFile,
    DeleteFile,
    RenameFile,
    Sync,
}

/// Routes in priority order. A route matches when every needle is contained
/// in the line.
///
/// `journal.go` separates the journal's pending-delta `Add` from other
/// `SizeTracker::Add` emissions.
const ROUTES: &[(MessageKind, &[&str])] = &[
    (MessageKind::Add, &["SizeTracker::Add :", "journal.go"]),
    (MessageKind::CopyFromFile, &["SizeTracker::CopyFromFile"]),
    (MessageKind::DeleteFile, &["SizeTracker::DeleteFile"]),
    (MessageKind::RenameFile, &["SizeTracker::RenameFile"]),
    (MessageKind::Sync, &["SizeTracker::sync"]),
];

static ADD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SizeTracker::Add : (-?\d+)").expect("Invalid add regex")
});

static COPY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SizeTracker::CopyFromFile : (.+?) Add\((.+?)\)").expect("Invalid copy regex")
});

static DELETE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SizeTracker::DeleteFile : (.+?) Add\((-?\d+)\)").expect("Invalid delete regex")
});

static RENAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SizeTracker::RenameFile : (.+?)->(.+)$").expect("Invalid rename regex")
});

/// The tracker writes an em dash and `delta <n>`; a plain dash and `delta=<n>`
/// are accepted as well.
static EPOCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"epoch changed \(local=(\d+) -> file=(\d+)\) (?:—|--?) discarding delta[ =](-?\d+)")
        .expect("Invalid epoch regex")
});

static SYNC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SizeTracker::sync : (\d+) \+ (-?\d+) = (\d+)").expect("Invalid sync regex")
});

/// Size information attached to a `CopyFromFile` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeDescriptor {
    /// Older producers log a bare signed delta.
    Legacy { delta: i64 },
    /// Current producers log `<new_size>-<old_size>`.
    Current { new_size: i64, old_size: i64 },
}

impl SizeDescriptor {
    /// Classifies and parses the text inside `Add(...)`.
    ///
    /// A descriptor with no `-` at index 1 or later is a legacy delta.
    /// Otherwise the first two `-`-separated fields are the new and old size.
    ///
    /// ```
    /// use sizeaudit_core::SizeDescriptor;
    ///
    /// assert_eq!(SizeDescriptor::parse("-12"), Some(SizeDescriptor::Legacy { delta: -12 }));
    /// assert_eq!(
    ///     SizeDescriptor::parse("4096-0"),
    ///     Some(SizeDescriptor::Current { new_size: 4096, old_size: 0 })
    /// );
    /// assert_eq!(SizeDescriptor::parse("abc"), None);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        match text.find('-') {
            None | Some(0) => parse_int(text).map(|delta| Self::Legacy { delta }),
            Some(_) => {
                let mut parts = text.split('-');
                let new_size = parse_int(parts.next()?)?;
                let old_size = parse_int(parts.next()?)?;
                Some(Self::Current { new_size, old_size })
            }
        }
    }

    /// Net change in bytes this descriptor represents.
    pub fn delta(&self) -> i64 {
        match *self {
            Self::Legacy { delta } => delta,
            Self::Current { new_size, old_size } => new_size.saturating_sub(old_size),
        }
    }
}

/// One parsed size-tracker message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeEvent {
    Add {
        delta: i64,
    },
    CopyFromFile {
        path: String,
        size: SizeDescriptor,
    },
    DeleteFile {
        path: String,
        delta: i64,
    },
    RenameFile {
        src: String,
        dst: String,
    },
    EpochChange {
        local: u64,
        file: u64,
        discarded: i64,
    },
    Sync {
        old_total: i64,
        delta: i64,
        new_total: i64,
    },
    Unrecognized,
}

/// Returns the first route whose needles are all contained in `line`.
pub fn route(line: &str) -> Option<MessageKind> {
    ROUTES
        .iter()
        .find(|(_, needles)| needles.iter().all(|needle| line.contains(needle)))
        .map(|(kind, _)| *kind)
}

/// Routes `line` and parses the fields of the matching message shape.
///
/// ```
/// use sizeaudit_core::{SizeEvent, parse_event};
///
/// let event = parse_event("SizeTracker::RenameFile : /a->/b");
/// assert_eq!(
///     event,
///     SizeEvent::RenameFile { src: "/a".into(), dst: "/b".into() }
/// );
/// assert_eq!(parse_event("unrelated"), SizeEvent::Unrecognized);
/// ```
pub fn parse_event(line: &str) -> SizeEvent {
    let parsed = match route(line) {
        Some(MessageKind::Add) => parse_add(line),
        Some(MessageKind::CopyFromFile) => parse_copy(line),
        Some(MessageKind::DeleteFile) => parse_delete(line),
        Some(MessageKind::RenameFile) => parse_rename(line),
        Some(MessageKind::Sync) => parse_sync(line),
        None => return SizeEvent::Unrecognized,
    };

    parsed.unwrap_or_else(|| {
        tracing::trace!(line, "routed line did not match its message shape");
        SizeEvent::Unrecognized
    })
}

fn parse_add(line: &str) -> Option<SizeEvent> {
    let caps = ADD_REGEX.captures(line)?;
    Some(SizeEvent::Add {
        delta: parse_int(&caps[1])?,
    })
}

fn parse_copy(line: &str) -> Option<SizeEvent> {
    let caps = COPY_REGEX.captures(line)?;
    Some(SizeEvent::CopyFromFile {
        path: caps[1].trim().to_string(),
        size: SizeDescriptor::parse(&caps[2])?,
    })
}

fn parse_delete(line: &str) -> Option<SizeEvent> {
    let caps = DELETE_REGEX.captures(line)?;
    Some(SizeEvent::DeleteFile {
        path: caps[1].trim().to_string(),
        delta: parse_int(&caps[2])?,
    })
}

fn parse_rename(line: &str) -> Option<SizeEvent> {
    let caps = RENAME_REGEX.captures(line)?;
    Some(SizeEvent::RenameFile {
        src: caps[1].trim().to_string(),
        dst: caps[2].trim().to_string(),
    })
}

/// An epoch change takes precedence over the normal sync shape.
fn parse_sync(line: &str) -> Option<SizeEvent> {
    if let Some(caps) = EPOCH_REGEX.captures(line) {
        return Some(SizeEvent::EpochChange {
            local: caps[1].parse().ok()?,
            file: caps[2].parse().ok()?,
            discarded: parse_int(&caps[3])?,
        });
    }

    let caps = SYNC_REGEX.captures(line)?;
    Some(SizeEvent::Sync {
        old_total: parse_int(&caps[1])?,
        delta: parse_int(&caps[2])?,
        new_total: parse_int(&caps[3])?,
    })
}

/// Parses a signed integer, tolerating surrounding whitespace.
fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
