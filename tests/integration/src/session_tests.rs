//! Longer replays resembling a real cache session: several files, renames,
//! periodic syncs, a restart that bumps the epoch, and interleaved noise.

use pretty_assertions::assert_eq;
use sizeaudit_core::{Auditor, DiscrepancyKind, FileInfo, StepStyle};
use sizeaudit_test_utils::{LogBuilder, TestLog, timestamp};

fn session() -> LogBuilder {
    LogBuilder::new()
        .raw("cloudfuse: mounting /mnt/cache")
        .sync(0, 0, 0)
        .copy("/data/a.bin", 4096, 0)
        .add(4096)
        .copy("/data/b.bin", 8192, 0)
        .add(8192)
        .rename("/data/a.bin", "/data/archive/a.bin")
        .copy("/data/b.bin", 10240, 8192)
        .add(2048)
        .noise()
        .sync(0, 14336, 14336)
        .delete("/data/archive/a.bin", -4096)
        .add(-4096)
        .rename("/tmp/upload.part", "/data/c.bin")
        .add(100)
        .epoch(1, 2, -3996)
        .sync(20000, 0, 20000)
        .copy("/data/b.bin", 10000, 10240)
        .add(-240)
}

#[test]
fn test_consistent_session_with_restart() {
    let log = TestLog::new(&session());
    let mut auditor = Auditor::new();
    let mut banners = 0;
    auditor
        .run_file(log.path(), |step| {
            if step.style == StepStyle::Banner {
                banners += 1;
            }
        })
        .unwrap();

    // The only finding is the total jump across the epoch change.
    let found = auditor.discrepancies();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiscrepancyKind::SyncTotal);
    assert_eq!(found[0].line_number, 17);
    assert_eq!(
        found[0].message,
        "Sync size mismatch: 20000 != 14336 (off by 5664)! (reconciled by epoch reset)"
    );
    assert_eq!(banners, 4);

    let ledger = auditor.ledger();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.known_size("/data/b.bin"), Some(10000));
    // Learned from the untracked rename on line 14, the 13th stamped line.
    assert_eq!(
        ledger.get("/data/c.bin"),
        Some(&FileInfo::unknown(timestamp(12)))
    );

    let summary = auditor.summary();
    assert_eq!(summary.lines_processed, 19);
    assert_eq!(summary.pending_delta, -240);
    assert_eq!(summary.known_size_files, 1);
    assert_eq!(summary.unknown_size_files, 1);
    assert_eq!(summary.known_size_total, 10000);
    assert_eq!(summary.counts.syncs, 3);
    assert_eq!(summary.counts.epoch_changes, 1);
    assert_eq!(summary.counts.untimestamped, 1);
    assert_eq!(summary.counts.unrecognized, 1);
}

#[test]
fn test_double_counted_add_surfaces_at_next_sync() {
    let log = TestLog::new(
        &LogBuilder::new()
            .sync(0, 0, 0)
            .copy("/f", 500, 0)
            .add(500)
            .add(500)
            .sync(0, 500, 500),
    );
    let mut auditor = Auditor::new();
    auditor.run_file(log.path(), |_| {}).unwrap();

    let kinds: Vec<_> = auditor.discrepancies().iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DiscrepancyKind::SyncDelta]);
    assert_eq!(
        auditor.discrepancies()[0].message,
        "Sync delta mismatch: tracked=+1000, sync=+500, difference=+500"
    );
}

#[test]
fn test_epoch_discarding_wrong_delta() {
    let log = TestLog::new(&LogBuilder::new().add(10).add(20).epoch(4, 5, 25).add(1));
    let mut auditor = Auditor::new();
    auditor.run_file(log.path(), |_| {}).unwrap();

    let found = auditor.discrepancies();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiscrepancyKind::EpochDelta);
    assert_eq!(
        found[0].message,
        "Delta mismatch: expected delta=30. Discarded delta is off by -5!"
    );
    assert_eq!(auditor.state().total_delta, 1);
    assert_eq!(auditor.state().last_sync_total, None);
}
