//! Reference scenarios for the auditor.
//!
//! Each test replays a short log end to end through a file on disk and
//! checks the resulting ledger, running state and discrepancy list.

use pretty_assertions::assert_eq;
use sizeaudit_core::{Auditor, DiscrepancyKind};
use sizeaudit_test_utils::{LogBuilder, TestLog};

fn audit_file(builder: &LogBuilder) -> Auditor {
    let log = TestLog::new(builder);
    let mut auditor = Auditor::new();
    auditor.run_file(log.path(), |_| {}).unwrap();
    auditor
}

// =============================================================================
// Scenario A: pending add confirmed by the first sync
// =============================================================================

#[test]
fn scenario_a_add_then_sync() {
    let auditor = audit_file(&LogBuilder::new().add(100).sync(0, 100, 100));

    assert!(auditor.discrepancies().is_empty());
    assert_eq!(auditor.state().last_sync_total, Some(100));
    assert_eq!(auditor.state().total_delta, 0);
}

// =============================================================================
// Scenario B: file created then deleted with the matching delta
// =============================================================================

#[test]
fn scenario_b_copy_then_delete() {
    let auditor = audit_file(&LogBuilder::new().copy("/a", 50, 0).delete("/a", -50));

    assert!(auditor.discrepancies().is_empty());
    assert!(auditor.ledger().get("/a").is_none());
}

// =============================================================================
// Scenario C: delete removes less than the tracked size
// =============================================================================

#[test]
fn scenario_c_delete_mismatch() {
    let auditor = audit_file(&LogBuilder::new().copy("/a", 50, 0).delete("/a", -40));

    let found = auditor.discrepancies();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiscrepancyKind::DeleteDelta);
    assert!(found[0].message.contains("expected delta=-50"));
    assert!(found[0].message.contains("got delta=-40"));
    assert!(auditor.ledger().get("/a").is_none());
}

// =============================================================================
// Scenario D: sync starts from a total other than the last one
// =============================================================================

#[test]
fn scenario_d_sync_total_gap() {
    let auditor = audit_file(&LogBuilder::new().sync(0, 100, 100).sync(90, 0, 90));

    let found = auditor.discrepancies();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiscrepancyKind::SyncTotal);
    assert!(found[0].message.contains("(off by -10)"));
}
