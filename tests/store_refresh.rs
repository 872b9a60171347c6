mod common;

use common::{report, MockBackend};
use mapmywaste::ops;
use mapmywaste::state::{ReportStatus, ReportStore};

#[test]
fn refresh_replaces_the_cache_wholesale() {
    let store = ReportStore::new();
    store.replace(vec![report(9, "stale entry", ReportStatus::Open)]);

    let backend = MockBackend::new(vec![
        report(1, "overflowing bin", ReportStatus::Open),
        report(2, "tires in creek", ReportStatus::Resolved),
    ]);
    store.replace(ops::refresh(&backend).unwrap());

    let ids = store.with(|r| r.iter().map(|r| r.id).collect::<Vec<_>>());
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(store.revision(), 2);
}

#[test]
fn counts_partition_after_every_refresh() {
    let store = ReportStore::new();
    let backend = MockBackend::new(vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::InProgress),
        report(3, "c", ReportStatus::Resolved),
    ]);
    store.replace(ops::refresh(&backend).unwrap());

    let counts = store.counts();
    assert_eq!(counts.total, 3);
    assert_eq!(counts.open, 2);
    assert_eq!(counts.resolved, 1);
    assert_eq!(counts.total, counts.open + counts.resolved);
}

#[test]
fn delete_refetches_exactly_once_and_drops_the_report() {
    let backend = MockBackend::new(vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::Open),
        report(3, "c", ReportStatus::Open),
    ]);
    let store = ReportStore::new();

    store.replace(ops::delete_report(&backend, 2).unwrap());

    assert_eq!(backend.fetch_count(), 1);
    let ids = store.with(|r| r.iter().map(|r| r.id).collect::<Vec<_>>());
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn resolve_is_observed_through_the_refetch() {
    let backend = MockBackend::new(vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::Open),
    ]);
    let store = ReportStore::new();

    store.replace(ops::resolve_report(&backend, 1).unwrap());

    let status = store.with(|r| r.iter().find(|r| r.id == 1).map(|r| r.status));
    assert_eq!(status, Some(ReportStatus::Resolved));
    assert_eq!(store.counts().open, 1);
}

#[test]
fn transport_failure_leaves_the_cache_untouched() {
    let store = ReportStore::new();
    let backend = MockBackend::new(vec![report(1, "a", ReportStatus::Open)]);
    store.replace(ops::refresh(&backend).unwrap());

    backend.fail_transport();
    assert!(ops::refresh(&backend).is_err());

    // The caller only replaces on success.
    assert_eq!(store.with(|r| r.len()), 1);
    assert_eq!(store.revision(), 1);
}
