//! The report store: single owner of report truth on the UI thread.
//!
//! The cache is only ever replaced wholesale with the result of a backend
//! fetch; there is no incremental patching. Completed fetches are applied in
//! completion order, so concurrent refreshes are last-completed-write-wins.

use crate::state::Report;
use std::cell::{Cell, RefCell};

/// Counts derived from one snapshot of the cache. `open` counts every
/// non-resolved report, so `total == open + resolved` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

impl Counts {
    pub fn of(reports: &[Report]) -> Self {
        let total = reports.len();
        let resolved = reports.iter().filter(|r| r.status.is_resolved()).count();
        Self {
            total,
            open: total - resolved,
            resolved,
        }
    }
}

/// In-memory cache of all reports, refreshed wholesale from the backend.
///
/// Views subscribe once and are notified after every replace; mutating
/// components never hand-notify each other. Subscribers may read the store
/// but must not mutate it from inside the notification.
pub struct ReportStore {
    reports: RefCell<Vec<Report>>,
    revision: Cell<u64>,
    subscribers: RefCell<Vec<Box<dyn Fn()>>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            reports: RefCell::new(Vec::new()),
            revision: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Runs `f` against the current snapshot without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&[Report]) -> R) -> R {
        f(&self.reports.borrow())
    }

    /// Clones the current snapshot.
    pub fn snapshot(&self) -> Vec<Report> {
        self.reports.borrow().clone()
    }

    pub fn counts(&self) -> Counts {
        self.with(Counts::of)
    }

    /// Bumped once per completed replace.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Atomically swaps the cache for a freshly fetched report set and
    /// notifies subscribers. The cache borrow is released before any
    /// subscriber runs, so subscribers can read the new state.
    pub fn replace(&self, reports: Vec<Report>) {
        *self.reports.borrow_mut() = reports;
        self.revision.set(self.revision.get() + 1);
        for subscriber in self.subscribers.borrow().iter() {
            subscriber();
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn() + 'static) {
        self.subscribers.borrow_mut().push(Box::new(subscriber));
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ReportStatus;
    use std::cell::Cell;
    use std::rc::Rc;

    fn report(id: i64, status: ReportStatus) -> Report {
        Report {
            id,
            title: format!("report {id}"),
            description: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            status,
            image_url: None,
        }
    }

    #[test]
    fn counts_always_partition_the_snapshot() {
        let store = ReportStore::new();
        let sets = [
            vec![],
            vec![report(1, ReportStatus::Open)],
            vec![
                report(1, ReportStatus::Open),
                report(2, ReportStatus::InProgress),
                report(3, ReportStatus::Resolved),
            ],
            vec![report(4, ReportStatus::Resolved)],
        ];
        for set in sets {
            store.replace(set);
            let counts = store.counts();
            assert_eq!(counts.total, counts.open + counts.resolved);
        }
    }

    #[test]
    fn in_progress_counts_as_open() {
        let counts = Counts::of(&[
            report(1, ReportStatus::InProgress),
            report(2, ReportStatus::Resolved),
        ]);
        assert_eq!(counts.open, 1);
        assert_eq!(counts.resolved, 1);
    }

    #[test]
    fn replace_notifies_subscribers_with_new_state_visible() {
        let store = Rc::new(ReportStore::new());
        let seen = Rc::new(Cell::new(0usize));
        {
            let store = store.clone();
            let seen = seen.clone();
            store.clone().subscribe(move || {
                seen.set(store.with(|reports| reports.len()));
            });
        }
        store.replace(vec![report(1, ReportStatus::Open), report(2, ReportStatus::Open)]);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn later_completion_wins_regardless_of_start_order() {
        let store = ReportStore::new();
        // Two refreshes in flight; the one that completes last replaces.
        store.replace(vec![report(1, ReportStatus::Open)]);
        store.replace(vec![report(2, ReportStatus::Open), report(3, ReportStatus::Open)]);
        assert_eq!(
            store.with(|r| r.iter().map(|r| r.id).collect::<Vec<_>>()),
            vec![2, 3]
        );
        assert_eq!(store.revision(), 2);
    }
}
