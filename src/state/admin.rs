//! Admin panel view state: filter, search, delete confirmation, and
//! in-flight request tracking.
//!
//! The panel owns no report data. Visible rows and counts are recomputed
//! from the store snapshot on every render so they can never drift.

use crate::state::{Report, StatusFilter};

#[derive(Debug, Default)]
pub struct AdminView {
    pub filter: StatusFilter,
    pub search: String,
    pending_delete: Option<i64>,
    route_in_flight: bool,
    mutation_in_flight: Option<i64>,
}

impl AdminView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A report is visible iff it passes the status filter and the
    /// case-insensitive title search. An empty search passes everything.
    pub fn matches(&self, report: &Report) -> bool {
        if !self.filter.allows(report.status) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        report
            .title
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn visible<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }

    /// Route computation needs at least two stops to visit.
    pub fn can_request_route(reports: &[Report]) -> bool {
        reports.iter().filter(|r| !r.status.is_resolved()).count() >= 2
    }

    // ------------------------------------------------------------------
    // Delete confirmation: destructive mutations require an explicit
    // acknowledgment step before any request is issued.
    // ------------------------------------------------------------------

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consumes the pending confirmation. Returns false when `id` was not
    /// the report awaiting confirmation, in which case nothing changes.
    pub fn confirm_delete(&mut self, id: i64) -> bool {
        if self.pending_delete == Some(id) {
            self.pending_delete = None;
            true
        } else {
            false
        }
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    // ------------------------------------------------------------------
    // In-flight request tracking
    // ------------------------------------------------------------------

    /// Claims the single route request slot. Fails when a request is
    /// already in flight or fewer than two open reports exist.
    pub fn begin_route_request(&mut self, reports: &[Report]) -> bool {
        if self.route_in_flight || !Self::can_request_route(reports) {
            return false;
        }
        self.route_in_flight = true;
        true
    }

    pub fn finish_route_request(&mut self) {
        self.route_in_flight = false;
    }

    pub fn route_in_flight(&self) -> bool {
        self.route_in_flight
    }

    /// Claims the mutation slot for one report (resolve or delete). One
    /// admin mutation at a time; the triggering row is disabled meanwhile.
    pub fn begin_mutation(&mut self, id: i64) -> bool {
        if self.mutation_in_flight.is_some() {
            return false;
        }
        self.mutation_in_flight = Some(id);
        true
    }

    pub fn finish_mutation(&mut self) {
        self.mutation_in_flight = None;
    }

    pub fn mutation_in_flight(&self) -> Option<i64> {
        self.mutation_in_flight
    }
}
