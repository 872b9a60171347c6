//! Backend round-trip operations.
//!
//! Every mutation is a backend call followed by a full refetch of the
//! report set, so the caller always applies fresh truth to the store before
//! reporting success. There is no optimistic local patching.

use crate::backend::{Backend, BackendError};
use crate::state::{NewReport, Report, ReportStatus, RouteStop};

/// Fetches the complete report set.
pub fn refresh(backend: &dyn Backend) -> Result<Vec<Report>, BackendError> {
    backend.fetch_reports()
}

/// Creates a report, then refetches. The refreshed set is returned so the
/// store is current before the user sees a success message.
pub fn submit_report(
    backend: &dyn Backend,
    report: &NewReport,
) -> Result<Vec<Report>, BackendError> {
    backend.create_report(report)?;
    backend.fetch_reports()
}

pub fn resolve_report(backend: &dyn Backend, id: i64) -> Result<Vec<Report>, BackendError> {
    backend.set_status(id, ReportStatus::Resolved)?;
    backend.fetch_reports()
}

pub fn delete_report(backend: &dyn Backend, id: i64) -> Result<Vec<Report>, BackendError> {
    backend.delete_report(id)?;
    backend.fetch_reports()
}

/// Runs the injected confirmation before the destructive request. Returns
/// `Ok(None)` when the user declines; no request is issued in that case.
pub fn delete_with_confirmation(
    backend: &dyn Backend,
    id: i64,
    confirm: impl FnOnce() -> bool,
) -> Result<Option<Vec<Report>>, BackendError> {
    if !confirm() {
        return Ok(None);
    }
    delete_report(backend, id).map(Some)
}

/// Outcome of a route request. An empty stop list from the backend means
/// "no route could be built", which is informational, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    Route(Vec<RouteStop>),
    NoRoute,
}

pub fn request_route(backend: &dyn Backend) -> Result<RouteOutcome, BackendError> {
    let stops = backend.request_route()?;
    if stops.is_empty() {
        Ok(RouteOutcome::NoRoute)
    } else {
        Ok(RouteOutcome::Route(stops))
    }
}
