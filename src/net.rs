//! Worker-thread entry points. Every backend round trip runs on its own
//! named thread and reports back through the event channel; the UI thread
//! never blocks on the network.

use crate::backend::Backend;
use crate::events::{AppEvent, RefreshCause};
use crate::geo::Viewport;
use crate::ops;
use crate::state::NewReport;
use crate::tiles::{decode_image, TileFetcher};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tracing::warn;

fn spawn(name: &str, job: impl FnOnce() + Send + 'static) {
    let result = std::thread::Builder::new()
        .name(name.to_string())
        .spawn(job);
    if let Err(err) = result {
        warn!(name, %err, "failed to spawn worker thread");
    }
}

pub fn spawn_fetch_reports(
    backend: Arc<dyn Backend>,
    tx: Sender<AppEvent>,
    cause: RefreshCause,
) {
    spawn("reports-fetch", move || {
        let result = ops::refresh(backend.as_ref());
        let _ = tx.send(AppEvent::Reports { cause, result });
    });
}

pub fn spawn_submit(backend: Arc<dyn Backend>, tx: Sender<AppEvent>, report: NewReport) {
    spawn("report-submit", move || {
        let result = ops::submit_report(backend.as_ref(), &report);
        let _ = tx.send(AppEvent::Reports {
            cause: RefreshCause::Submit,
            result,
        });
    });
}

pub fn spawn_resolve(backend: Arc<dyn Backend>, tx: Sender<AppEvent>, id: i64) {
    spawn("report-resolve", move || {
        let result = ops::resolve_report(backend.as_ref(), id);
        let _ = tx.send(AppEvent::Reports {
            cause: RefreshCause::Resolve(id),
            result,
        });
    });
}

pub fn spawn_delete(backend: Arc<dyn Backend>, tx: Sender<AppEvent>, id: i64) {
    spawn("report-delete", move || {
        let result = ops::delete_report(backend.as_ref(), id);
        let _ = tx.send(AppEvent::Reports {
            cause: RefreshCause::Delete(id),
            result,
        });
    });
}

pub fn spawn_route(backend: Arc<dyn Backend>, tx: Sender<AppEvent>) {
    spawn("route-request", move || {
        let result = ops::request_route(backend.as_ref());
        let _ = tx.send(AppEvent::Route { result });
    });
}

/// Fetches and decodes a report photo; decoding stays off the UI thread.
pub fn spawn_fetch_photo(
    backend: Arc<dyn Backend>,
    tx: Sender<AppEvent>,
    report_id: i64,
    image_url: String,
) {
    spawn("photo-fetch", move || {
        let result = backend
            .fetch_image(&image_url)
            .map_err(|err| err.to_string())
            .and_then(|bytes| decode_image(&bytes));
        let _ = tx.send(AppEvent::MarkerImage { report_id, result });
    });
}

pub fn spawn_fetch_basemap(
    fetcher: Arc<TileFetcher>,
    tx: Sender<AppEvent>,
    viewport: Viewport,
    view_rev: u64,
) {
    spawn("basemap-fetch", move || {
        let result = fetcher.render(&viewport);
        let _ = tx.send(AppEvent::Basemap { view_rev, result });
    });
}
