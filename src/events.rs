//! Events crossing from worker threads back to the UI thread.
//!
//! Workers send plain data over an mpsc channel; a repeating timer on the
//! UI thread drains it and applies the results to the shared state. That
//! keeps all state mutation single threaded.

use crate::backend::BackendError;
use crate::callbacks::SharedState;
use crate::ops::RouteOutcome;
use crate::state::Report;
use crate::tiles::{pixmap_to_image, Pixmap};
use crate::AppWindow;
use slint::ComponentHandle;
use std::rc::Rc;
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::warn;

/// Why a report refresh was started. Drives the in-flight flag to clear
/// and the status message on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCause {
    Startup,
    Submit,
    Resolve(i64),
    Delete(i64),
}

pub enum AppEvent {
    Reports {
        cause: RefreshCause,
        result: Result<Vec<Report>, BackendError>,
    },
    Route {
        result: Result<RouteOutcome, BackendError>,
    },
    Basemap {
        view_rev: u64,
        result: Result<Pixmap, String>,
    },
    MarkerImage {
        report_id: i64,
        result: Result<Pixmap, String>,
    },
}

/// Starts the timer that pumps worker results into the UI. The returned
/// timer must be kept alive for the lifetime of the window.
pub fn start_event_pump(
    ui: &AppWindow,
    rx: Receiver<AppEvent>,
    shared: SharedState,
    render: Rc<dyn Fn()>,
    request_basemap: Rc<dyn Fn()>,
) -> slint::Timer {
    let timer = slint::Timer::default();
    let ui_weak = ui.as_weak();
    timer.start(
        slint::TimerMode::Repeated,
        Duration::from_millis(30),
        move || {
            let Some(ui) = ui_weak.upgrade() else {
                return;
            };
            while let Ok(event) = rx.try_recv() {
                handle_event(&ui, event, &shared, &render, &request_basemap);
            }
        },
    );
    timer
}

fn handle_event(
    ui: &AppWindow,
    event: AppEvent,
    shared: &SharedState,
    render: &Rc<dyn Fn()>,
    request_basemap: &Rc<dyn Fn()>,
) {
    match event {
        AppEvent::Reports { cause, result } => {
            match cause {
                RefreshCause::Submit => ui.set_submit_in_flight(false),
                RefreshCause::Resolve(_) | RefreshCause::Delete(_) => {
                    shared.admin.borrow_mut().finish_mutation();
                }
                RefreshCause::Startup => {}
            }
            match result {
                Ok(reports) => {
                    if cause == RefreshCause::Submit {
                        // Clear the form before the store notifies its
                        // subscribers, so the render sees the final state.
                        shared.picker.borrow_mut().clear();
                        shared.draft.borrow_mut().reset();
                        ui.set_form_title("".into());
                        ui.set_form_description("".into());
                        ui.set_form_image_name("".into());
                    }
                    let count = reports.len();
                    shared.store.replace(reports);
                    ui.set_status_text(match cause {
                        RefreshCause::Startup => format!("Loaded {count} reports.").into(),
                        RefreshCause::Submit => "Report saved.".into(),
                        RefreshCause::Resolve(id) => {
                            format!("Report {id} marked resolved.").into()
                        }
                        RefreshCause::Delete(id) => format!("Report {id} deleted.").into(),
                    });
                }
                Err(err) => {
                    ui.set_status_text(match cause {
                        RefreshCause::Startup => format!("Failed to load reports: {err}").into(),
                        RefreshCause::Submit => format!("Failed to save report: {err}").into(),
                        RefreshCause::Resolve(id) => {
                            format!("Failed to update report {id}: {err}").into()
                        }
                        RefreshCause::Delete(id) => {
                            format!("Failed to delete report {id}: {err}").into()
                        }
                    });
                    render();
                }
            }
        }
        AppEvent::Route { result } => {
            shared.admin.borrow_mut().finish_route_request();
            ui.set_route_in_flight(false);
            match result {
                Ok(RouteOutcome::Route(stops)) => {
                    let count = stops.len();
                    shared.overlay.borrow_mut().display(stops);
                    ui.set_admin_open(false);
                    render();
                    request_basemap();
                    ui.set_status_text(format!("Route created with {count} stops.").into());
                }
                Ok(RouteOutcome::NoRoute) => {
                    render();
                    ui.set_status_text("No open reports available to create a route.".into());
                }
                Err(err) => {
                    render();
                    ui.set_status_text(format!("Failed to create route: {err}").into());
                }
            }
        }
        AppEvent::Basemap { view_rev, result } => {
            // A pan or zoom after this fetch started makes it stale.
            if view_rev != shared.view_rev.get() {
                return;
            }
            match result {
                Ok(pixmap) => ui.set_basemap(pixmap_to_image(&pixmap)),
                Err(err) => warn!(%err, "basemap render failed, keeping previous tiles"),
            }
        }
        AppEvent::MarkerImage { report_id, result } => {
            if ui.get_detail_report_id() != report_id as i32 {
                return;
            }
            match result {
                Ok(pixmap) => {
                    ui.set_detail_image(pixmap_to_image(&pixmap));
                    ui.set_detail_image_loaded(true);
                }
                Err(err) => warn!(report_id, %err, "photo fetch failed"),
            }
        }
    }
}
