//! Admin panel: filtering, search, resolve, delete and route requests.

use crate::backend::Backend;
use crate::callbacks::SharedState;
use crate::events::AppEvent;
use crate::net;
use crate::state::StatusFilter;
use crate::AppWindow;
use slint::ComponentHandle;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub fn setup_admin_callbacks(
    ui: &AppWindow,
    shared: SharedState,
    backend: Arc<dyn Backend>,
    tx: Sender<AppEvent>,
    render: Rc<dyn Fn()>,
) {
    {
        let ui_weak = ui.as_weak();
        let render = render.clone();
        ui.on_open_admin(move || {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_admin_open(true);
                render();
            }
        });
    }

    {
        // Closing the panel never touches the route overlay; a displayed
        // route stays on the map.
        let ui_weak = ui.as_weak();
        ui.on_close_admin(move || {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_admin_open(false);
            }
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        ui.on_filter_changed(move |label| {
            shared.admin.borrow_mut().filter = StatusFilter::from_label(&label);
            render();
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        ui.on_search_changed(move |text| {
            shared.admin.borrow_mut().search = text.to_string();
            render();
        });
    }

    {
        let shared = shared.clone();
        let backend = backend.clone();
        let tx = tx.clone();
        let render = render.clone();
        let ui_weak = ui.as_weak();
        ui.on_resolve_report(move |id| {
            if !shared.admin.borrow_mut().begin_mutation(id as i64) {
                return;
            }
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_status_text(format!("Resolving report {id}...").into());
            }
            render();
            net::spawn_resolve(backend.clone(), tx.clone(), id as i64);
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        ui.on_request_delete(move |id| {
            shared.admin.borrow_mut().request_delete(id as i64);
            render();
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        ui.on_cancel_delete(move || {
            shared.admin.borrow_mut().cancel_delete();
            render();
        });
    }

    {
        let shared = shared.clone();
        let backend = backend.clone();
        let tx = tx.clone();
        let render = render.clone();
        let ui_weak = ui.as_weak();
        ui.on_confirm_delete(move |id| {
            {
                let mut admin = shared.admin.borrow_mut();
                if !admin.confirm_delete(id as i64) || !admin.begin_mutation(id as i64) {
                    return;
                }
            }
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_status_text(format!("Deleting report {id}...").into());
            }
            render();
            net::spawn_delete(backend.clone(), tx.clone(), id as i64);
        });
    }

    {
        let ui_weak = ui.as_weak();
        ui.on_create_route(move || {
            {
                let reports = shared.store.snapshot();
                if !shared.admin.borrow_mut().begin_route_request(&reports) {
                    return;
                }
            }
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_route_in_flight(true);
                ui.set_status_text("Computing collection route...".into());
            }
            render();
            net::spawn_route(backend.clone(), tx.clone());
        });
    }
}
