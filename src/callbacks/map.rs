//! Map interaction: pan, zoom, location picking and marker detail.

use crate::backend::Backend;
use crate::callbacks::{DragGesture, SharedState};
use crate::events::AppEvent;
use crate::geo;
use crate::net;
use crate::AppWindow;
use slint::ComponentHandle;
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;

/// Pointer travel below this, in logical pixels, still counts as a click.
const CLICK_SLOP: f32 = 3.0;

pub fn setup_map_callbacks(
    ui: &AppWindow,
    shared: SharedState,
    backend: Arc<dyn Backend>,
    tx: Sender<AppEvent>,
    render: Rc<dyn Fn()>,
    request_basemap: Rc<dyn Fn()>,
) {
    {
        let shared = shared.clone();
        ui.on_map_press(move || {
            let anchor = shared.viewport.borrow().center;
            *shared.drag.borrow_mut() = Some(DragGesture {
                anchor,
                moved: false,
            });
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        ui.on_map_drag(move |dx, dy| {
            let Some(mut gesture) = *shared.drag.borrow() else {
                return;
            };
            if dx.abs() + dy.abs() > CLICK_SLOP {
                gesture.moved = true;
            }
            {
                let mut viewport = shared.viewport.borrow_mut();
                let (ax, ay) = geo::project(gesture.anchor, viewport.zoom);
                viewport.center =
                    geo::unproject(ax - dx as f64, ay - dy as f64, viewport.zoom);
            }
            *shared.drag.borrow_mut() = Some(gesture);
            shared.bump_view();
            render();
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        let request_basemap = request_basemap.clone();
        ui.on_map_release(move |x, y| {
            let Some(gesture) = shared.drag.borrow_mut().take() else {
                return;
            };
            if gesture.moved {
                request_basemap();
                return;
            }
            let point = shared.viewport.borrow().screen_to_latlng(x as f64, y as f64);
            shared.picker.borrow_mut().pick(point);
            render();
        });
    }

    {
        let shared = shared.clone();
        let render = render.clone();
        let request_basemap = request_basemap.clone();
        ui.on_zoom_changed(move |steps| {
            shared.viewport.borrow_mut().zoom_by(steps);
            shared.bump_view();
            render();
            request_basemap();
        });
    }

    {
        let shared = shared.clone();
        let ui_weak = ui.as_weak();
        ui.on_marker_clicked(move |id| {
            let Some(ui) = ui_weak.upgrade() else {
                return;
            };
            let report = shared
                .store
                .with(|reports| reports.iter().find(|r| r.id == id as i64).cloned());
            let Some(report) = report else {
                return;
            };
            ui.set_detail_report_id(id);
            ui.set_detail_title(report.title.clone().into());
            ui.set_detail_description(report.description.clone().into());
            ui.set_detail_status(report.status.as_str().into());
            ui.set_detail_has_image(report.image_url.is_some());
            ui.set_detail_image_loaded(false);
            ui.set_detail_visible(true);
            if let Some(image_url) = report.image_url {
                net::spawn_fetch_photo(backend.clone(), tx.clone(), report.id, image_url);
            }
        });
    }

    {
        let ui_weak = ui.as_weak();
        ui.on_close_detail(move || {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_detail_visible(false);
            }
        });
    }
}
