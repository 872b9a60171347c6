use mapmywaste::backend::{Backend, HttpBackend};
use mapmywaste::callbacks::{self, SharedState};
use mapmywaste::config;
use mapmywaste::events::{self, RefreshCause};
use mapmywaste::geo;
use mapmywaste::net;
use mapmywaste::state::AdminView;
use mapmywaste::tiles::TileFetcher;
use mapmywaste::{AdminRow, AppWindow, MarkerView};
use slint::{ComponentHandle, ModelRc, VecModel};
use std::rc::Rc;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const FIT_PADDING: f64 = 60.0;

fn marker_color(resolved: bool) -> slint::Color {
    if resolved {
        slint::Color::from_rgb_u8(52, 168, 83)
    } else {
        slint::Color::from_rgb_u8(234, 67, 53)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapmywaste=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::load_config();
    info!(backend = %config.backend.base_url, "starting");

    let ui = AppWindow::new()?;
    let shared = SharedState::new(&config);
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config.backend.base_url));
    let fetcher = Arc::new(TileFetcher::new(&config.map.tile_url));
    let (tx, rx) = mpsc::channel();

    let render = make_render(&ui, shared.clone());
    let request_basemap: Rc<dyn Fn()> = {
        let shared = shared.clone();
        let fetcher = fetcher.clone();
        let tx = tx.clone();
        Rc::new(move || {
            let viewport = *shared.viewport.borrow();
            net::spawn_fetch_basemap(
                fetcher.clone(),
                tx.clone(),
                viewport,
                shared.view_rev.get(),
            );
        })
    };

    // Every store replace re-renders all views from the new snapshot.
    {
        let render = render.clone();
        shared.store.subscribe(move || render());
    }

    callbacks::map::setup_map_callbacks(
        &ui,
        shared.clone(),
        backend.clone(),
        tx.clone(),
        render.clone(),
        request_basemap.clone(),
    );
    callbacks::form::setup_form_callbacks(&ui, shared.clone(), backend.clone(), tx.clone());
    callbacks::admin::setup_admin_callbacks(
        &ui,
        shared.clone(),
        backend.clone(),
        tx.clone(),
        render.clone(),
    );

    net::spawn_fetch_reports(backend.clone(), tx.clone(), RefreshCause::Startup);

    // The map area has no size until the first layout pass; fetch the
    // initial basemap shortly after startup instead of immediately.
    {
        let render = render.clone();
        let request_basemap = request_basemap.clone();
        slint::Timer::single_shot(Duration::from_millis(200), move || {
            render();
            request_basemap();
        });
    }

    let _event_pump = events::start_event_pump(&ui, rx, shared, render.clone(), request_basemap);

    render();
    ui.run()?;
    Ok(())
}

/// Builds the render closure: projects the current shared state into the
/// window's properties and models. Everything is recomputed from the store
/// snapshot; no view keeps derived state of its own.
fn make_render(ui: &AppWindow, shared: SharedState) -> Rc<dyn Fn()> {
    let ui_weak = ui.as_weak();
    Rc::new(move || {
        let Some(ui) = ui_weak.upgrade() else {
            return;
        };

        {
            let mut viewport = shared.viewport.borrow_mut();
            let width = ui.get_map_width() as f64;
            let height = ui.get_map_height() as f64;
            if width >= 32.0 && height >= 32.0 {
                viewport.width = width;
                viewport.height = height;
            }

            // Fit once per route assignment, keyed on the overlay epoch.
            let overlay = shared.overlay.borrow();
            if overlay.epoch() != shared.last_fit_epoch.get() {
                if let Some(stops) = overlay.route() {
                    let points: Vec<_> = stops.iter().map(|s| s.position()).collect();
                    viewport.fit_bounds(&points, FIT_PADDING);
                    shared.bump_view();
                }
                shared.last_fit_epoch.set(overlay.epoch());
            }
        }

        let viewport = *shared.viewport.borrow();
        let reports = shared.store.snapshot();

        let markers: Vec<MarkerView> = reports
            .iter()
            .map(|report| {
                let (px, py) = viewport.to_screen(report.position());
                MarkerView {
                    id: report.id as i32,
                    px,
                    py,
                    color: marker_color(report.status.is_resolved()),
                    title: report.title.clone().into(),
                }
            })
            .collect();
        ui.set_markers(ModelRc::new(VecModel::from(markers)));

        match shared.picker.borrow().selection() {
            Some(point) => {
                let (px, py) = viewport.to_screen(point);
                ui.set_pending_px(px);
                ui.set_pending_py(py);
                ui.set_has_pending_selection(true);
                ui.set_selection_text(format!("{:.5}, {:.5}", point.lat, point.lon).into());
            }
            None => {
                ui.set_has_pending_selection(false);
                ui.set_selection_text("none".into());
            }
        }

        {
            let overlay = shared.overlay.borrow();
            match overlay.route() {
                Some(stops) => {
                    let points: Vec<(f32, f32)> = stops
                        .iter()
                        .map(|stop| viewport.to_screen(stop.position()))
                        .collect();
                    ui.set_route_commands(geo::polyline_commands(&points).into());
                    ui.set_route_epoch(overlay.epoch() as i32);
                    ui.set_route_visible(true);
                }
                None => {
                    ui.set_route_visible(false);
                    ui.set_route_commands("".into());
                }
            }
        }

        let admin = shared.admin.borrow();
        let busy = admin.mutation_in_flight().is_some();
        let rows: Vec<AdminRow> = admin
            .visible(&reports)
            .into_iter()
            .map(|report| AdminRow {
                id: report.id as i32,
                title: report.title.clone().into(),
                lat_text: format!("{:.5}", report.latitude).into(),
                lon_text: format!("{:.5}", report.longitude).into(),
                status: report.status.as_str().into(),
                has_image: report.image_url.is_some(),
                resolvable: !report.status.is_resolved(),
                pending_delete: admin.pending_delete() == Some(report.id),
                busy,
            })
            .collect();
        ui.set_admin_rows(ModelRc::new(VecModel::from(rows)));

        let counts = shared.store.counts();
        ui.set_counts_text(
            format!(
                "{} total · {} open · {} resolved",
                counts.total, counts.open, counts.resolved
            )
            .into(),
        );
        ui.set_route_button_enabled(
            AdminView::can_request_route(&reports) && !admin.route_in_flight(),
        );
    })
}
