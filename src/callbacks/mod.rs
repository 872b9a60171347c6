//! UI callback wiring. Each submodule installs the handlers for one area
//! of the window; all of them share the same [`SharedState`].

pub mod admin;
pub mod form;
pub mod map;

use crate::config::AppConfig;
use crate::geo::Viewport;
use crate::state::{
    AdminView, LatLng, LocationPicker, ReportDraft, ReportStore, RouteOverlay,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// An in-progress map drag. `moved` flips once the pointer travels far
/// enough that the release should not count as a location pick.
#[derive(Debug, Clone, Copy)]
pub struct DragGesture {
    pub anchor: LatLng,
    pub moved: bool,
}

/// Everything the callbacks and the event pump share on the UI thread.
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct SharedState {
    pub store: Rc<ReportStore>,
    pub picker: Rc<RefCell<LocationPicker>>,
    pub draft: Rc<RefCell<ReportDraft>>,
    pub overlay: Rc<RefCell<RouteOverlay>>,
    pub admin: Rc<RefCell<AdminView>>,
    pub viewport: Rc<RefCell<Viewport>>,
    /// Bumped on every pan or zoom; stale basemap results carry the old
    /// value and are dropped.
    pub view_rev: Rc<Cell<u64>>,
    /// Overlay epoch the viewport was last fitted for.
    pub last_fit_epoch: Rc<Cell<u64>>,
    pub drag: Rc<RefCell<Option<DragGesture>>>,
}

impl SharedState {
    pub fn new(config: &AppConfig) -> Self {
        let center = LatLng::new(config.map.center_lat, config.map.center_lon);
        Self {
            store: Rc::new(ReportStore::new()),
            picker: Rc::new(RefCell::new(LocationPicker::new())),
            draft: Rc::new(RefCell::new(ReportDraft::new())),
            overlay: Rc::new(RefCell::new(RouteOverlay::new())),
            admin: Rc::new(RefCell::new(AdminView::new())),
            viewport: Rc::new(RefCell::new(Viewport::new(
                center,
                config.map.zoom,
                800.0,
                600.0,
            ))),
            view_rev: Rc::new(Cell::new(0)),
            last_fit_epoch: Rc::new(Cell::new(0)),
            drag: Rc::new(RefCell::new(None)),
        }
    }

    /// Invalidates any basemap fetch still in flight and returns the new
    /// revision to tag the next one with.
    pub fn bump_view(&self) -> u64 {
        let rev = self.view_rev.get() + 1;
        self.view_rev.set(rev);
        rev
    }
}
