//! Route overlay state machine.
//!
//! The overlay is either empty or displaying one route. Every assignment
//! bumps a monotonically increasing epoch; the renderer keys its
//! viewport-fit and redraw on the epoch, never on route contents, so a new
//! route that happens to look like the old one still forces a redraw.

use crate::state::RouteStop;

#[derive(Debug, Default)]
pub struct RouteOverlay {
    route: Option<Vec<RouteStop>>,
    epoch: u64,
}

impl RouteOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displays a freshly computed route, replacing any previous one.
    /// Bumps the epoch unconditionally.
    pub fn display(&mut self, route: Vec<RouteStop>) {
        self.route = Some(route);
        self.epoch += 1;
    }

    pub fn route(&self) -> Option<&[RouteStop]> {
        self.route.as_deref()
    }

    pub fn is_displayed(&self) -> bool {
        self.route.is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
