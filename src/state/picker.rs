//! The pending map selection for the report form.

use crate::state::LatLng;

/// At most one not-yet-submitted coordinate pair. A new map click always
/// overwrites the previous selection; a successful submission clears it.
#[derive(Debug, Default, Clone)]
pub struct LocationPicker {
    selection: Option<LatLng>,
}

impl LocationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(&mut self, point: LatLng) {
        self.selection = Some(point);
    }

    pub fn clear(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<LatLng> {
        self.selection
    }
}
