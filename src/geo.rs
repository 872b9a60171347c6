//! Web-Mercator projection and viewport math for the map view.
//!
//! The map works in "world pixels": at zoom z the whole world is a square
//! of 256 * 2^z pixels, the same coordinate space slippy-map tile servers
//! use. The viewport maps a window-sized slice of that square to screen
//! coordinates.

use crate::state::LatLng;
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;

/// Latitudes beyond this fold back onto the projection's edge.
const MAX_LAT: f64 = 85.051_128_78;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Size of the world square in pixels at the given zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projects a coordinate into world pixels at the given zoom.
pub fn project(point: LatLng, zoom: f64) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_LAT, MAX_LAT);
    let x = (point.lon + 180.0) / 360.0 * size;
    let s = lat.to_radians().sin();
    let y = (0.5 - ((1.0 + s) / (1.0 - s)).ln() / (4.0 * PI)) * size;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lon)
}

/// The visible slice of the world: a center coordinate, a zoom level and
/// the screen size in logical pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    pub fn to_screen(&self, point: LatLng) -> (f32, f32) {
        let (cx, cy) = project(self.center, self.zoom);
        let (x, y) = project(point, self.zoom);
        (
            (x - cx + self.width / 2.0) as f32,
            (y - cy + self.height / 2.0) as f32,
        )
    }

    pub fn screen_to_latlng(&self, sx: f64, sy: f64) -> LatLng {
        let (cx, cy) = project(self.center, self.zoom);
        unproject(cx + sx - self.width / 2.0, cy + sy - self.height / 2.0, self.zoom)
    }

    /// Moves the center so the content follows a drag of (dx, dy) screen
    /// pixels.
    pub fn shift(&mut self, dx: f64, dy: f64) {
        let (cx, cy) = project(self.center, self.zoom);
        self.center = unproject(cx - dx, cy - dy, self.zoom);
    }

    pub fn zoom_by(&mut self, steps: i32) {
        self.zoom = (self.zoom + steps as f64).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Adjusts center and zoom so every point is visible with at least
    /// `padding` pixels to the nearest edge. Picks the largest integer zoom
    /// that fits. Runs once per overlay assignment, driven by the overlay
    /// epoch.
    pub fn fit_bounds(&mut self, points: &[LatLng], padding: f64) {
        if points.is_empty() {
            return;
        }
        // Work at a reference zoom; spans scale by powers of two from there.
        let z_ref = 10.0;
        let projected: Vec<(f64, f64)> = points.iter().map(|p| project(*p, z_ref)).collect();
        let min_x = projected.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = projected.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = projected.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = projected.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

        self.center = unproject((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, z_ref);

        let avail_w = (self.width - 2.0 * padding).max(1.0);
        let avail_h = (self.height - 2.0 * padding).max(1.0);
        let span_x = max_x - min_x;
        let span_y = max_y - min_y;

        let mut best = MIN_ZOOM;
        for z in (MIN_ZOOM as i32)..=17 {
            let scale = 2f64.powf(z as f64 - z_ref);
            if span_x * scale <= avail_w && span_y * scale <= avail_h {
                best = z as f64;
            }
        }
        self.zoom = best;
    }
}

/// Builds the SVG-style path commands for a polyline through the given
/// screen-space points, in array order. The path is left open.
pub fn polyline_commands(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }

    let mut commands = format!("M {} {}", points[0].0, points[0].1);
    for point in points.iter().skip(1) {
        commands.push_str(&format!(" L {} {}", point.0, point.1));
    }
    commands
}
