//! Static basemap rendering: fetches slippy-map tiles for the current
//! viewport and composites them into one RGBA image.
//!
//! Runs on a worker thread; the result crosses back to the UI thread as a
//! plain pixel buffer and is converted to a `slint::Image` there.

use crate::geo::{self, Viewport, TILE_SIZE};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// A decoded RGBA image, 4 bytes per pixel, row major.
#[derive(Debug, Clone)]
pub struct Pixmap {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub struct TileFetcher {
    template: String,
    client: reqwest::blocking::Client,
}

impl TileFetcher {
    pub fn new(template: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mapmywaste/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            template: template.into(),
            client,
        }
    }

    /// Renders the basemap for a viewport. Individual tile failures leave a
    /// gray gap; only a fully failed fetch is an error, so the caller keeps
    /// its previous background.
    pub fn render(&self, viewport: &Viewport) -> Result<Pixmap, String> {
        let width = viewport.width.round().max(1.0) as u32;
        let height = viewport.height.round().max(1.0) as u32;
        let zoom = viewport.zoom.round().clamp(geo::MIN_ZOOM, geo::MAX_ZOOM) as i64;
        let n = 1i64 << zoom;

        let (cx, cy) = geo::project(viewport.center, zoom as f64);
        let origin_x = cx - viewport.width / 2.0;
        let origin_y = cy - viewport.height / 2.0;

        let mut canvas = vec![0u8; (width as usize) * (height as usize) * 4];
        for pixel in canvas.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[224, 228, 230, 255]);
        }

        let tx0 = (origin_x / TILE_SIZE).floor() as i64;
        let tx1 = ((origin_x + viewport.width) / TILE_SIZE).floor() as i64;
        let ty0 = (origin_y / TILE_SIZE).floor() as i64;
        let ty1 = ((origin_y + viewport.height) / TILE_SIZE).floor() as i64;

        let mut fetched = 0usize;
        let mut attempted = 0usize;
        for ty in ty0..=ty1 {
            if ty < 0 || ty >= n {
                continue;
            }
            for tx in tx0..=tx1 {
                let wrapped_tx = ((tx % n) + n) % n;
                attempted += 1;
                let url = build_tile_url(&self.template, zoom, wrapped_tx, ty);
                match self.fetch_tile(&url) {
                    Ok(tile) => {
                        let ox = (tx as f64 * TILE_SIZE - origin_x).round() as i64;
                        let oy = (ty as f64 * TILE_SIZE - origin_y).round() as i64;
                        copy_tile(&mut canvas, width, height, &tile, ox, oy);
                        fetched += 1;
                    }
                    Err(err) => debug!(url, %err, "tile fetch failed"),
                }
            }
        }

        if fetched == 0 && attempted > 0 {
            return Err("no map tiles could be fetched".to_string());
        }

        Ok(Pixmap {
            rgba: canvas,
            width,
            height,
        })
    }

    fn fetch_tile(&self, url: &str) -> Result<Pixmap, String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| format!("request error: {err}"))?;
        if !response.status().is_success() {
            return Err(format!("tile server responded with {}", response.status()));
        }
        let bytes = response
            .bytes()
            .map_err(|err| format!("failed to read tile response: {err}"))?;
        decode_image(&bytes)
    }
}

/// Decodes an encoded image (PNG/JPEG) into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> Result<Pixmap, String> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|err| format!("failed to decode image: {err}"))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(Pixmap {
        rgba: decoded.into_raw(),
        width,
        height,
    })
}

/// Converts a pixel buffer into a `slint::Image` on the UI thread.
pub fn pixmap_to_image(pixmap: &Pixmap) -> slint::Image {
    let mut buffer =
        slint::SharedPixelBuffer::<slint::Rgba8Pixel>::new(pixmap.width, pixmap.height);
    buffer.make_mut_bytes().copy_from_slice(&pixmap.rgba);
    slint::Image::from_rgba8(buffer)
}

/// Interpolates a slippy-map URL template with tile indices.
fn build_tile_url(template: &str, zoom: i64, x: i64, y: i64) -> String {
    let mut values: HashMap<&str, String> = HashMap::new();
    values.insert("z", zoom.to_string());
    values.insert("zoom", zoom.to_string());
    values.insert("x", x.to_string());
    values.insert("y", y.to_string());
    values.insert("r", String::new());
    if template.contains("{s}") {
        values.insert("s", "a".to_string());
    }

    let mut url = template.to_string();
    for (key, value) in &values {
        url = url.replace(&format!("{{{key}}}"), value);
    }
    url
}

/// Blits a tile onto the canvas at offset (ox, oy), clipping at the edges.
fn copy_tile(canvas: &mut [u8], canvas_w: u32, canvas_h: u32, tile: &Pixmap, ox: i64, oy: i64) {
    for row in 0..tile.height as i64 {
        let dy = oy + row;
        if dy < 0 || dy >= canvas_h as i64 {
            continue;
        }
        let src_start = (row * tile.width as i64).max(0) as usize * 4;
        // Horizontal clip.
        let dst_x0 = ox.max(0);
        let dst_x1 = (ox + tile.width as i64).min(canvas_w as i64);
        if dst_x0 >= dst_x1 {
            continue;
        }
        let src_x0 = (dst_x0 - ox) as usize;
        let count = (dst_x1 - dst_x0) as usize;

        let src = &tile.rgba[src_start + src_x0 * 4..src_start + (src_x0 + count) * 4];
        let dst_start = (dy as usize * canvas_w as usize + dst_x0 as usize) * 4;
        canvas[dst_start..dst_start + count * 4].copy_from_slice(src);
    }
}
