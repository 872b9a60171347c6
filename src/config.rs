use crate::tiles::DEFAULT_TILE_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_center_lat() -> f64 {
    20.0
}

fn default_center_lon() -> f64 {
    0.0
}

fn default_zoom() -> f64 {
    2.0
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
        }
    }
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "mapmywaste")?;
    Some(dirs.config_dir().join("config.toml"))
}

/// Load configuration from file, or return defaults if the file is missing
/// or unparseable. Environment variables override the file.
pub fn load_config() -> AppConfig {
    let mut config = match config_path() {
        Some(path) if path.exists() => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!(%err, "failed to parse config file, using defaults");
                    AppConfig::default()
                }
            },
            Err(err) => {
                warn!(%err, "failed to read config file, using defaults");
                AppConfig::default()
            }
        },
        _ => AppConfig::default(),
    };

    if let Ok(base_url) = std::env::var("MAPMYWASTE_BACKEND") {
        config.backend.base_url = base_url;
    }
    if let Ok(tile_url) = std::env::var("MAPMYWASTE_TILE_URL") {
        config.map.tile_url = tile_url;
    }

    config
}
