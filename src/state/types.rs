//! Core data types shared between the map view, the admin panel and the
//! backend client.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A WGS84 coordinate pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Lifecycle status of a report. The UI only ever moves reports from
/// `Open` to `Resolved`; `InProgress` is a historical value that older
/// backends may still return and is tolerated on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Open,
    InProgress,
    Resolved,
}

impl ReportStatus {
    pub fn is_resolved(self) -> bool {
        matches!(self, ReportStatus::Resolved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
        }
    }
}

/// A single user-submitted waste report as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: ReportStatus,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Report {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// One stop of a computed collection route. The backend includes the
/// originating report id when it has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    #[serde(default)]
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
}

impl RouteStop {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// A validated, not-yet-persisted report submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: Option<PathBuf>,
}

/// The admin panel's status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Open,
    Resolved,
}

impl StatusFilter {
    /// `Open` passes everything that is not resolved, so historical
    /// `in-progress` reports stay visible under the open filter.
    pub fn allows(self, status: ReportStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Open => !status.is_resolved(),
            StatusFilter::Resolved => status.is_resolved(),
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "open" => StatusFilter::Open,
            "resolved" => StatusFilter::Resolved,
            _ => StatusFilter::All,
        }
    }
}
