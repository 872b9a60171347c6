//! The report form's local draft, independent of the report store.

use crate::state::{LatLng, NewReport};
use std::path::PathBuf;

/// Validation failures caught before any network call. The messages are
/// shown verbatim on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Click the map to pick a location first.")]
    NoLocation,
    #[error("Give the report a title.")]
    EmptyTitle,
}

#[derive(Debug, Default, Clone)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub image: Option<PathBuf>,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the draft to the pending selection. Fails locally, leaving the
    /// draft untouched, when no location has been picked or the title is
    /// blank.
    pub fn validate(&self, location: Option<LatLng>) -> Result<NewReport, DraftError> {
        let location = location.ok_or(DraftError::NoLocation)?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        Ok(NewReport {
            title: title.to_string(),
            description: self.description.clone(),
            latitude: location.lat,
            longitude: location.lon,
            image: self.image.clone(),
        })
    }

    /// Back to empty values after a successful submission.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
