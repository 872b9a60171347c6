//! The backend collaborator: report persistence, status changes and route
//! computation all live behind HTTP.
//!
//! The base URL is injected from configuration so the whole client can run
//! against a mock in tests; nothing in here reads ambient globals.

use crate::state::{NewReport, Report, ReportStatus, RouteStop};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Network unreachable, timeout, or an undecodable response.
    #[error("backend request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status; carries its message.
    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

/// Everything the client asks of the backend. Object safe so the UI wiring
/// can hold an `Arc<dyn Backend>` and tests can substitute a mock.
pub trait Backend: Send + Sync {
    fn fetch_reports(&self) -> Result<Vec<Report>, BackendError>;
    fn create_report(&self, report: &NewReport) -> Result<(), BackendError>;
    fn set_status(&self, id: i64, status: ReportStatus) -> Result<(), BackendError>;
    fn delete_report(&self, id: i64) -> Result<(), BackendError>;
    fn request_route(&self) -> Result<Vec<RouteStop>, BackendError>;
    /// Raw bytes of a report photo, addressed by the `image_url` stored on
    /// the report (a path under the backend origin).
    fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, BackendError>;
}

#[derive(Deserialize)]
struct RouteResponse {
    #[serde(default)]
    route: Vec<RouteStop>,
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mapmywaste/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .ok()
            .and_then(|body| extract_error(&body))
            .unwrap_or_else(|| format!("backend responded with {status}"));
        Err(BackendError::Rejected(message))
    }
}

/// Pulls the `error` field out of a backend failure body, when there is one.
fn extract_error(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(String::from)
}

impl Backend for HttpBackend {
    fn fetch_reports(&self) -> Result<Vec<Report>, BackendError> {
        let response = self.client.get(self.url("/api/reports")).send()?;
        Ok(Self::check(response)?.json()?)
    }

    fn create_report(&self, report: &NewReport) -> Result<(), BackendError> {
        let mut form = reqwest::blocking::multipart::Form::new()
            .text("title", report.title.clone())
            .text("description", report.description.clone())
            .text("latitude", report.latitude.to_string())
            .text("longitude", report.longitude.to_string());
        if let Some(path) = &report.image {
            form = form.file("image", path).map_err(|err| {
                BackendError::Transport(format!("failed to read image attachment: {err}"))
            })?;
        }
        let response = self
            .client
            .post(self.url("/api/reports"))
            .multipart(form)
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn set_status(&self, id: i64, status: ReportStatus) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.url(&format!("/api/reports/{id}/status")))
            .json(&serde_json::json!({ "status": status }))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn delete_report(&self, id: i64) -> Result<(), BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/reports/{id}")))
            .send()?;
        Self::check(response)?;
        Ok(())
    }

    fn request_route(&self) -> Result<Vec<RouteStop>, BackendError> {
        let response = self
            .client
            .post(self.url("/api/route"))
            .json(&serde_json::json!({}))
            .send()?;
        let parsed: RouteResponse = Self::check(response)?.json()?;
        Ok(parsed.route)
    }

    fn fetch_image(&self, image_url: &str) -> Result<Vec<u8>, BackendError> {
        let response = self.client.get(self.url(image_url)).send()?;
        Ok(Self::check(response)?.bytes()?.to_vec())
    }
}
