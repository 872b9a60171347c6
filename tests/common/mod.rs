#![allow(dead_code)]

use mapmywaste::backend::{Backend, BackendError};
use mapmywaste::state::{NewReport, Report, ReportStatus, RouteStop};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the HTTP backend. Mutations apply to the held
/// report set so a follow-up fetch observes them, mirroring the real
/// mutate-then-refetch flow.
pub struct MockBackend {
    reports: Mutex<Vec<Report>>,
    route: Mutex<Vec<RouteStop>>,
    next_id: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
    fail_transport: AtomicBool,
}

impl MockBackend {
    pub fn new(reports: Vec<Report>) -> Self {
        let next_id = reports.iter().map(|r| r.id).max().unwrap_or(0) as usize + 1;
        Self {
            reports: Mutex::new(reports),
            route: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(next_id),
            fetch_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
            fail_transport: AtomicBool::new(false),
        }
    }

    pub fn with_route(self, route: Vec<RouteStop>) -> Self {
        *self.route.lock().unwrap() = route;
        self
    }

    pub fn fail_transport(&self) {
        self.fail_transport.store(true, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn mutation_count(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    fn check_transport(&self) -> Result<(), BackendError> {
        if self.fail_transport.load(Ordering::SeqCst) {
            Err(BackendError::Transport("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

impl Backend for MockBackend {
    fn fetch_reports(&self) -> Result<Vec<Report>, BackendError> {
        self.check_transport()?;
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reports.lock().unwrap().clone())
    }

    fn create_report(&self, report: &NewReport) -> Result<(), BackendError> {
        self.check_transport()?;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.reports.lock().unwrap().push(Report {
            id,
            title: report.title.clone(),
            description: report.description.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            status: ReportStatus::Open,
            image_url: None,
        });
        Ok(())
    }

    fn set_status(&self, id: i64, status: ReportStatus) -> Result<(), BackendError> {
        self.check_transport()?;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut reports = self.reports.lock().unwrap();
        match reports.iter_mut().find(|r| r.id == id) {
            Some(report) => {
                report.status = status;
                Ok(())
            }
            None => Err(BackendError::Rejected("report not found".to_string())),
        }
    }

    fn delete_report(&self, id: i64) -> Result<(), BackendError> {
        self.check_transport()?;
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut reports = self.reports.lock().unwrap();
        let before = reports.len();
        reports.retain(|r| r.id != id);
        if reports.len() == before {
            return Err(BackendError::Rejected("report not found".to_string()));
        }
        Ok(())
    }

    fn request_route(&self) -> Result<Vec<RouteStop>, BackendError> {
        self.check_transport()?;
        Ok(self.route.lock().unwrap().clone())
    }

    fn fetch_image(&self, _image_url: &str) -> Result<Vec<u8>, BackendError> {
        Err(BackendError::Rejected("no image store".to_string()))
    }
}

pub fn report(id: i64, title: &str, status: ReportStatus) -> Report {
    Report {
        id,
        title: title.to_string(),
        description: String::new(),
        latitude: 45.0 + id as f64 * 0.01,
        longitude: 15.9 + id as f64 * 0.01,
        status,
        image_url: None,
    }
}

pub fn stop(lat: f64, lon: f64) -> RouteStop {
    RouteStop {
        id: None,
        latitude: lat,
        longitude: lon,
    }
}
