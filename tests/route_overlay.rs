mod common;

use common::{report, stop, MockBackend};
use mapmywaste::geo::Viewport;
use mapmywaste::ops::{self, RouteOutcome};
use mapmywaste::state::{AdminView, LatLng, ReportStatus, RouteOverlay};

#[test]
fn empty_route_leaves_the_overlay_empty() {
    let backend = MockBackend::new(vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::Open),
    ]);
    let mut overlay = RouteOverlay::new();
    let mut view = AdminView::new();

    let reports = ops::refresh(&backend).unwrap();
    assert!(view.begin_route_request(&reports));
    let outcome = ops::request_route(&backend).unwrap();
    view.finish_route_request();

    assert_eq!(outcome, RouteOutcome::NoRoute);
    // Nothing to display; the overlay keeps its prior state.
    assert!(!overlay.is_displayed());
    assert_eq!(overlay.epoch(), 0);
    if let RouteOutcome::Route(stops) = outcome {
        overlay.display(stops);
    }
    assert!(!overlay.is_displayed());
}

#[test]
fn returned_route_is_displayed_and_fitted() {
    let backend = MockBackend::new(vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::Open),
    ])
    .with_route(vec![stop(45.80, 15.96), stop(45.83, 16.01)]);
    let mut overlay = RouteOverlay::new();

    match ops::request_route(&backend).unwrap() {
        RouteOutcome::Route(stops) => overlay.display(stops),
        RouteOutcome::NoRoute => panic!("expected a route"),
    }

    assert!(overlay.is_displayed());
    assert_eq!(overlay.epoch(), 1);

    // The fit puts every stop on screen with padding to spare.
    let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 2.0, 800.0, 600.0);
    let points: Vec<LatLng> = overlay
        .route()
        .unwrap()
        .iter()
        .map(|s| s.position())
        .collect();
    viewport.fit_bounds(&points, 60.0);
    for point in &points {
        let (sx, sy) = viewport.to_screen(*point);
        assert!(sx >= 59.0 && sx <= 741.0, "x out of bounds: {sx}");
        assert!(sy >= 59.0 && sy <= 541.0, "y out of bounds: {sy}");
    }
}

#[test]
fn identical_followup_route_still_forces_a_redraw() {
    let mut overlay = RouteOverlay::new();
    let route = vec![stop(45.80, 15.96), stop(45.83, 16.01)];

    overlay.display(route.clone());
    let first_epoch = overlay.epoch();
    overlay.display(route);
    assert_ne!(overlay.epoch(), first_epoch);
}

#[test]
fn route_request_slot_is_exclusive_until_completion() {
    let reports = vec![
        report(1, "a", ReportStatus::Open),
        report(2, "b", ReportStatus::Open),
    ];
    let mut view = AdminView::new();

    assert!(view.begin_route_request(&reports));
    assert!(view.route_in_flight());
    assert!(!view.begin_route_request(&reports));

    view.finish_route_request();
    assert!(!view.route_in_flight());
    assert!(view.begin_route_request(&reports));
}
