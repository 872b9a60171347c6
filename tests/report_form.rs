mod common;

use common::{report, MockBackend};
use mapmywaste::ops;
use mapmywaste::state::{LatLng, LocationPicker, ReportDraft, ReportStatus, ReportStore};

#[test]
fn missing_location_stops_before_any_network_call() {
    let backend = MockBackend::new(Vec::new());
    let draft = ReportDraft {
        title: "Overflowing bin".to_string(),
        ..Default::default()
    };
    let picker = LocationPicker::new();

    // Validation fails locally; the submission never reaches the backend.
    assert!(draft.validate(picker.selection()).is_err());
    assert_eq!(backend.mutation_count(), 0);
    assert_eq!(backend.fetch_count(), 0);
}

#[test]
fn successful_submission_refreshes_and_resets_the_form() {
    let backend = MockBackend::new(vec![report(1, "existing", ReportStatus::Open)]);
    let store = ReportStore::new();
    let mut picker = LocationPicker::new();
    let mut draft = ReportDraft {
        title: "Tires in the creek".to_string(),
        description: "under the footbridge".to_string(),
        ..Default::default()
    };

    picker.pick(LatLng::new(45.8, 15.97));
    let submission = draft.validate(picker.selection()).unwrap();
    let refreshed = ops::submit_report(&backend, &submission).unwrap();

    // The new report is already in the refetched set.
    assert_eq!(refreshed.len(), 2);
    let created = refreshed.iter().find(|r| r.title == "Tires in the creek").unwrap();
    assert_eq!(created.status, ReportStatus::Open);
    assert!((created.latitude - 45.8).abs() < 1e-9);

    store.replace(refreshed);
    picker.clear();
    draft.reset();

    assert_eq!(picker.selection(), None);
    assert!(draft.title.is_empty());
    assert!(draft.image.is_none());
    assert_eq!(store.counts().total, 2);
}

#[test]
fn failed_submission_keeps_the_draft_for_retry() {
    let backend = MockBackend::new(Vec::new());
    backend.fail_transport();
    let mut picker = LocationPicker::new();
    picker.pick(LatLng::new(1.0, 2.0));
    let draft = ReportDraft {
        title: "Broken glass".to_string(),
        ..Default::default()
    };

    let submission = draft.validate(picker.selection()).unwrap();
    assert!(ops::submit_report(&backend, &submission).is_err());

    // Neither the draft nor the selection is cleared on failure.
    assert_eq!(draft.title, "Broken glass");
    assert_eq!(picker.selection(), Some(LatLng::new(1.0, 2.0)));
}

#[test]
fn a_new_click_replaces_the_pending_selection() {
    let mut picker = LocationPicker::new();
    picker.pick(LatLng::new(10.0, 20.0));
    picker.pick(LatLng::new(11.0, 21.0));
    assert_eq!(picker.selection(), Some(LatLng::new(11.0, 21.0)));
}
