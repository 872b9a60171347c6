//! Report form: photo attachment and submission.

use crate::backend::Backend;
use crate::callbacks::SharedState;
use crate::events::AppEvent;
use crate::net;
use crate::AppWindow;
use slint::ComponentHandle;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub fn setup_form_callbacks(
    ui: &AppWindow,
    shared: SharedState,
    backend: Arc<dyn Backend>,
    tx: Sender<AppEvent>,
) {
    {
        let shared = shared.clone();
        let ui_weak = ui.as_weak();
        ui.on_pick_image(move || {
            let Some(ui) = ui_weak.upgrade() else {
                return;
            };
            let picked = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                .pick_file();
            if let Some(path) = picked {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                ui.set_form_image_name(name.into());
                shared.draft.borrow_mut().image = Some(path);
            }
        });
    }

    {
        let shared = shared.clone();
        let ui_weak = ui.as_weak();
        ui.on_clear_image(move || {
            shared.draft.borrow_mut().image = None;
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_form_image_name("".into());
            }
        });
    }

    {
        let ui_weak = ui.as_weak();
        ui.on_submit_report(move || {
            let Some(ui) = ui_weak.upgrade() else {
                return;
            };
            if ui.get_submit_in_flight() {
                return;
            }
            // Text fields live in the UI; fold them into the draft before
            // validating.
            {
                let mut draft = shared.draft.borrow_mut();
                draft.title = ui.get_form_title().to_string();
                draft.description = ui.get_form_description().to_string();
            }
            let selection = shared.picker.borrow().selection();
            let submission = match shared.draft.borrow().validate(selection) {
                Ok(submission) => submission,
                Err(err) => {
                    ui.set_status_text(err.to_string().into());
                    return;
                }
            };
            ui.set_submit_in_flight(true);
            ui.set_status_text("Submitting report...".into());
            net::spawn_submit(backend.clone(), tx.clone(), submission);
        });
    }
}
