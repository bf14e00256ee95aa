//! Task operations for HomeView (add, toggle, delete)

use tui_input::Input;

use crate::task::{Decision, DeleteRequest, Resolution};
use crate::tui::dialogs::ConfirmDialog;

use super::{HomeView, StatusKind};

impl HomeView {
    pub(super) fn submit_draft(&mut self) {
        match self.store.add_task() {
            Ok(_) => {
                // The store cleared its draft; mirror that in the widget.
                self.input = Input::default();
                self.status = None;
            }
            Err(e) => {
                // Draft stays as typed so the user can fix it.
                self.set_status(StatusKind::Error, capitalize(&e.to_string()));
            }
        }
    }

    pub(super) fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.store.toggle_completion(id) {
            self.set_status(StatusKind::Error, capitalize(&e.to_string()));
        }
    }

    pub(super) fn request_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match DeleteRequest::new(&self.store, id) {
            Ok(request) => self.confirm_dialog = Some(ConfirmDialog::new(request)),
            Err(e) => self.set_status(StatusKind::Error, capitalize(&e.to_string())),
        }
    }

    pub(super) fn resolve_delete(&mut self, accepted: bool) {
        let Some(dialog) = self.confirm_dialog.take() else {
            return;
        };
        let decision = if accepted {
            Decision::Accept
        } else {
            Decision::Cancel
        };

        match dialog.into_request().resolve(decision, &mut self.store) {
            Ok(Resolution::Removed(task)) => {
                self.clamp_cursor();
                self.set_status(StatusKind::Info, format!("Deleted \"{}\"", task.name.trim()));
            }
            Ok(Resolution::Cancelled) => {}
            Err(e) => {
                tracing::error!("Failed to delete task: {}", e);
                self.set_status(StatusKind::Error, capitalize(&e.to_string()));
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
