use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::UiBridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

/// A pending modal outcome dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone)]
struct BridgeState {
    controls_enabled: bool,
    status_text: String,
    dialogs: VecDeque<Dialog>,
    variant_labels: Option<Vec<String>>,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self {
            controls_enabled: true,
            status_text: String::new(),
            dialogs: VecDeque::new(),
            variant_labels: None,
        }
    }
}

/// What the foreground thread reads on each tick.
#[derive(Debug, Clone)]
pub struct UiSnapshot {
    pub controls_enabled: bool,
    pub status_text: String,
    pub variant_labels: Option<Vec<String>>,
}

/// The [`UiBridge`] the worker thread talks to: a mutex-guarded snapshot the
/// iced update loop polls. The status text is an overwrite-latest slot, not a
/// log; only the most recent value is ever observable.
#[derive(Debug, Default)]
pub struct GuiBridge {
    state: Mutex<BridgeState>,
}

impl GuiBridge {
    pub fn snapshot(&self) -> UiSnapshot {
        let state = self.state.lock().unwrap();
        UiSnapshot {
            controls_enabled: state.controls_enabled,
            status_text: state.status_text.clone(),
            variant_labels: state.variant_labels.clone(),
        }
    }

    /// Hand the oldest pending dialog to the view. Dialogs queue rather than
    /// overwrite, so a warning posted from the foreground cannot swallow an
    /// outcome dialog the view has not collected yet.
    pub fn take_dialog(&self) -> Option<Dialog> {
        self.state.lock().unwrap().dialogs.pop_front()
    }

    fn push_dialog(&self, kind: DialogKind, title: &str, message: &str) {
        self.state.lock().unwrap().dialogs.push_back(Dialog {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl UiBridge for GuiBridge {
    fn disable_controls(&self) {
        self.state.lock().unwrap().controls_enabled = false;
    }

    fn enable_controls(&self) {
        self.state.lock().unwrap().controls_enabled = true;
    }

    fn set_status_text(&self, text: &str) {
        self.state.lock().unwrap().status_text = text.to_string();
    }

    fn show_info(&self, title: &str, message: &str) {
        self.push_dialog(DialogKind::Info, title, message);
    }

    fn show_warning(&self, title: &str, message: &str) {
        self.push_dialog(DialogKind::Warning, title, message);
    }

    fn show_error(&self, title: &str, message: &str) {
        self.push_dialog(DialogKind::Error, title, message);
    }

    fn present_variant_choices(&self, labels: &[String]) {
        self.state.lock().unwrap().variant_labels = Some(labels.to_vec());
    }

    fn hide_variant_choices(&self) {
        self.state.lock().unwrap().variant_labels = None;
    }
}
