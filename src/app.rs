use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use iced::{window, Subscription, Task};

use crate::application::orchestrator::{DOWNLOAD_IN_PROGRESS_MESSAGE, WARNING_TITLE};
use crate::application::{Orchestrator, UiBridge};
use crate::config::CONFIG_FILE;
use crate::domain::DownloadRequest;
use crate::downloader::cli::CliDownloader;
use crate::ui::bridge::GuiBridge;
use crate::ui::{DownloadMessage, DownloadView};
use crate::utils::parse_variant_label;

/// How often the view folds the bridge snapshot in.
const BRIDGE_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct DownloadApp {
    view: DownloadView,
    bridge: Arc<GuiBridge>,
    orchestrator: Arc<Orchestrator>,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let bridge = Arc::new(GuiBridge::default());
        let downloader = Arc::new(CliDownloader::from_env());
        let orchestrator = Arc::new(Orchestrator::new(
            downloader,
            bridge.clone(),
            PathBuf::from(CONFIG_FILE),
        ));

        Self {
            view: DownloadView::default(),
            bridge,
            orchestrator,
        }
    }

    /// Build the request from the current inputs and hand it off. A visible
    /// variant selection re-enters the orchestrator as a master request with
    /// the fields parsed back out of the display label.
    fn start_download(&self) {
        let input_url = self.view.input_url.clone();
        let output_path = self.view.output_path.clone();
        let verify_ssl = !self.view.skip_ssl;

        let selection = self
            .view
            .variant_labels
            .as_ref()
            .and(self.view.selected_variant.as_deref())
            .and_then(parse_variant_label);

        let request = match selection {
            Some(variant) => DownloadRequest::master(input_url, output_path, verify_ssl, variant),
            None => DownloadRequest::plain(input_url, output_path, verify_ssl),
        };

        self.orchestrator.start(request);
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Fold the bridge snapshot into the view.
    Tick,
    /// The user asked to close the window.
    CloseRequested(window::Id),
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            if let DownloadMessage::DownloadPressed = ui_msg {
                app.start_download();
            }
        }
        Message::Tick => {
            let snapshot = app.bridge.snapshot();
            app.view.controls_enabled = snapshot.controls_enabled;
            app.view.status_text = snapshot.status_text;

            match snapshot.variant_labels {
                Some(labels) => {
                    // Preselect the first variant when the list first shows.
                    if app.view.variant_labels.as_ref() != Some(&labels) {
                        app.view.selected_variant = labels.first().cloned();
                    }
                    app.view.variant_labels = Some(labels);
                }
                None => {
                    app.view.variant_labels = None;
                    app.view.selected_variant = None;
                }
            }

            if app.view.dialog.is_none() {
                app.view.dialog = app.bridge.take_dialog();
            }
        }
        Message::CloseRequested(id) => {
            // No cancellation support: the window stays up until the worker
            // is done.
            if app.orchestrator.is_busy() {
                app.bridge
                    .show_warning(WARNING_TITLE, DOWNLOAD_IN_PROGRESS_MESSAGE);
            } else {
                return window::close(id);
            }
        }
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn subscription(_app: &DownloadApp) -> Subscription<Message> {
    Subscription::batch([
        iced::time::every(BRIDGE_POLL_INTERVAL).map(|_| Message::Tick),
        window::close_requests().map(Message::CloseRequested),
    ])
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Mutex};

    use crate::domain::{DownloadError, Variant};
    use crate::downloader::{DownloadJob, PlaylistDownloader, ProgressSink};
    use crate::ui::bridge::DialogKind;

    use super::*;

    /// Succeeds immediately, except that the first call blocks until the
    /// test releases the gate.
    struct GatedDownloader {
        gate: Mutex<Option<mpsc::Receiver<()>>>,
    }

    impl GatedDownloader {
        fn new() -> (Self, mpsc::Sender<()>) {
            let (tx, rx) = mpsc::channel();
            let downloader = Self {
                gate: Mutex::new(Some(rx)),
            };
            (downloader, tx)
        }

        fn pass_gate(&self) {
            if let Some(gate) = self.gate.lock().unwrap().take() {
                let _ = gate.recv();
            }
        }
    }

    impl PlaylistDownloader for GatedDownloader {
        fn download_playlist(
            &self,
            _job: &DownloadJob,
            _progress: &dyn ProgressSink,
        ) -> Result<(), DownloadError> {
            self.pass_gate();
            Ok(())
        }

        fn download_master_playlist(
            &self,
            _job: &DownloadJob,
            _selection: Option<&Variant>,
            _progress: &dyn ProgressSink,
        ) -> Result<(), DownloadError> {
            self.pass_gate();
            Ok(())
        }
    }

    fn gated_app() -> (DownloadApp, mpsc::Sender<()>) {
        let (downloader, release) = GatedDownloader::new();
        let bridge = Arc::new(GuiBridge::default());
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(downloader),
            bridge.clone(),
            PathBuf::from("missing-test-config.json"),
        ));
        let app = DownloadApp {
            view: DownloadView::default(),
            bridge,
            orchestrator,
        };
        (app, release)
    }

    #[test]
    fn close_request_while_downloading_warns_and_leaves_the_worker_alone() {
        let (mut app, release) = gated_app();
        app.view.input_url = "https://x/a.m3u8".into();
        app.view.output_path = "out.mp4".into();

        app.start_download();
        assert!(app.orchestrator.is_busy());

        let _ = update(&mut app, Message::CloseRequested(window::Id::unique()));

        let dialog = app.bridge.take_dialog().expect("warning dialog pending");
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.title, WARNING_TITLE);
        assert_eq!(dialog.message, DOWNLOAD_IN_PROGRESS_MESSAGE);
        // The worker is still running; the download finishes normally once
        // released.
        assert!(app.orchestrator.is_busy());

        release.send(()).unwrap();
        app.orchestrator.join_worker();
        assert!(!app.orchestrator.is_busy());
    }

    #[test]
    fn close_request_while_idle_posts_no_warning() {
        let (mut app, _release) = gated_app();

        let _ = update(&mut app, Message::CloseRequested(window::Id::unique()));

        assert!(!app.orchestrator.is_busy());
        assert!(app.bridge.take_dialog().is_none());
    }
}
