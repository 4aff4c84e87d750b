use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::config::Settings;
use crate::domain::{DownloadError, DownloadPhase, DownloadRequest};
use crate::downloader::{DownloadJob, PlaylistDownloader, ProgressSink};
use crate::utils::format_variant_label;

use super::bridge::UiBridge;

pub const WARNING_TITLE: &str = "Warning";
pub const ERROR_TITLE: &str = "Error";
pub const DOWNLOAD_COMPLETE_TITLE: &str = "Download";
pub const DOWNLOAD_COMPLETE_MESSAGE: &str = "Download completed successfully!";
pub const INVALID_INPUT_MESSAGE: &str = "Please provide both input url and output file.";
pub const DOWNLOAD_IN_PROGRESS_MESSAGE: &str =
    "Download is in progress and cannot be interrupted!";
pub const MASTER_IDENTIFIED_TITLE: &str = "Master Playlist";
pub const MASTER_IDENTIFIED_MESSAGE: &str =
    "Identified m3u8 file as master playlist. Select appropriate configuration for download.";

/// Drives one download attempt at a time through the external downloader.
///
/// At most one worker thread is alive per instance; the same aliveness check
/// rejects a second download and guards application shutdown. There is no
/// cancellation: a started worker runs to completion or dies.
pub struct Orchestrator {
    downloader: Arc<dyn PlaylistDownloader>,
    bridge: Arc<dyn UiBridge>,
    config_path: PathBuf,
    phase: Mutex<DownloadPhase>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// Forwards downloader progress lines into the bridge's status slot.
struct StatusRedirector<'a> {
    bridge: &'a dyn UiBridge,
}

impl ProgressSink for StatusRedirector<'_> {
    fn write(&self, line: &str) {
        self.bridge.set_status_text(line);
    }
}

/// Re-enables the input controls on every exit path out of the worker,
/// including an unwinding one.
struct ControlsGuard {
    bridge: Arc<dyn UiBridge>,
}

impl Drop for ControlsGuard {
    fn drop(&mut self) {
        self.bridge.enable_controls();
    }
}

impl Orchestrator {
    pub fn new(
        downloader: Arc<dyn PlaylistDownloader>,
        bridge: Arc<dyn UiBridge>,
        config_path: PathBuf,
    ) -> Self {
        Self {
            downloader,
            bridge,
            config_path,
            phase: Mutex::new(DownloadPhase::Idle),
            worker: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> DownloadPhase {
        *self.phase.lock().unwrap()
    }

    fn set_phase(&self, phase: DownloadPhase) {
        log::debug!("download phase -> {phase:?}");
        *self.phase.lock().unwrap() = phase;
    }

    /// True while a worker thread is still running. Checked both at the
    /// download entry point and when the user tries to close the window.
    pub fn is_busy(&self) -> bool {
        self.worker
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Begin one download attempt on a background worker.
    ///
    /// Invalid requests are rejected synchronously with a warning dialog and
    /// never spawn a thread; so is a request made while a worker is alive.
    pub fn start(self: &Arc<Self>, request: DownloadRequest) {
        if request.input_url.trim().is_empty() || request.output_path.trim().is_empty() {
            self.bridge.show_warning(WARNING_TITLE, INVALID_INPUT_MESSAGE);
            return;
        }
        if request.is_master
            && request
                .variant
                .as_ref()
                .is_none_or(|variant| variant.name.is_empty())
        {
            self.bridge.show_warning(WARNING_TITLE, INVALID_INPUT_MESSAGE);
            return;
        }

        let mut worker = self.worker.lock().unwrap();
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            self.bridge
                .show_warning(WARNING_TITLE, DOWNLOAD_IN_PROGRESS_MESSAGE);
            return;
        }

        self.set_phase(DownloadPhase::Running);
        let this = Arc::clone(self);
        *worker = Some(std::thread::spawn(move || this.run_attempt(request)));
    }

    fn run_attempt(&self, request: DownloadRequest) {
        let _controls = ControlsGuard {
            bridge: Arc::clone(&self.bridge),
        };

        let settings = match Settings::load(&self.config_path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("settings load failed: {e}");
                self.fail(e.to_string());
                return;
            }
        };

        self.bridge.disable_controls();
        let progress = StatusRedirector {
            bridge: self.bridge.as_ref(),
        };

        let job = DownloadJob::new(&request, settings);
        log::info!("downloading {} -> {}", job.input_url, job.output_path);

        let first = if request.is_master {
            self.downloader
                .download_master_playlist(&job, request.variant.as_ref(), &progress)
        } else {
            self.downloader.download_playlist(&job, &progress)
        };

        match first {
            Ok(()) => self.complete(),
            Err(DownloadError::MasterVariants(variants)) => self.await_choice(variants),
            Err(err) if err.indicates_master() => self.probe_master(&job, &progress),
            Err(err) if err.indicates_media() => {
                // The variant-specific request hit a plain playlist after
                // all; retry once as plain. A second misclassification in
                // either direction is fatal.
                self.bridge.hide_variant_choices();
                match self.downloader.download_playlist(&job, &progress) {
                    Ok(()) => self.complete(),
                    Err(err) => self.fail(err.to_string()),
                }
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    /// Ask the downloader which variants the master playlist offers, then
    /// hand the formatted labels to the bridge and wait for a selection.
    fn probe_master(&self, job: &DownloadJob, progress: &dyn ProgressSink) {
        match self.downloader.download_master_playlist(job, None, progress) {
            Err(DownloadError::MasterVariants(variants)) => self.await_choice(variants),
            Ok(()) => self.complete(),
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn await_choice(&self, variants: Vec<crate::domain::Variant>) {
        let labels: Vec<String> = variants.iter().map(format_variant_label).collect();
        self.set_phase(DownloadPhase::AwaitingVariantChoice);
        self.bridge
            .show_info(MASTER_IDENTIFIED_TITLE, MASTER_IDENTIFIED_MESSAGE);
        self.bridge.present_variant_choices(&labels);
    }

    fn complete(&self) {
        self.set_phase(DownloadPhase::Completed);
        self.bridge
            .show_info(DOWNLOAD_COMPLETE_TITLE, DOWNLOAD_COMPLETE_MESSAGE);
    }

    fn fail(&self, message: String) {
        log::error!("download failed: {message}");
        self.set_phase(DownloadPhase::Failed);
        self.bridge.show_error(ERROR_TITLE, &message);
    }

    /// Block until the current worker (if any) finishes. Test hook.
    #[cfg(test)]
    pub(crate) fn join_worker(&self) {
        let handle = self.worker.lock().unwrap().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}
