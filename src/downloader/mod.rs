pub mod cli;

use crate::config::Settings;
use crate::domain::{DownloadError, DownloadRequest, Variant};

/// Receives the downloader's textual progress, one line at a time. Consumers
/// only ever keep the most recent line.
pub trait ProgressSink: Sync {
    fn write(&self, line: &str);
}

/// Arguments shared by every downloader operation: the request fields plus
/// the two settings flags loaded for this attempt.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub input_url: String,
    pub output_path: String,
    pub skip_space_check: bool,
    pub debug: bool,
    pub verify_ssl: bool,
}

impl DownloadJob {
    pub fn new(request: &DownloadRequest, settings: Settings) -> Self {
        Self {
            input_url: request.input_url.clone(),
            output_path: request.output_path.clone(),
            skip_space_check: settings.skip_space_check,
            debug: settings.debug_enabled,
            verify_ssl: request.verify_ssl,
        }
    }
}

/// Contract with the external playlist downloader. The segment fetching and
/// concatenation live entirely behind this trait.
pub trait PlaylistDownloader: Send + Sync {
    /// Download a simple media playlist.
    fn download_playlist(
        &self,
        job: &DownloadJob,
        progress: &dyn ProgressSink,
    ) -> Result<(), DownloadError>;

    /// Download one variant of a master playlist. Called with no selection it
    /// acts as the master probe and is expected to come back with
    /// [`DownloadError::MasterVariants`].
    fn download_master_playlist(
        &self,
        job: &DownloadJob,
        selection: Option<&Variant>,
        progress: &dyn ProgressSink,
    ) -> Result<(), DownloadError>;
}
