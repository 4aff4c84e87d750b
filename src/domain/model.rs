use serde::{Deserialize, Serialize};

/// One selectable quality option inside a master playlist.
///
/// Produced transiently from the downloader's master probe; it only lives for
/// the duration of one user-selection round trip and is re-derived from the
/// formatted display string when the user submits a choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Variant {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(default)]
    pub bandwidth: String,
    #[serde(default)]
    pub resolution: String,
}

/// Everything needed for one download attempt. Immutable once the worker
/// thread starts.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub input_url: String,
    pub output_path: String,
    pub verify_ssl: bool,
    pub is_master: bool,
    /// Always present (with a non-empty name) when `is_master` is true.
    pub variant: Option<Variant>,
}

impl DownloadRequest {
    pub fn plain(input_url: String, output_path: String, verify_ssl: bool) -> Self {
        Self {
            input_url,
            output_path,
            verify_ssl,
            is_master: false,
            variant: None,
        }
    }

    pub fn master(
        input_url: String,
        output_path: String,
        verify_ssl: bool,
        variant: Variant,
    ) -> Self {
        Self {
            input_url,
            output_path,
            verify_ssl,
            is_master: true,
            variant: Some(variant),
        }
    }
}

/// What kind of playlist a URL turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Media,
    Master,
}

impl std::fmt::Display for PlaylistKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaylistKind::Media => write!(f, "playlist"),
            PlaylistKind::Master => write!(f, "master playlist"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPhase {
    Idle,
    Running,
    AwaitingVariantChoice,
    Completed,
    Failed,
}
