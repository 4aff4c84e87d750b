use thiserror::Error;

use super::model::{PlaylistKind, Variant};

/// Everything the external downloader can report back.
///
/// The wrong-kind redirections are first-class variants rather than magic
/// message strings, but `Display` keeps the historical phrasing so that
/// downloaders which only hand back free text still classify the same way.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DownloadError {
    #[error("invalid download request: {0}")]
    Validation(String),

    #[error("I/O failure: {0}")]
    Io(String),

    /// The URL was the other kind of playlist; retry it as `expected`.
    #[error("identified input as {expected}")]
    WrongKind { expected: PlaylistKind },

    /// Not a failure: the master probe found these variants and the user
    /// has to pick one before the download can continue.
    #[error("master playlist variants available for selection")]
    MasterVariants(Vec<Variant>),

    /// Free-text error from the downloader, surfaced verbatim unless the
    /// message matches one of the legacy redirection substrings.
    #[error("{0}")]
    Downloader(String),
}

impl DownloadError {
    /// True when the downloader is telling us the URL is really a master
    /// playlist and we should probe it for variants.
    pub fn indicates_master(&self) -> bool {
        match self {
            DownloadError::WrongKind {
                expected: PlaylistKind::Master,
            } => true,
            DownloadError::Downloader(message) => message.contains("as master playlist"),
            _ => false,
        }
    }

    /// True when the downloader is telling us the URL is really a simple
    /// media playlist even though a variant-specific request was issued.
    pub fn indicates_media(&self) -> bool {
        match self {
            DownloadError::WrongKind {
                expected: PlaylistKind::Media,
            } => true,
            DownloadError::Downloader(message) => {
                message.contains("as playlist") && !message.contains("as master playlist")
            }
            _ => false,
        }
    }
}
