pub mod error;
pub mod model;

pub use error::DownloadError;
pub use model::{DownloadPhase, DownloadRequest, PlaylistKind, Variant};
