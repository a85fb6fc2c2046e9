use async_trait::async_trait;

pub mod address;
pub mod controller;
pub mod transport;
pub mod video;

pub use address::{AddressError, BackendAddress};
pub use controller::{ControllerView, PendingSubmission, SubmissionState, UploadController};
pub use shared::{
    error::{ErrorKind, UploadError, GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE},
    protocol::UploadResponse,
};
pub use transport::{HttpUploadBackend, TransportError};
pub use video::{SelectedVideo, VideoError};

/// Remote processing service the controller submits videos to.
///
/// Implementations issue exactly one request per call and settle exactly once. A decoded
/// 2xx body is returned as-is; judging it against the success contract is the
/// controller's job.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    async fn upload(&self, video: &SelectedVideo) -> Result<UploadResponse, UploadError>;
}
