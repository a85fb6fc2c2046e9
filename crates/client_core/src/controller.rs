//! Upload controller: file selection, the submission lifecycle and the state the view renders.

use std::sync::Arc;

use shared::error::UploadError;
use shared::protocol::UploadResponse;
use tracing::{debug, info, warn};
use url::Url;

use crate::{address::BackendAddress, video::SelectedVideo, UploadBackend};

/// What the view renders. Exactly one variant is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Processing,
    Success {
        result_url: Url,
    },
    Error {
        message: String,
    },
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

/// Snapshot of everything the view layer needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerView {
    pub state: SubmissionState,
    pub file_name: Option<String>,
    pub can_submit: bool,
}

impl ControllerView {
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn result_url(&self) -> Option<&Url> {
        match &self.state {
            SubmissionState::Success { result_url } => Some(result_url),
            _ => None,
        }
    }
}

/// Ticket for one in-flight upload, handed back to [`UploadController::complete_submit`].
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    generation: u64,
    video: Arc<SelectedVideo>,
}

impl PendingSubmission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn video(&self) -> &SelectedVideo {
        &self.video
    }
}

pub struct UploadController {
    address: BackendAddress,
    selected: Option<Arc<SelectedVideo>>,
    state: SubmissionState,
    // Bumped by every selection and submission; outcomes carrying an older value are dropped.
    generation: u64,
}

impl UploadController {
    pub fn new(address: BackendAddress) -> Self {
        Self {
            address,
            selected: None,
            state: SubmissionState::Idle,
            generation: 0,
        }
    }

    pub fn address(&self) -> &BackendAddress {
        &self.address
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn file_name(&self) -> Option<&str> {
        self.selected.as_deref().map(SelectedVideo::file_name)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn result_url(&self) -> Option<&Url> {
        match &self.state {
            SubmissionState::Success { result_url } => Some(result_url),
            _ => None,
        }
    }

    /// Whether the view should enable its submit trigger.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.state.is_processing()
    }

    pub fn view(&self) -> ControllerView {
        ControllerView {
            state: self.state.clone(),
            file_name: self.file_name().map(str::to_owned),
            can_submit: self.can_submit(),
        }
    }

    /// Stages `video` for upload, replacing any previous file and clearing prior results.
    ///
    /// An upload still in flight is not cancelled, but its outcome will be ignored.
    pub fn select_file(&mut self, video: SelectedVideo) {
        if self.state.is_processing() {
            debug!(
                generation = self.generation,
                "file replaced while processing; abandoning in-flight upload"
            );
        }
        info!(
            file_name = video.file_name(),
            size_bytes = video.len(),
            "video selected"
        );
        self.generation += 1;
        self.selected = Some(Arc::new(video));
        self.state = SubmissionState::Idle;
    }

    /// Synchronous half of a submission.
    ///
    /// Moves to `Processing` and returns the ticket to upload with, or moves to `Error`
    /// and returns `None` when no file is selected.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        self.generation += 1;
        let Some(video) = self.selected.clone() else {
            let err = UploadError::MissingInput;
            warn!(kind = ?err.kind(), error = %err, "submit requested without a selected video");
            self.state = SubmissionState::Error {
                message: err.user_message(),
            };
            return None;
        };

        info!(
            generation = self.generation,
            file_name = video.file_name(),
            backend = %self.address,
            "submitting video"
        );
        self.state = SubmissionState::Processing;
        Some(PendingSubmission {
            generation: self.generation,
            video,
        })
    }

    /// Applies the settled outcome of `ticket`'s upload.
    ///
    /// Returns `false` without touching state when a newer selection or submission has
    /// superseded the ticket.
    pub fn complete_submit(
        &mut self,
        ticket: PendingSubmission,
        outcome: Result<UploadResponse, UploadError>,
    ) -> bool {
        if ticket.generation != self.generation {
            warn!(
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                file_name = ticket.video.file_name(),
                "dropping outcome of superseded upload"
            );
            return false;
        }

        self.state = match outcome.and_then(|response| self.interpret(response)) {
            Ok(result_url) => {
                info!(%result_url, file_name = ticket.video.file_name(), "video processed");
                SubmissionState::Success { result_url }
            }
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "video processing failed");
                SubmissionState::Error {
                    message: err.user_message(),
                }
            }
        };
        true
    }

    /// Runs a whole submission: one backend call between the two halves.
    pub async fn submit(&mut self, backend: &dyn UploadBackend) -> &SubmissionState {
        if let Some(ticket) = self.begin_submit() {
            let outcome = backend.upload(ticket.video()).await;
            self.complete_submit(ticket, outcome);
        }
        &self.state
    }

    fn interpret(&self, response: UploadResponse) -> Result<Url, UploadError> {
        if !response.is_well_formed_success() {
            return Err(UploadError::Malformed {
                message: response.failure_message().map(str::to_owned),
            });
        }

        let output_url = response.output_url.as_deref().unwrap_or_default();
        self.address.resolve(output_url).map_err(|err| {
            debug!(error = %err, output_url, "backend returned unusable output location");
            UploadError::Malformed { message: None }
        })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
