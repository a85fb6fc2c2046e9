use thiserror::Error;

pub const NO_FILE_MESSAGE: &str = "No video file provided";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing the video";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    Transport,
    Protocol,
}

/// Why a submission attempt ended in the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No video file provided")]
    MissingInput,
    #[error("transport failure: {}", .message.as_deref().unwrap_or("no response"))]
    Transport { message: Option<String> },
    #[error("backend rejected upload with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error("malformed upload response: {}", .message.as_deref().unwrap_or("no message"))]
    Malformed { message: Option<String> },
}

impl UploadError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput => ErrorKind::MissingInput,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Rejected { .. } | Self::Malformed { .. } => ErrorKind::Protocol,
        }
    }

    /// Text shown to the user for this failure. Carried text is returned verbatim.
    pub fn user_message(&self) -> String {
        let carried = match self {
            Self::MissingInput => return NO_FILE_MESSAGE.to_string(),
            Self::Transport { message }
            | Self::Rejected { message, .. }
            | Self::Malformed { message } => message.as_deref(),
        };

        carried
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    }
}
