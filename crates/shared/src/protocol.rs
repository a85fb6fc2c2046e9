use serde::{Deserialize, Serialize};

pub const UPLOAD_PATH: &str = "/upload";
/// Multipart field the backend reads the upload from.
pub const VIDEO_FIELD: &str = "video";
pub const SUCCESS_MESSAGE: &str = "Video processed successfully";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Body returned by `POST /upload`.
///
/// Every field is optional so that partial or failure bodies still decode; whether the
/// body satisfies the success contract is decided by [`UploadResponse::is_well_formed_success`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn success(output_url: impl Into<String>) -> Self {
        Self {
            message: Some(SUCCESS_MESSAGE.to_string()),
            output_url: Some(output_url.into()),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            output_url: None,
            error: None,
        }
    }

    pub fn is_well_formed_success(&self) -> bool {
        self.message.as_deref() == Some(SUCCESS_MESSAGE)
            && self
                .output_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
    }

    /// Backend-provided explanation for a failed upload, if any.
    ///
    /// `message` wins over `error`. The success literal is never reported as a failure.
    pub fn failure_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| *message != SUCCESS_MESSAGE)
            .and_then(non_blank)
            .or_else(|| self.error.as_deref().and_then(non_blank))
    }
}

fn non_blank(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}
