use std::{path::Path, time::Duration};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    error::UploadError,
    protocol::{UploadResponse, UPLOAD_PATH, VIDEO_FIELD},
};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use crate::{address::BackendAddress, video::SelectedVideo, UploadBackend};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("download request failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// [`UploadBackend`] speaking the processing service's multipart HTTP contract.
pub struct HttpUploadBackend {
    http: Client,
    address: BackendAddress,
}

impl HttpUploadBackend {
    /// `timeout` bounds each whole request; `None` keeps the transport default.
    pub fn new(address: BackendAddress, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Client)?;
        Ok(Self { http, address })
    }

    pub fn address(&self) -> &BackendAddress {
        &self.address
    }

    /// Streams the artifact at `result_url` into `destination`, returning the bytes written.
    pub async fn download(
        &self,
        result_url: &Url,
        destination: &Path,
    ) -> Result<u64, TransportError> {
        let response = self
            .http
            .get(result_url.clone())
            .send()
            .await?
            .error_for_status()?;

        let written = match write_stream(response, destination).await {
            Ok(written) => written,
            Err(err) => {
                if let Err(error) = tokio::fs::remove_file(destination).await {
                    debug!(
                        destination = %destination.display(),
                        %error,
                        "failed to remove partial download"
                    );
                }
                return Err(err);
            }
        };

        info!(
            %result_url,
            destination = %destination.display(),
            size_bytes = written,
            "downloaded processed video"
        );
        Ok(written)
    }
}

async fn write_stream(
    response: reqwest::Response,
    destination: &Path,
) -> Result<u64, TransportError> {
    let write_err = |source: std::io::Error| TransportError::Write {
        path: destination.to_path_buf(),
        source,
    };
    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(write_err)?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(write_err)?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(write_err)?;
    Ok(written)
}

#[async_trait]
impl UploadBackend for HttpUploadBackend {
    async fn upload(&self, video: &SelectedVideo) -> Result<UploadResponse, UploadError> {
        let endpoint = self
            .address
            .endpoint(UPLOAD_PATH)
            .map_err(|err| UploadError::transport(err.to_string()))?;

        let mut part = Part::stream_with_length(video.payload().clone(), video.len() as u64)
            .file_name(video.file_name().to_string());
        if let Some(mime_type) = video.mime_type() {
            part = part
                .mime_str(mime_type)
                .map_err(|err| UploadError::transport(err.to_string()))?;
        }
        let form = Form::new().part(VIDEO_FIELD, part);

        debug!(
            %endpoint,
            file_name = video.file_name(),
            size_bytes = video.len(),
            "sending upload request"
        );
        let response = self
            .http
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(status = status.as_u16(), body_len = body.len(), "upload response received");

        interpret_http_response(status, &body)
    }
}

fn transport_error(err: reqwest::Error) -> UploadError {
    UploadError::transport(err.to_string())
}

/// Maps status and raw body onto the upload contract.
///
/// Non-2xx is a rejection carrying any `message`/`error` text from the body; a 2xx body
/// that is not a JSON object is malformed.
pub(crate) fn interpret_http_response(
    status: StatusCode,
    body: &[u8],
) -> Result<UploadResponse, UploadError> {
    let parsed = serde_json::from_slice::<serde_json::Value>(body);
    if !status.is_success() {
        return Err(UploadError::Rejected {
            status: status.as_u16(),
            message: parsed
                .ok()
                .filter(serde_json::Value::is_object)
                .and_then(|value| serde_json::from_value::<UploadResponse>(value).ok())
                .and_then(|body| body.failure_message().map(str::to_owned)),
        });
    }

    let value = parsed.map_err(|err| {
        debug!(error = %err, "upload response body is not valid json");
        UploadError::Malformed { message: None }
    })?;
    if !value.is_object() {
        debug!("upload response body is not a json object");
        return Err(UploadError::Malformed { message: None });
    }
    serde_json::from_value(value).map_err(|err| {
        debug!(error = %err, "upload response object has unexpected field types");
        UploadError::Malformed { message: None }
    })
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
