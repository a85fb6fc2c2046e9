use std::{
    fmt,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("path '{}' has no file name", .0.display())]
    MissingFileName(PathBuf),
    #[error("failed to read video file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file staged for upload: its bytes plus the name shown to the user.
///
/// The MIME type is a hint guessed from the file name. Nothing here rejects non-video
/// content.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedVideo {
    file_name: String,
    mime_type: Option<String>,
    bytes: Bytes,
}

impl SelectedVideo {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            file_name,
            mime_type,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, VideoError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| VideoError::MissingFileName(path.to_path_buf()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| VideoError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the payload; cloning it does not copy the bytes.
    pub fn payload(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SelectedVideo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedVideo")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_mime_type_from_name() {
        let video = SelectedVideo::new("clip.mp4", vec![1u8, 2, 3]);
        assert_eq!(video.mime_type(), Some("video/mp4"));
        assert_eq!(video.len(), 3);
    }

    #[test]
    fn accepts_files_of_any_type() {
        let video = SelectedVideo::new("notes", b"plain".to_vec());
        assert_eq!(video.mime_type(), None);
        assert_eq!(video.file_name(), "notes");
    }

    #[tokio::test]
    async fn reads_bytes_and_name_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("holiday.mov");
        tokio::fs::write(&path, b"moov").await.expect("write");

        let video = SelectedVideo::from_path(&path).await.expect("load");
        assert_eq!(video.file_name(), "holiday.mov");
        assert_eq!(video.bytes(), b"moov");
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.mp4");

        let err = SelectedVideo::from_path(&path).await.expect_err("must fail");
        assert!(matches!(err, VideoError::Read { .. }));
        assert!(err.to_string().contains("absent.mp4"));
    }
}
