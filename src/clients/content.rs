//! Byte providers for multipart content uploads.

use std::path::PathBuf;

use crate::clients::errors::HttpError;
use crate::clients::multipart::FilePart;

/// Where the bytes of an upload entry come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentSource {
    /// Read from a file when the upload is prepared.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Vec<u8>),
}

impl ContentSource {
    /// Reads the content into memory.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if a file source cannot be read.
    pub async fn read(self) -> std::io::Result<Vec<u8>> {
        match self {
            Self::Path(path) => tokio::fs::read(path).await,
            Self::Bytes(bytes) => Ok(bytes),
        }
    }
}

impl From<PathBuf> for ContentSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for ContentSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// One entry of a multipart content upload.
///
/// # Example
///
/// ```rust
/// use networking::clients::ContentEntry;
///
/// let entry = ContentEntry::new("clip.mp4", "video/mp4", "/tmp/clip.mp4");
/// assert_eq!(entry.content_type, "video/mp4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentEntry {
    /// The filename sent in the `Content-Disposition` header.
    pub filename: String,
    /// The part's `Content-Type`.
    pub content_type: String,
    /// Where to read the bytes from.
    pub source: ContentSource,
}

impl ContentEntry {
    /// Creates an entry backed by a file path.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            source: ContentSource::Path(path.into()),
        }
    }

    /// Creates an entry backed by in-memory bytes.
    #[must_use]
    pub fn from_bytes(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            source: ContentSource::Bytes(bytes.into()),
        }
    }

    /// Reads the source and turns the entry into a [`FilePart`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ContentSource`] if the source cannot be read.
    pub async fn into_file_part(self) -> Result<FilePart, HttpError> {
        let filename = self.filename;
        let data = self
            .source
            .read()
            .await
            .map_err(|source| HttpError::ContentSource {
                filename: filename.clone(),
                source,
            })?;
        Ok(FilePart::new(filename, self.content_type, data))
    }
}
