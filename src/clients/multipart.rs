//! `multipart/form-data` body assembly.
//!
//! File parts always use the form field name [`FILE_FIELD_NAME`]; only the
//! filename varies between entries. Parts are written in the order supplied,
//! file parts first, then field parts, then the terminating boundary.
//!
//! # Example
//!
//! ```rust
//! use networking::clients::{FilePart, MultipartEncoder};
//!
//! let files = [FilePart::new("photo.jpg", "image/jpeg", vec![0xFF, 0xD8])];
//! let fields = [("caption".to_string(), "hi".to_string())];
//!
//! let body = MultipartEncoder::encode(&files, &fields);
//! assert!(body.content_type().starts_with("multipart/form-data; boundary=B-"));
//! assert!(body.body.ends_with(format!("--{}--\r\n", body.boundary).as_bytes()));
//! ```

use uuid::Uuid;

/// Form field name shared by every file part.
pub const FILE_FIELD_NAME: &str = "files";

const LINE_BREAK: &str = "\r\n";

/// A file entry in a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// The filename sent in the `Content-Disposition` header.
    pub filename: String,
    /// The part's `Content-Type`.
    pub content_type: String,
    /// The raw file bytes.
    pub data: Vec<u8>,
}

impl FilePart {
    /// Creates a file part.
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// An encoded multipart body and the boundary separating its parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultipartBody {
    /// The boundary token, without the leading dashes.
    pub boundary: String,
    /// The encoded body.
    pub body: Vec<u8>,
}

impl MultipartBody {
    /// Returns the `Content-Type` header value announcing this body.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Returns the encoded body size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Encoder for `multipart/form-data` bodies.
#[derive(Clone, Copy, Debug, Default)]
pub struct MultipartEncoder;

impl MultipartEncoder {
    /// Encodes file and field parts under a freshly generated boundary.
    #[must_use]
    pub fn encode(files: &[FilePart], fields: &[(String, String)]) -> MultipartBody {
        Self::encode_with_boundary(Self::create_boundary(), files, fields)
    }

    /// Encodes file and field parts under the given boundary.
    ///
    /// The caller is responsible for choosing a boundary that does not occur
    /// in any part's content.
    #[must_use]
    pub fn encode_with_boundary(
        boundary: impl Into<String>,
        files: &[FilePart],
        fields: &[(String, String)],
    ) -> MultipartBody {
        let boundary = boundary.into();
        let mut body = Vec::new();

        for file in files {
            body.extend_from_slice(boundary_line(&boundary, false).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{FILE_FIELD_NAME}\"; filename=\"{}\"{LINE_BREAK}",
                    file.filename
                )
                .as_bytes(),
            );
            body.extend_from_slice(
                format!("Content-Type: {}{LINE_BREAK}{LINE_BREAK}", file.content_type).as_bytes(),
            );
            body.extend_from_slice(&file.data);
            body.extend_from_slice(LINE_BREAK.as_bytes());
        }

        for (name, value) in fields {
            body.extend_from_slice(boundary_line(&boundary, false).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"{LINE_BREAK}{LINE_BREAK}"
                )
                .as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(LINE_BREAK.as_bytes());
        }

        body.extend_from_slice(boundary_line(&boundary, true).as_bytes());

        MultipartBody { boundary, body }
    }

    /// Generates a unique boundary token.
    #[must_use]
    pub fn create_boundary() -> String {
        format!("B-{}", Uuid::new_v4().hyphenated().to_string().to_uppercase())
    }
}

fn boundary_line(boundary: &str, terminating: bool) -> String {
    let end = if terminating { "--" } else { "" };
    format!("--{boundary}{end}{LINE_BREAK}")
}
