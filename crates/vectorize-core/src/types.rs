//! Core types for the vectorize upload flow.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// Raster formats the vectorization service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG / JFIF.
    Jpeg,
}

impl ImageFormat {
    /// MIME type used for the preview data URI.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Map a sniffed [`image::ImageFormat`] to an accepted format.
    ///
    /// Returns `None` for anything other than PNG or JPEG.
    #[must_use]
    pub const fn from_sniffed(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            _ => None,
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => Self::Png,
            ImageFormat::Jpeg => Self::Jpeg,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        })
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A user-chosen local image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Filename as reported by the picker (no directory components).
    pub name: String,
    /// Format detected from the file contents.
    pub format: ImageFormat,
    /// Size of the raw file in bytes.
    pub size: usize,
    /// Pixel dimensions, when the header could be decoded.
    pub dimensions: Option<Dimensions>,
}

/// Standard base64 encoding of the selected file's bytes.
///
/// Carries no `data:` prefix; this is exactly what the `imageData`
/// mutation argument expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub(crate) const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decode the payload back into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`base64::DecodeError`] if the payload is not valid
    /// standard base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        crate::encode::decode_base64(&self.0)
    }
}

/// A `data:` URI for rendering a thumbnail of the selected file.
///
/// Purely local; never sent to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewUrl(String);

impl PreviewUrl {
    pub(crate) const fn new(url: String) -> Self {
        Self(url)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A selected file together with everything derived from its bytes.
///
/// The three parts are always created and discarded together so a
/// payload can never outlive (or predate) the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub file: SelectedFile,
    pub payload: EncodedPayload,
    pub preview: PreviewUrl,
}

/// Successful response of the `uploadImage` mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Opaque identifier assigned by the service. Empty if the service
    /// omitted it.
    pub id: String,
    /// Raw SVG markup.
    pub svg_code: String,
}

/// User-facing status derived from [`crate::UploadState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiStatus {
    Idle,
    Loading,
    Error(String),
    Success,
}

/// Failure while reading the selected file from local storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FileReadError(pub String);

impl From<std::io::Error> for FileReadError {
    fn from(err: std::io::Error) -> Self {
        Self(err.to_string())
    }
}

/// Everything that can end an upload attempt.
///
/// The `Display` strings are shown verbatim to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The selected file could not be read.
    #[error("Failed to read file.")]
    FileRead {
        name: String,
        #[source]
        source: FileReadError,
    },

    /// The file was read but is not a PNG or JPEG.
    #[error("Unsupported file type: {name}. Only PNG and JPEG are allowed.")]
    UnsupportedFormat { name: String },

    /// Submission attempted without a selected image.
    #[error("Please select an image first.")]
    Validation,

    /// Submission attempted while a request is already in flight.
    #[error("An upload is already in progress.")]
    Busy,

    /// The GraphQL call failed at the transport or application level.
    #[error("Error: {0}")]
    Remote(#[from] ClientError),

    /// The call succeeded but the response carried no SVG.
    #[error("No SVG code received from the server.")]
    MalformedResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_keeps_message() {
        let err = UploadError::from(ClientError::Graphql("Invalid input: bad".into()));
        assert_eq!(err.to_string(), "Error: Invalid input: bad");
    }

    #[test]
    fn file_read_error_is_generic_but_keeps_source() {
        let err = UploadError::FileRead {
            name: "cat.png".into(),
            source: FileReadError("permission denied".into()),
        };
        assert_eq!(err.to_string(), "Failed to read file.");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("permission denied"));
    }

    #[test]
    fn sniffed_formats_outside_png_jpeg_are_rejected() {
        assert_eq!(
            ImageFormat::from_sniffed(image::ImageFormat::Png),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_sniffed(image::ImageFormat::Jpeg),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_sniffed(image::ImageFormat::Gif), None);
        assert_eq!(ImageFormat::from_sniffed(image::ImageFormat::WebP), None);
    }

    #[test]
    fn dimensions_display() {
        let dims = Dimensions {
            width: 640,
            height: 480,
        };
        assert_eq!(dims.to_string(), "640x480");
    }
}
