//! Payload encoding: format sniffing, base64, and preview data URIs.
//!
//! Everything here is a pure function over in-memory bytes. Reading the
//! bytes off disk or out of a browser `File` is the caller's job.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as Base64;

use crate::types::{
    Dimensions, EncodedPayload, ImageFormat, LoadedImage, PreviewUrl, SelectedFile, UploadError,
};

/// Advisory upper bound on upload size (5 MiB).
///
/// The service rejects larger images; the client only warns.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Detect PNG or JPEG from the leading magic bytes.
///
/// Returns `None` for empty input, unrecognized data, and recognized
/// formats the service does not accept.
#[must_use]
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .and_then(ImageFormat::from_sniffed)
}

/// Read pixel dimensions from the image header without decoding pixels.
#[must_use]
pub fn read_dimensions(bytes: &[u8], format: ImageFormat) -> Option<Dimensions> {
    image::ImageReader::with_format(Cursor::new(bytes), format.into())
        .into_dimensions()
        .ok()
        .map(|(width, height)| Dimensions { width, height })
}

/// Base64-encode raw file bytes for the `imageData` argument.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> EncodedPayload {
    EncodedPayload::new(Base64.encode(bytes))
}

pub(crate) fn decode_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    Base64.decode(encoded)
}

/// Build the `data:` URI used for the thumbnail.
#[must_use]
pub fn preview_url(format: ImageFormat, payload: &EncodedPayload) -> PreviewUrl {
    PreviewUrl::new(format!(
        "data:{};base64,{}",
        format.mime_type(),
        payload.as_str()
    ))
}

/// Turn a freshly read file into a [`LoadedImage`].
///
/// # Errors
///
/// Returns [`UploadError::UnsupportedFormat`] if the bytes are not a
/// PNG or JPEG.
pub fn load_image(name: &str, bytes: &[u8]) -> Result<LoadedImage, UploadError> {
    let format = detect_format(bytes).ok_or_else(|| UploadError::UnsupportedFormat {
        name: name.to_owned(),
    })?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        tracing::warn!(
            file = name,
            size = bytes.len(),
            limit = MAX_UPLOAD_BYTES,
            "image exceeds the advisory upload size; the service may reject it"
        );
    }

    let payload = encode_payload(bytes);
    let preview = preview_url(format, &payload);
    let file = SelectedFile {
        name: name.to_owned(),
        format,
        size: bytes.len(),
        dimensions: read_dimensions(bytes, format),
    };

    tracing::info!(file = name, %format, size = file.size, "image converted to base64 for upload and preview");

    Ok(LoadedImage {
        file,
        payload,
        preview,
    })
}
