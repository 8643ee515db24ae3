//! File download via Blob URLs.
//!
//! Dioxus has no built-in file download API.  This module triggers
//! downloads by creating a `Blob`, generating an object URL, and
//! programmatically clicking a temporary `<a>` element.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use vectorize_core::{SvgArtifact, UploadWidget};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when triggering a file download.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Save the widget's SVG result as `generated_image.svg`.
///
/// Returns `Ok(false)` without touching the DOM when there is no result.
///
/// # Errors
///
/// Propagates [`DownloadError`] from [`trigger_download`].
pub fn download_result(widget: &UploadWidget) -> Result<bool, DownloadError> {
    let Some(artifact) = widget.svg_artifact() else {
        return Ok(false);
    };
    download_artifact(&artifact)?;
    tracing::info!(filename = artifact.filename, "SVG download triggered");
    Ok(true)
}

/// Trigger a download of an [`SvgArtifact`].
///
/// # Errors
///
/// Propagates [`DownloadError`] from [`trigger_download`].
pub fn download_artifact(artifact: &SvgArtifact<'_>) -> Result<(), DownloadError> {
    trigger_download(artifact.contents, artifact.filename, artifact.mime_type)
}

/// Trigger a file download in the browser.
///
/// Creates a `Blob` from `data`, generates an object URL, and
/// programmatically clicks a temporary `<a download="filename">` element.
/// The object URL is revoked afterwards, also when the click could not
/// be performed.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if any browser API call fails
/// (e.g., `Blob` creation, `URL.createObjectURL`, element creation).
pub fn trigger_download(data: &str, filename: &str, mime_type: &str) -> Result<(), DownloadError> {
    let window =
        web_sys::window().ok_or_else(|| DownloadError::JsError("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| DownloadError::JsError("no document".into()))?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(data));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    with_object_url(
        &url,
        |href| click_anchor(&document, href, filename),
        |href| {
            if let Err(e) = web_sys::Url::revoke_object_url(href) {
                tracing::debug!(error = ?e, "failed to revoke object URL");
            }
        },
    )
}

/// Run `action` with `url`, then `revoke` it regardless of the outcome.
fn with_object_url<T, E>(
    url: &str,
    action: impl FnOnce(&str) -> Result<T, E>,
    revoke: impl FnOnce(&str),
) -> Result<T, E> {
    let outcome = action(url);
    revoke(url);
    outcome
}

fn click_anchor(
    document: &web_sys::Document,
    href: &str,
    filename: &str,
) -> Result<(), DownloadError> {
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|e| DownloadError::JsError(format!("failed to cast element: {e:?}")))?;
    anchor.set_href(href);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| DownloadError::JsError("no document body".into()))?;
    body.append_child(&anchor)?;
    anchor.click();

    // The download has already started.
    if let Err(e) = body.remove_child(&anchor) {
        tracing::debug!(error = ?e, "failed to remove download anchor");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use vectorize_core::{UploadImageData, UploadResponse};

    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn download_without_result_touches_nothing() {
        assert!(!download_result(&UploadWidget::new()).unwrap());

        let mut widget = UploadWidget::new();
        let ticket = widget.select_file("tiny.png");
        widget.complete_read(ticket, Ok(PNG_SIGNATURE.to_vec()));
        assert!(widget.can_submit());
        assert!(!download_result(&widget).unwrap());

        let request = widget.begin_upload().unwrap();
        widget.complete_upload(UploadResponse {
            ticket: request.ticket,
            outcome: Ok(UploadImageData::default()),
        });
        assert!(widget.error().is_some());
        assert!(!download_result(&widget).unwrap());
    }

    #[test]
    fn object_url_is_revoked_after_success() {
        let revoked = RefCell::new(Vec::new());
        let outcome: Result<u8, DownloadError> = with_object_url(
            "blob:ok",
            |_| Ok(7),
            |href| revoked.borrow_mut().push(href.to_owned()),
        );
        assert_eq!(outcome.unwrap(), 7);
        assert_eq!(*revoked.borrow(), ["blob:ok"]);
    }

    #[test]
    fn object_url_is_revoked_when_the_click_fails() {
        let revoked = RefCell::new(Vec::new());
        let outcome: Result<(), DownloadError> = with_object_url(
            "blob:failed",
            |_| Err(DownloadError::JsError("no document body".into())),
            |href| revoked.borrow_mut().push(href.to_owned()),
        );
        assert!(matches!(outcome, Err(DownloadError::JsError(m)) if m == "no document body"));
        assert_eq!(*revoked.borrow(), ["blob:failed"]);
    }
}
