//! Copying SVG markup to the system clipboard.
//!
//! Uses only the async Clipboard API. Requires a browser environment
//! (`wasm32-unknown-unknown` target) and a user-gesture context (i.e.,
//! called from a click handler).

use vectorize_core::UploadWidget;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Errors that can occur when accessing the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// A browser API call returned an error or a required object was missing.
    #[error("clipboard API error: {0}")]
    JsError(String),
}

impl From<JsValue> for ClipboardError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Copy `text` to the system clipboard.
///
/// Wraps [`navigator.clipboard.writeText()`][mdn].
///
/// # Errors
///
/// Returns [`ClipboardError::JsError`] if the browser window or
/// clipboard object is unavailable, or if the write is rejected (e.g.,
/// the page lacks clipboard-write permission or is not a secure
/// context).
///
/// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Clipboard/writeText
#[allow(clippy::future_not_send)] // WASM is single-threaded; Clipboard is !Send
pub async fn write_text(text: &str) -> Result<(), ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::JsError("no global window".into()))?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await?;
    Ok(())
}

/// Text to copy for the widget's current result.
///
/// Owned so the caller can release its borrow of the widget before
/// awaiting [`write_text`]. `None` means copying is a no-op.
#[must_use]
pub fn copy_source(widget: &UploadWidget) -> Option<String> {
    widget.svg_artifact().map(|artifact| artifact.contents.to_owned())
}
