//! vectorize-io: Browser I/O and Dioxus component library.
//!
//! Handles file selection, the `fetch`-based GraphQL client, Blob
//! downloads, and clipboard writes, and provides the UI components of
//! the vectorize web application.

pub mod clipboard;
pub mod components;
pub mod download;
pub mod fetch;

pub use components::{ConvertButton, ErrorBanner, FileUpload, ImagePreview, SvgResult};
pub use fetch::FetchClient;
