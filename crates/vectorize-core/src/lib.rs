//! vectorize-core: Upload state machine and payload encoding (sans-IO).
//!
//! Turns a user-selected PNG or JPEG into the base64 `imageData` argument
//! of the `uploadImage` GraphQL mutation and tracks one upload attempt
//! from selection to SVG result:
//!
//! select -> read -> encode -> submit -> response -> download / copy
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! bytes and hands requests to an injected [`GraphqlClient`]. Browser
//! and filesystem interaction lives in `vectorize-io` and
//! `vectorize-cli`.

pub mod client;
pub mod encode;
pub mod graphql;
pub mod types;
pub mod widget;

pub use client::{ClientConfig, ClientError, GraphqlClient};
pub use graphql::{UploadImageData, UploadImageVariables};
pub use types::{
    Dimensions, EncodedPayload, FileReadError, ImageFormat, LoadedImage, PreviewUrl, SelectedFile,
    UiStatus, UploadError, UploadResult,
};
pub use widget::{
    Completion, DEFAULT_DOWNLOAD_FILENAME, ReadTicket, SVG_MIME_TYPE, SvgArtifact, UploadRequest,
    UploadResponse, UploadState, UploadTicket, UploadWidget,
};
