//! Dioxus UI components for vectorize.
//!
//! Provides the upload zone, image preview, convert button, error
//! banner, and SVG result panel. Each component reads the shared
//! [`UploadWidget`](vectorize_core::UploadWidget) signal.

mod convert;
mod preview;
mod result;
mod status;
mod upload;

pub use convert::ConvertButton;
pub use preview::ImagePreview;
pub use result::SvgResult;
pub use status::ErrorBanner;
pub use upload::FileUpload;
