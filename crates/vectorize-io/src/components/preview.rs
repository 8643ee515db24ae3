//! Thumbnail of the selected image.

use dioxus::prelude::*;
use vectorize_core::UploadWidget;

/// Props for the [`ImagePreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePreviewProps {
    widget: Signal<UploadWidget>,
}

/// Shows the selected image from its `data:` URI.
///
/// Renders nothing until a file has been read.
#[component]
pub fn ImagePreview(props: ImagePreviewProps) -> Element {
    let src = props
        .widget
        .read()
        .preview()
        .map(|preview| preview.as_str().to_owned());

    rsx! {
        if let Some(src) = src {
            div { class: "panel",
                h2 { class: "panel-title", "Image Preview:" }
                img {
                    src: "{src}",
                    alt: "Selected Preview",
                    class: "preview-image",
                }
            }
        }
    }
}
