use std::rc::Rc;

use dioxus::prelude::*;
use vectorize_core::{ClientConfig, UploadWidget};
use vectorize_io::{ConvertButton, ErrorBanner, FetchClient, FileUpload, ImagePreview, SvgResult};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the single [`UploadWidget`] signal and the shared GraphQL client,
/// and wires together the upload zone, preview, convert button, error
/// banner, and result panel.
fn app() -> Element {
    // --- Application state ---
    let widget = use_signal(UploadWidget::new);
    let client = use_hook(|| {
        let config = ClientConfig::default();
        tracing::info!(endpoint = %config.endpoint, "vectorize client configured");
        Rc::new(FetchClient::new(config))
    });

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        main { class: "page",
            div { class: "card",
                h1 { class: "title", "VectorizeNow" }
                p { class: "subtitle",
                    "Image to SVG Converter"
                    span { class: "subtitle-note", "(StarVector Simulation)" }
                }

                div { class: "upload-section",
                    FileUpload { widget }
                    ImagePreview { widget }
                }

                ConvertButton { widget, client }

                ErrorBanner { widget }

                SvgResult { widget }
            }
        }
    }
}
