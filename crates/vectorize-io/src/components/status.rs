//! Error banner for the current upload attempt.

use dioxus::prelude::*;
use vectorize_core::UploadWidget;

/// Props for the [`ErrorBanner`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ErrorBannerProps {
    widget: Signal<UploadWidget>,
}

/// Shows the widget's error message, if any.
#[component]
pub fn ErrorBanner(props: ErrorBannerProps) -> Element {
    let message = props.widget.read().error().map(ToString::to_string);

    rsx! {
        if let Some(message) = message {
            p { class: "error-banner", role: "alert", "{message}" }
        }
    }
}
