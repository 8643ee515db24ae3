//! The "Convert to SVG" button.

use std::rc::Rc;

use dioxus::prelude::*;
use vectorize_core::UploadWidget;

use crate::fetch::FetchClient;

/// Props for the [`ConvertButton`] component.
#[derive(Props, Clone)]
pub struct ConvertButtonProps {
    widget: Signal<UploadWidget>,
    /// Shared client handle created once by the app.
    client: Rc<FetchClient>,
}

impl PartialEq for ConvertButtonProps {
    fn eq(&self, other: &Self) -> bool {
        self.widget == other.widget && Rc::ptr_eq(&self.client, &other.client)
    }
}

/// Submits the loaded image and shows a spinner while the request is in
/// flight.
///
/// The button is disabled while loading and until a file is loaded,
/// which is what keeps requests from overlapping.
#[component]
pub fn ConvertButton(props: ConvertButtonProps) -> Element {
    let mut widget = props.widget;
    let loading = widget.read().is_loading();
    let enabled = widget.read().can_submit();

    let on_click = {
        let client = Rc::clone(&props.client);
        move |_| {
            // A validation failure is recorded on the widget and shown
            // by the error banner.
            let Ok(request) = widget.write().begin_upload() else {
                return;
            };
            let client = Rc::clone(&client);
            spawn(async move {
                let response = request.send(client.as_ref()).await;
                widget.write().complete_upload(response);
            });
        }
    };

    rsx! {
        button {
            class: if enabled { "btn btn-primary" } else { "btn btn-primary btn-disabled" },
            disabled: !enabled,
            onclick: on_click,
            if loading {
                span { class: "spinner", aria_hidden: "true" }
                "Converting..."
            } else {
                "Convert to SVG"
            }
        }
    }
}
