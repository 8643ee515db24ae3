//! File upload zone with drag-and-drop and file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdUpload;
use vectorize_core::{FileReadError, UploadWidget};

/// Value of the picker's `accept` attribute.
const ACCEPT: &str = "image/png, image/jpeg";

/// Props for the [`FileUpload`] component.
#[derive(Props, Clone, PartialEq)]
pub struct FileUploadProps {
    /// The widget a selected file is loaded into.
    widget: Signal<UploadWidget>,
}

/// A drag-and-drop zone with a hidden file picker.
///
/// Selecting a file (via the picker or drag-and-drop) starts a new
/// selection on the widget, reads the bytes, and completes the read.
/// Reads superseded by a later selection are discarded by the widget.
#[component]
pub fn FileUpload(props: FileUploadProps) -> Element {
    let mut widget = props.widget;
    let mut dragging = use_signal(|| false);

    // Shared by the picker and drop paths.
    let process_files = move |files: Vec<FileData>| async move {
        let Some(file) = files.into_iter().next() else {
            widget.write().clear_selection();
            return;
        };
        let ticket = widget.write().select_file(file.name());
        let outcome = file
            .read_bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| FileReadError(e.to_string()));
        widget.write().complete_read(ticket, outcome);
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let label = widget.read().file_name().map(str::to_owned);
    let details = widget.read().file().map(|file| match file.dimensions {
        Some(dims) => format!("{} · {dims} · {} KB", file.format, file.size.div_ceil(1024)),
        None => format!("{} · {} KB", file.format, file.size.div_ceil(1024)),
    });

    let zone_class = if dragging() {
        "upload-zone upload-zone--active"
    } else {
        "upload-zone"
    };

    rsx! {
        label {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            input {
                id: "file-upload",
                r#type: "file",
                accept: ACCEPT,
                class: "hidden",
                onchange: handle_files,
            }

            span { class: "upload-icon",
                Icon { icon: LdUpload, width: 48, height: 48 }
            }

            p { class: "upload-label",
                if let Some(ref name) = label {
                    span { class: "accent", "{name}" }
                } else {
                    span { class: "accent", "Click to upload" }
                    " or drag and drop"
                }
            }

            if let Some(ref details) = details {
                p { class: "hint", "{details}" }
            }

            p { class: "hint", "PNG or JPEG (max 5MB)" }
        }
    }
}
