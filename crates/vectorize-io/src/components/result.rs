//! Rendered SVG result with copy and download actions.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdCopy, LdDownload};
use vectorize_core::UploadWidget;

use crate::{clipboard, download};

/// How long the copy confirmation stays visible.
const NOTICE_MILLIS: u32 = 2_000;

/// Props for the [`SvgResult`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SvgResultProps {
    widget: Signal<UploadWidget>,
}

/// Shows the returned SVG inline and as source, with buttons to copy the
/// source and to download it as `generated_image.svg`.
///
/// Renders nothing until the widget holds a result.
#[component]
pub fn SvgResult(props: SvgResultProps) -> Element {
    let widget = props.widget;
    let mut notice = use_signal(|| Option::<String>::None);
    let mut notice_generation = use_signal(|| 0u64);

    let Some(svg) = clipboard::copy_source(&widget.read()) else {
        return rsx! {};
    };

    let mut show_notice = move |text: String| {
        notice_generation += 1;
        let my_generation = *notice_generation.peek();
        notice.set(Some(text));
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_MILLIS).await;
            // A newer notice owns the slot now.
            if *notice_generation.peek() == my_generation {
                notice.set(None);
            }
        });
    };

    let on_copy = move |_| async move {
        let Some(text) = clipboard::copy_source(&widget.read()) else {
            return;
        };
        match clipboard::write_text(&text).await {
            Ok(()) => show_notice("SVG code copied to clipboard!".into()),
            Err(e) => {
                tracing::error!(error = %e, "failed to copy SVG");
                show_notice(format!("Copy failed: {e}"));
            }
        }
    };

    let on_download = move |_| {
        if let Err(e) = download::download_result(&widget.read()) {
            tracing::error!(error = %e, "failed to download SVG");
            show_notice(format!("Download failed: {e}"));
        }
    };

    rsx! {
        div { class: "panel result",
            h2 { class: "result-title", "Generated SVG:" }
            div {
                class: "svg-canvas",
                dangerous_inner_html: "{svg}",
            }

            div { class: "result-source",
                h3 { class: "panel-title", "SVG Code:" }
                textarea {
                    class: "svg-source",
                    readonly: true,
                    value: "{svg}",
                }

                if let Some(ref text) = notice() {
                    p { class: "notice", role: "status", "{text}" }
                }

                div { class: "actions",
                    button {
                        class: "btn btn-copy",
                        onclick: on_copy,
                        Icon { icon: LdCopy, width: 20, height: 20 }
                        span { "Copy SVG Code" }
                    }
                    button {
                        class: "btn btn-download",
                        onclick: on_download,
                        Icon { icon: LdDownload, width: 20, height: 20 }
                        span { "Download SVG" }
                    }
                }
            }
        }
    }
}
