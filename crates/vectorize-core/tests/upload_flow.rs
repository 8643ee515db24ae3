//! Integration test: drive the widget through the begin/complete API the
//! way the web front end does, with the request awaited outside any
//! borrow of the widget.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};

use vectorize_core::graphql::{parse_upload_image_response, upload_image_request_body};
use vectorize_core::{
    ClientError, Completion, GraphqlClient, UiStatus, UploadImageData, UploadImageVariables,
    UploadWidget,
};

/// Client double that answers from canned HTTP bodies, exercising the
/// same parsing path as the real transports.
struct CannedHttpClient {
    status: u16,
    body: &'static str,
    calls: Cell<usize>,
    last_body: RefCell<Option<String>>,
}

impl CannedHttpClient {
    const fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: Cell::new(0),
            last_body: RefCell::new(None),
        }
    }
}

impl GraphqlClient for CannedHttpClient {
    async fn upload_image(
        &self,
        variables: &UploadImageVariables,
    ) -> Result<UploadImageData, ClientError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_body.borrow_mut() = Some(upload_image_request_body(variables)?);
        parse_upload_image_response(self.status, self.body)
    }
}

fn sample_png() -> Vec<u8> {
    let img = image::RgbaImage::from_fn(10, 10, |x, y| {
        if (x + y) % 3 == 0 {
            image::Rgba([200, 30, 30, 255])
        } else {
            image::Rgba([255, 255, 255, 255])
        }
    });
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgba8,
    )
    .unwrap();
    buf
}

#[tokio::test]
async fn select_submit_download_round_trip() {
    let bytes = sample_png();
    let client = CannedHttpClient::new(
        200,
        r#"{"data":{"uploadImage":{"id":"some-mock-uuid-12345","svgCode":"<svg width='10' height='10'/>"}}}"#,
    );

    let mut widget = UploadWidget::new();
    let ticket = widget.select_file("swatch.png");
    assert_eq!(widget.complete_read(ticket, Ok(bytes.clone())), Completion::Applied);
    assert_eq!(
        widget.file().and_then(|f| f.dimensions).map(|d| d.to_string()),
        Some("10x10".to_owned())
    );

    let request = widget.begin_upload().unwrap();
    assert_eq!(widget.status(), UiStatus::Loading);
    let response = request.send(&client).await;
    assert_eq!(widget.complete_upload(response), Completion::Applied);

    assert_eq!(client.calls.get(), 1);
    let sent: serde_json::Value =
        serde_json::from_str(client.last_body.borrow().as_deref().unwrap()).unwrap();
    let image_data = sent["variables"]["imageData"].as_str().unwrap();
    assert_eq!(image_data, widget.payload().unwrap().as_str());
    assert_eq!(widget.payload().unwrap().decode().unwrap(), bytes);

    assert_eq!(widget.status(), UiStatus::Success);
    assert_eq!(widget.result().unwrap().id, "some-mock-uuid-12345");
    let artifact = widget.svg_artifact().unwrap();
    assert_eq!(artifact.filename, "generated_image.svg");
    assert_eq!(artifact.contents, "<svg width='10' height='10'/>");
}

#[tokio::test]
async fn resolver_error_surfaces_message() {
    let client = CannedHttpClient::new(
        400,
        r#"{"errors":[{"message":"Invalid input: Image processing failed: Image size exceeds 5MB limit."}]}"#,
    );
    let mut widget = UploadWidget::new();
    let ticket = widget.select_file("swatch.png");
    widget.complete_read(ticket, Ok(sample_png()));

    let err = widget.submit_upload(&client).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error: Invalid input: Image processing failed: Image size exceeds 5MB limit."
    );
    assert!(!widget.is_loading());
    assert!(widget.result().is_none());
}

#[tokio::test]
async fn response_for_superseded_upload_is_dropped() {
    let client = CannedHttpClient::new(200, r#"{"data":{"uploadImage":{"id":"1","svgCode":"<svg/>"}}}"#);
    let mut widget = UploadWidget::new();
    let ticket = widget.select_file("one.png");
    widget.complete_read(ticket, Ok(sample_png()));

    let first = widget.begin_upload().unwrap();
    let ticket = widget.select_file("two.png");
    widget.complete_read(ticket, Ok(sample_png()));
    let second = widget.begin_upload().unwrap();

    let late = first.send(&client).await;
    assert_eq!(widget.complete_upload(late), Completion::Stale);
    assert!(widget.is_loading());

    let fresh = second.send(&client).await;
    assert_eq!(widget.complete_upload(fresh), Completion::Applied);
    assert_eq!(widget.file_name(), Some("two.png"));
    assert_eq!(widget.status(), UiStatus::Success);
}
