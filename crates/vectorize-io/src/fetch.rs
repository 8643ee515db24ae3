//! GraphQL client backed by the browser `fetch` API.

use vectorize_core::graphql::{parse_upload_image_response, upload_image_request_body};
use vectorize_core::{ClientConfig, ClientError, GraphqlClient, UploadImageData, UploadImageVariables};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Sends `uploadImage` mutations with `window.fetch`.
///
/// Created once at app startup and shared with every upload.
#[derive(Debug, Clone)]
pub struct FetchClient {
    config: ClientConfig,
}

impl FetchClient {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[allow(clippy::future_not_send)]
    async fn post(&self, body: &str) -> Result<(u16, String), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(&self.config.endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        let text = JsFuture::from(response.text()?).await?;
        Ok((response.status(), text.as_string().unwrap_or_default()))
    }
}

impl GraphqlClient for FetchClient {
    #[allow(clippy::future_not_send)]
    async fn upload_image(
        &self,
        variables: &UploadImageVariables,
    ) -> Result<UploadImageData, ClientError> {
        let body = upload_image_request_body(variables)?;
        tracing::debug!(endpoint = %self.config.endpoint, bytes = body.len(), "posting uploadImage");
        let (status, text) = self
            .post(&body)
            .await
            .map_err(|e| ClientError::Transport(js_error_message(&e)))?;
        parse_upload_image_response(status, &text)
    }
}

/// Human-readable message of a rejected promise.
///
/// `fetch` rejects with a `TypeError` whose `message` ("Failed to
/// fetch", "NetworkError when attempting to fetch resource.") is what
/// the user should see.
fn js_error_message(value: &JsValue) -> String {
    value.dyn_ref::<js_sys::Error>().map_or_else(
        || value.as_string().unwrap_or_else(|| format!("{value:?}")),
        |err| String::from(err.message()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_configured_endpoint() {
        let client = FetchClient::new(ClientConfig {
            endpoint: "https://vectorize.example/graphql".into(),
        });
        assert_eq!(client.config().endpoint, "https://vectorize.example/graphql");
        assert_eq!(
            FetchClient::new(ClientConfig::default()).config().endpoint,
            ClientConfig::DEFAULT_ENDPOINT
        );
    }
}
