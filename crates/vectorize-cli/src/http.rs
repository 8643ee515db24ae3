//! Native GraphQL client over `reqwest`.

use reqwest::header::CONTENT_TYPE;
use vectorize_core::graphql::{parse_upload_image_response, upload_image_request_body};
use vectorize_core::{ClientConfig, ClientError, GraphqlClient, UploadImageData, UploadImageVariables};

/// Sends `uploadImage` mutations with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestClient {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the TLS backend cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("vectorize/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }
}

impl GraphqlClient for ReqwestClient {
    async fn upload_image(
        &self,
        variables: &UploadImageVariables,
    ) -> Result<UploadImageData, ClientError> {
        let body = upload_image_request_body(variables)?;
        tracing::debug!(endpoint = %self.config.endpoint, bytes = body.len(), "posting uploadImage");

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        parse_upload_image_response(status, &text)
    }
}
