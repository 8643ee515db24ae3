//! The injected GraphQL client seam.
//!
//! [`UploadWidget`](crate::UploadWidget) never talks to the network
//! itself. Front ends hand an [`UploadRequest`](crate::UploadRequest) to
//! a [`GraphqlClient`]; the browser build uses `fetch`, the CLI uses
//! `reqwest`, and tests use an in-memory double.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::graphql::{UploadImageData, UploadImageVariables};

/// Connection settings for the vectorization service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Absolute URL of the GraphQL endpoint.
    pub endpoint: String,
}

impl ClientConfig {
    /// Default GraphQL endpoint of a locally running service.
    pub const DEFAULT_ENDPOINT: &'static str = "http://127.0.0.1:8000/graphql";
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

/// Errors reported by a [`GraphqlClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, CORS, offline).
    #[error("{0}")]
    Transport(String),

    /// The service answered with one or more GraphQL errors.
    #[error("{0}")]
    Graphql(String),

    /// The service answered with a non-success status and no GraphQL body.
    #[error("server responded with HTTP status {0}")]
    Status(u16),

    /// The response body could not be understood.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A handle capable of executing the `uploadImage` mutation.
///
/// Futures are not required to be `Send`: browser clients hold
/// `JsValue`s across await points.
pub trait GraphqlClient {
    /// Execute `uploadImage(imageData)` and return its selection set.
    fn upload_image(
        &self,
        variables: &UploadImageVariables,
    ) -> impl Future<Output = Result<UploadImageData, ClientError>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_points_at_local_service() {
        assert_eq!(
            ClientConfig::default().endpoint,
            "http://127.0.0.1:8000/graphql"
        );
    }

    #[test]
    fn config_json_fills_missing_fields() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config: ClientConfig =
            serde_json::from_str(r#"{"endpoint":"https://vectorize.example/graphql"}"#).unwrap();
        assert_eq!(config.endpoint, "https://vectorize.example/graphql");
    }
}
