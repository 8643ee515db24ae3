//! Wire types for the `uploadImage` GraphQL mutation.
//!
//! Request bodies follow the standard GraphQL-over-HTTP JSON shape
//! (`query`, `variables`, `operationName`). Response parsing is split
//! from transport so the browser and native clients share it.

use serde::{Deserialize, Serialize};

use crate::client::ClientError;

/// The mutation document sent with every upload.
pub const UPLOAD_IMAGE_MUTATION: &str = "mutation UploadImage($imageData: String!) {
  uploadImage(imageData: $imageData) {
    id
    svgCode
  }
}";

/// Operation name matching [`UPLOAD_IMAGE_MUTATION`].
pub const UPLOAD_IMAGE_OPERATION: &str = "UploadImage";

/// Variables for the `uploadImage` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageVariables {
    /// Base64 image bytes without a `data:` prefix.
    pub image_data: String,
}

/// The `uploadImage` selection set as returned by the service.
///
/// Both fields are nullable in the schema; deciding whether a missing
/// `svgCode` is an error is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageData {
    pub id: Option<String>,
    pub svg_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: V,
    operation_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadImageField {
    upload_image: Option<UploadImageData>,
}

/// Serialize the JSON request body for an upload.
///
/// # Errors
///
/// Returns [`ClientError::InvalidResponse`] only if serde fails, which
/// for these plain string fields does not happen in practice.
pub fn upload_image_request_body(variables: &UploadImageVariables) -> Result<String, ClientError> {
    let request = GraphqlRequest {
        query: UPLOAD_IMAGE_MUTATION,
        variables,
        operation_name: UPLOAD_IMAGE_OPERATION,
    };
    serde_json::to_string(&request)
        .map_err(|e| ClientError::InvalidResponse(format!("failed to serialize request: {e}")))
}

/// Interpret an HTTP status and body returned for an upload.
///
/// GraphQL `errors` take precedence over the status code, since the
/// service reports resolver failures as HTTP 400 with an `errors` array.
/// A response without an `uploadImage` field yields an all-`None`
/// [`UploadImageData`].
///
/// # Errors
///
/// - [`ClientError::Graphql`] when the body carries GraphQL errors.
/// - [`ClientError::Status`] for a non-success status without errors.
/// - [`ClientError::InvalidResponse`] when a success body is not JSON.
pub fn parse_upload_image_response(status: u16, body: &str) -> Result<UploadImageData, ClientError> {
    let success = (200..300).contains(&status);
    let parsed = match serde_json::from_str::<GraphqlResponse<UploadImageField>>(body) {
        Ok(parsed) => parsed,
        Err(_) if !success => return Err(ClientError::Status(status)),
        Err(e) => return Err(ClientError::InvalidResponse(e.to_string())),
    };

    if !parsed.errors.is_empty() {
        let joined = parsed
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::Graphql(joined));
    }
    if !success {
        return Err(ClientError::Status(status));
    }

    Ok(parsed
        .data
        .and_then(|d| d.upload_image)
        .unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_graphql_shape() {
        let vars = UploadImageVariables {
            image_data: "aGVsbG8=".into(),
        };
        let body = upload_image_request_body(&vars).unwrap();
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["operationName"], "UploadImage");
        assert_eq!(json["variables"]["imageData"], "aGVsbG8=");
        let query = json["query"].as_str().unwrap();
        assert!(query.starts_with("mutation UploadImage($imageData: String!)"));
        assert!(query.contains("svgCode"));
    }

    #[test]
    fn parses_successful_payload() {
        let body = r#"{"data":{"uploadImage":{"id":"1","svgCode":"<svg/>"}}}"#;
        let data = parse_upload_image_response(200, body).unwrap();
        assert_eq!(data.id.as_deref(), Some("1"));
        assert_eq!(data.svg_code.as_deref(), Some("<svg/>"));
    }

    #[test]
    fn missing_field_is_not_an_error_here() {
        let data = parse_upload_image_response(200, r#"{"data":{"uploadImage":null}}"#).unwrap();
        assert_eq!(data, UploadImageData::default());

        let data = parse_upload_image_response(200, r#"{"data":null}"#).unwrap();
        assert_eq!(data, UploadImageData::default());
    }

    #[test]
    fn graphql_errors_win_over_status() {
        let body = r#"{"errors":[{"message":"Invalid input: bad base64","locations":[]},{"message":"second"}]}"#;
        let err = parse_upload_image_response(400, body).unwrap_err();
        assert_eq!(
            err,
            ClientError::Graphql("Invalid input: bad base64; second".into())
        );
    }

    #[test]
    fn non_json_error_status_reports_status() {
        let err = parse_upload_image_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, ClientError::Status(502));
    }

    #[test]
    fn unsupported_media_type_body_is_surfaced() {
        let body = r#"{"errors":[{"message":"Unsupported Media Type"}]}"#;
        let err = parse_upload_image_response(415, body).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported Media Type");
    }

    #[test]
    fn garbage_success_body_is_invalid() {
        let err = parse_upload_image_response(200, "not json").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }
}
