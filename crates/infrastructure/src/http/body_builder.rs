//! HTTP request body builder.
//!
//! Applies an [`EncodedBody`] to a `reqwest` request. Content types are
//! already among the prepared headers, so nothing here sets one.

use courier_application::ports::TransportError;
use courier_application::prepare::EncodedBody;
use reqwest::RequestBuilder;

/// Attaches the encoded body to the request.
///
/// # Errors
///
/// Returns `TransportError::Build` if the body cannot be serialized.
pub fn apply_body(
    builder: RequestBuilder,
    body: &EncodedBody,
) -> Result<RequestBuilder, TransportError> {
    match body {
        EncodedBody::Empty => Ok(builder),

        EncodedBody::Json(value) => {
            let content = serde_json::to_vec(value).map_err(|e| {
                TransportError::Build(format!("JSON body serialization failed: {e}"))
            })?;
            Ok(builder.body(content))
        }

        EncodedBody::Form(fields) => {
            let encoded = serde_urlencoded::to_string(fields)
                .map_err(|e| TransportError::Build(format!("form body encoding failed: {e}")))?;
            Ok(builder.body(encoded))
        }

        EncodedBody::Text(content) => Ok(builder.body(content.clone())),

        EncodedBody::Bytes(content) => Ok(builder.body(content.clone())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body_of(body: &EncodedBody) -> Option<Vec<u8>> {
        let client = reqwest::Client::new();
        let request = apply_body(client.post("http://localhost/"), body)
            .unwrap()
            .build()
            .unwrap();
        request
            .body()
            .and_then(reqwest::Body::as_bytes)
            .map(<[u8]>::to_vec)
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(body_of(&EncodedBody::Empty), None);
    }

    #[test]
    fn test_json_body() {
        let body = body_of(&EncodedBody::Json(json!({"name": "widget"}))).unwrap();
        assert_eq!(body, br#"{"name":"widget"}"#.to_vec());
    }

    #[test]
    fn test_form_body_is_reencoded_in_order() {
        let body = body_of(&EncodedBody::Form(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "x y".to_string()),
        ]))
        .unwrap();
        assert_eq!(body, b"b=2&a=x+y".to_vec());
    }

    #[test]
    fn test_text_and_bytes_pass_through() {
        assert_eq!(
            body_of(&EncodedBody::Text("hello".to_string())).unwrap(),
            b"hello".to_vec()
        );
        assert_eq!(
            body_of(&EncodedBody::Bytes(vec![0, 159, 146, 150])).unwrap(),
            vec![0, 159, 146, 150]
        );
    }
}
