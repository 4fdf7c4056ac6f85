//! Normalized execution result, as rendered to callers and stored in history.

use serde::{Deserialize, Serialize};

use crate::failure::{ExecutionFailure, FailureKind};
use crate::response::{ResponseHeaders, ResponseSpec};

/// Outcome of one execution: a received response or a classified failure.
pub type ExecutionOutcome = Result<ResponseSpec, ExecutionFailure>;

/// Flat, serializable view of an [`ExecutionOutcome`].
///
/// `success` is true whenever a response was received, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether an HTTP response was obtained.
    pub success: bool,
    /// HTTP status code, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Response headers, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<ResponseHeaders>,
    /// Raw response text, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Body length in bytes, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<usize>,
    /// Wall-clock duration of the execution.
    pub elapsed_ms: u64,
    /// Classified error message, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Failure kind, on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
    /// Actionable suggestions, on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ExecutionResult {
    /// Builds the view of a received response.
    #[must_use]
    pub fn from_response(response: &ResponseSpec) -> Self {
        Self {
            success: true,
            status: Some(response.status),
            headers: Some(response.headers.clone()),
            body: Some(response.body.clone()),
            size_bytes: Some(response.size_bytes),
            elapsed_ms: response.elapsed_ms,
            error_message: None,
            error_kind: None,
            suggestions: Vec::new(),
        }
    }

    /// Builds the view of a failure.
    #[must_use]
    pub fn from_failure(failure: &ExecutionFailure) -> Self {
        Self {
            success: false,
            status: None,
            headers: None,
            body: None,
            size_bytes: None,
            elapsed_ms: failure.elapsed_ms,
            error_message: Some(failure.message.clone()),
            error_kind: Some(failure.kind),
            suggestions: failure
                .suggestions()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    /// Builds the view of either outcome.
    #[must_use]
    pub fn from_outcome(outcome: &ExecutionOutcome) -> Self {
        match outcome {
            Ok(response) => Self::from_response(response),
            Err(failure) => Self::from_failure(failure),
        }
    }
}

impl From<&ExecutionOutcome> for ExecutionResult {
    fn from(outcome: &ExecutionOutcome) -> Self {
        Self::from_outcome(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_error_status_is_still_success() {
        let response = ResponseSpec::new(
            404,
            ResponseHeaders::new(),
            b"missing",
            Duration::from_millis(12),
        );
        let result = ExecutionResult::from_outcome(&Ok(response));

        assert!(result.success);
        assert_eq!(result.status, Some(404));
        assert_eq!(result.body.as_deref(), Some("missing"));
        assert_eq!(result.error_message, None);
    }

    #[test]
    fn test_failure_view() {
        let failure =
            ExecutionFailure::new(FailureKind::DnsResolution, "Could not resolve host.", 40);
        let result = ExecutionResult::from_outcome(&Err(failure));

        assert!(!result.success);
        assert_eq!(result.status, None);
        assert_eq!(result.elapsed_ms, 40);
        assert_eq!(result.error_kind, Some(FailureKind::DnsResolution));
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_failure_json_omits_response_fields() {
        let failure = ExecutionFailure::new(FailureKind::Timeout, "Request timed out.", 30_000);
        let json = serde_json::to_value(ExecutionResult::from_failure(&failure)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error_message"], "Request timed out.");
        assert_eq!(json["error_kind"], "timeout");
        assert!(json.get("status").is_none());
        assert!(json.get("body").is_none());
    }
}
