//! Error types for the Mailosaur client.

use reqwest::StatusCode;
use serde::Deserialize;

const AUTHENTICATION_MESSAGE: &str = "Authentication failed, check your API key.";
const PERMISSION_MESSAGE: &str = "Insufficient permission to perform that task.";
const NOT_FOUND_MESSAGE: &str = "Not found, check input parameters.";
const API_ERROR_MESSAGE: &str = "An API error occurred, see httpResponse for further information.";
const GONE_MESSAGE: &str = "Permanently expired or deleted.";

/// Details of a failed HTTP exchange.
///
/// Carried by every error variant that originates from a non-success status,
/// so the status and raw body stay available for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    /// Human-readable description.
    pub message: String,
    /// HTTP status returned by the service.
    pub status: StatusCode,
    /// Raw response body, when one was returned.
    pub body: Option<String>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors that can occur when talking to the Mailosaur API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed parameters (HTTP 400) or an unknown resource (HTTP 404).
    #[error("{0}")]
    InvalidRequest(ApiFailure),

    /// The API key was rejected (HTTP 401).
    #[error("{0}")]
    Authentication(ApiFailure),

    /// The API key lacks the rights for this operation (HTTP 403).
    #[error("{0}")]
    Permission(ApiFailure),

    /// Any other unexpected status.
    #[error("{0}")]
    Api(ApiFailure),

    /// A message search ran out of time without a match.
    #[error(
        "No matching messages found in time. By default, only messages received in the last hour are checked (use receivedAfter to override this)."
    )]
    SearchTimeout,

    /// A preview was not rendered within the polling ceiling.
    #[error(
        "An email preview was not generated in time. The email client may not be available, or the preview ID [{id}] may be incorrect."
    )]
    PreviewTimeout {
        /// The preview that was requested.
        id: String,
    },

    /// The preview has been permanently deleted or has expired (HTTP 410).
    #[error("{0}")]
    Gone(ApiFailure),

    /// No API key was supplied to the builder or found in the environment.
    #[error("Missing API key, set MAILOSAUR_API_KEY or call ClientBuilder::api_key.")]
    MissingApiKey,

    /// Network or HTTP transport failure.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stable classification of an [`Error`], suitable for branching on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `invalid_request`
    InvalidRequest,
    /// `authentication_error`
    Authentication,
    /// `permission_error`
    Permission,
    /// `api_error`
    Api,
    /// `search_timeout`
    SearchTimeout,
    /// `preview_timeout`
    PreviewTimeout,
    /// `gone`
    Gone,
    /// `transport_error`
    Transport,
}

impl ErrorKind {
    /// The kind as the string the service and other clients use.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Authentication => "authentication_error",
            ErrorKind::Permission => "permission_error",
            ErrorKind::Api => "api_error",
            ErrorKind::SearchTimeout => "search_timeout",
            ErrorKind::PreviewTimeout => "preview_timeout",
            ErrorKind::Gone => "gone",
            ErrorKind::Transport => "transport_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidRequest(_) | Error::MissingApiKey => ErrorKind::InvalidRequest,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::Permission(_) => ErrorKind::Permission,
            Error::Api(_) => ErrorKind::Api,
            Error::SearchTimeout => ErrorKind::SearchTimeout,
            Error::PreviewTimeout { .. } => ErrorKind::PreviewTimeout,
            Error::Gone(_) => ErrorKind::Gone,
            Error::Request(_) | Error::Json(_) => ErrorKind::Transport,
        }
    }

    /// HTTP status of the failed exchange, if the error came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Request(e) => e.status(),
            _ => self.failure().map(|f| f.status),
        }
    }

    /// Raw response body of the failed exchange, if any.
    pub fn body(&self) -> Option<&str> {
        self.failure().and_then(|f| f.body.as_deref())
    }

    fn failure(&self) -> Option<&ApiFailure> {
        match self {
            Error::InvalidRequest(f)
            | Error::Authentication(f)
            | Error::Permission(f)
            | Error::Api(f)
            | Error::Gone(f) => Some(f),
            _ => None,
        }
    }

    /// Build an error from a response whose status was not the expected one.
    pub(crate) fn from_status(status: StatusCode, body: Option<String>) -> Self {
        match status {
            StatusCode::BAD_REQUEST => {
                let message = body
                    .as_deref()
                    .map(validation_message)
                    .unwrap_or_default();
                Error::InvalidRequest(ApiFailure {
                    message,
                    status,
                    body,
                })
            }
            StatusCode::UNAUTHORIZED => {
                Error::Authentication(failure(AUTHENTICATION_MESSAGE, status, body))
            }
            StatusCode::FORBIDDEN => Error::Permission(failure(PERMISSION_MESSAGE, status, body)),
            StatusCode::NOT_FOUND => {
                Error::InvalidRequest(failure(NOT_FOUND_MESSAGE, status, body))
            }
            _ => Error::Api(failure(API_ERROR_MESSAGE, status, body)),
        }
    }

    /// Re-classify a failed preview fetch as permanently gone.
    pub(crate) fn gone(body: Option<String>) -> Self {
        Error::Gone(failure(GONE_MESSAGE, StatusCode::GONE, body))
    }
}

fn failure(message: &str, status: StatusCode, body: Option<String>) -> ApiFailure {
    ApiFailure {
        message: message.to_string(),
        status,
        body,
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<FieldError>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    field: String,
    #[serde(default)]
    detail: Vec<FieldErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct FieldErrorDetail {
    #[serde(default)]
    description: String,
}

/// Flatten a 400 response body into `(field) description` lines.
fn validation_message(body: &str) -> String {
    let Ok(response) = serde_json::from_str::<ErrorResponse>(body) else {
        return String::new();
    };

    response
        .errors
        .iter()
        .map(|e| {
            let description = e
                .detail
                .first()
                .map(|d| d.description.as_str())
                .unwrap_or_default();
            format!("({}) {}\r\n", e.field, description)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_lists_field_errors() {
        let body = r#"{"errors":[{"field":"name","detail":[{"description":"Servers need a name"}]}]}"#;
        let err = Error::from_status(StatusCode::BAD_REQUEST, Some(body.to_string()));

        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.to_string(), "(name) Servers need a name\r\n");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.body(), Some(body));
    }

    #[test]
    fn bad_request_with_unparsable_body_has_empty_message() {
        let err = Error::from_status(StatusCode::BAD_REQUEST, Some("<html>".to_string()));
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn statuses_map_to_kinds() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ErrorKind::Permission),
            (StatusCode::NOT_FOUND, ErrorKind::InvalidRequest),
            (StatusCode::ACCEPTED, ErrorKind::Api),
            (StatusCode::GONE, ErrorKind::Api),
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorKind::Api),
        ];
        for (status, kind) in cases {
            assert_eq!(Error::from_status(status, None).kind(), kind, "{status}");
        }
    }

    #[test]
    fn messages_match_service_wording() {
        assert_eq!(
            Error::from_status(StatusCode::UNAUTHORIZED, None).to_string(),
            "Authentication failed, check your API key."
        );
        assert_eq!(
            Error::from_status(StatusCode::NOT_FOUND, None).to_string(),
            "Not found, check input parameters."
        );
    }

    #[test]
    fn gone_keeps_status_and_body() {
        let err = Error::gone(Some("expired".to_string()));
        assert_eq!(err.kind().as_str(), "gone");
        assert_eq!(err.status(), Some(StatusCode::GONE));
        assert_eq!(err.body(), Some("expired"));
        assert_eq!(err.to_string(), "Permanently expired or deleted.");
    }

    #[test]
    fn preview_timeout_names_the_id() {
        let err = Error::PreviewTimeout {
            id: "abc-123".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::PreviewTimeout);
        assert!(err.to_string().contains("[abc-123]"));
        assert_eq!(err.status(), None);
    }
}
