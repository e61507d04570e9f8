//! Problem details for HTTP APIs (RFC 7807)
//!
//! Errors reported by the server are rendered as
//! `application/problem+json` bodies.

use crate::error::Error;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Content type of problem detail responses
pub const PROBLEM_JSON: &str = "application/problem+json";

/// An RFC 7807 problem details object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short summary
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Explanation specific to this occurrence
    pub detail: String,
    /// URI of the request that caused the problem
    pub instance: String,
}

impl ProblemDetails {
    /// Create a problem with type `about:blank`
    pub fn new(status: StatusCode, detail: impl Into<String>, instance: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            problem_type: "about:blank".to_string(),
            title: status
                .canonical_reason()
                .map_or_else(|| detail.clone(), str::to_string),
            status: status.as_u16(),
            detail,
            instance: instance.into(),
        }
    }

    /// Build a problem from an error raised while handling `instance`
    pub fn from_error(err: &Error, instance: impl Into<String>) -> Self {
        Self::new(err.status_code(), err.to_string(), instance)
    }

    /// Set the problem type URI
    #[must_use]
    pub fn with_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    /// Status as a [`StatusCode`]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(self)).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_error() {
        let err = Error::unknown_kind("cursor");
        let problem = ProblemDetails::from_error(&err, "/links/cursor");

        assert_eq!(
            serde_json::to_value(&problem).unwrap(),
            json!({
                "type": "about:blank",
                "title": "Bad Request",
                "status": 400,
                "detail": "Unknown pagination kind: cursor",
                "instance": "/links/cursor"
            })
        );
    }

    #[test]
    fn test_with_type() {
        let problem = ProblemDetails::new(StatusCode::NOT_FOUND, "gone", "/x")
            .with_type("https://example.com/problems/gone");
        assert_eq!(problem.problem_type, "https://example.com/problems/gone");
        assert_eq!(problem.title, "Not Found");
    }

    #[test]
    fn test_into_response() {
        let response =
            ProblemDetails::new(StatusCode::BAD_REQUEST, "bad", "/links/x").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            PROBLEM_JSON
        );
    }
}
