//! RFC 9457 Problem Details responses.
//!
//! Bodies also carry an `error` member holding the same text as `detail`,
//! which is what existing persona clients display.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::ser::{Serialize, SerializeStruct, Serializer};

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

const PROBLEM_TYPE: &str = "about:blank";

/// Error response body.
#[derive(Debug, Clone)]
#[must_use]
pub struct Problem {
    pub status: StatusCode,
    pub detail: String,
    /// Request path the problem occurred on.
    pub instance: String,
    /// Machine-readable error code, e.g. `PERSONAS_NOT_FOUND`.
    pub code: &'static str,
    pub trace_id: Option<String>,
    pub errors: Option<Vec<ValidationViolation>>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationViolation {
    pub field: String,
    pub message: String,
}

impl Problem {
    pub fn new(status: StatusCode, code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            instance: String::new(),
            code,
            trace_id: None,
            errors: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Error")
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_trace_id(mut self, id: Option<String>) -> Self {
        self.trace_id = id;
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationViolation>) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl Serialize for Problem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("Problem", 9)?;
        body.serialize_field("type", PROBLEM_TYPE)?;
        body.serialize_field("title", self.title())?;
        body.serialize_field("status", &self.status.as_u16())?;
        body.serialize_field("detail", &self.detail)?;
        body.serialize_field("error", &self.detail)?;
        body.serialize_field("instance", &self.instance)?;
        body.serialize_field("code", self.code)?;
        if let Some(trace_id) = &self.trace_id {
            body.serialize_field("trace_id", trace_id)?;
        } else {
            body.skip_field("trace_id")?;
        }
        if let Some(errors) = &self.errors {
            body.serialize_field("errors", errors)?;
        } else {
            body.skip_field("errors")?;
        }
        body.end()
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let mut resp = (self.status, axum::Json(&self)).into_response();
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_carries_status_and_problem_content_type() {
        let problem = Problem::new(StatusCode::BAD_REQUEST, "X", "invalid payload");
        let resp = problem.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_PROBLEM_JSON
        );
    }

    #[test]
    fn body_has_rfc_members_and_error_alias() {
        let p = Problem::new(StatusCode::NOT_FOUND, "NF", "Persona not found")
            .with_instance("/api/personas/9");
        let json = serde_json::to_value(&p).unwrap();

        assert_eq!(json["type"], "about:blank");
        assert_eq!(json["title"], "Not Found");
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "Persona not found");
        assert_eq!(json["error"], "Persona not found");
        assert_eq!(json["instance"], "/api/personas/9");
        assert_eq!(json["code"], "NF");
        assert!(json.get("errors").is_none());
        assert!(json.get("trace_id").is_none());
    }
}
