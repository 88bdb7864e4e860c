use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;

use super::problem::{Problem, ValidationViolation};
use crate::domain::error::DomainError;

pub const CODE_VALIDATION: &str = "PERSONAS_VALIDATION";
pub const CODE_DNI_CONFLICT: &str = "PERSONAS_DNI_CONFLICT";
pub const CODE_NOT_FOUND: &str = "PERSONAS_NOT_FOUND";
pub const CODE_INTERNAL: &str = "PERSONAS_INTERNAL";
pub const CODE_UPDATE_FAILED: &str = "PERSONAS_UPDATE_FAILED";
pub const CODE_BAD_REQUEST: &str = "PERSONAS_BAD_REQUEST";

const STORAGE_FAILURE_DETAIL: &str = "An internal database error occurred";

fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

fn finish(problem: Problem, instance: &str) -> Problem {
    problem
        .with_instance(instance)
        .with_trace_id(current_trace_id())
}

/// Map domain error to RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let problem = match e {
        DomainError::Validation { errors } => {
            let violations = errors
                .iter()
                .map(|v| ValidationViolation {
                    field: v.field.to_owned(),
                    message: v.message.clone(),
                })
                .collect();
            Problem::new(StatusCode::BAD_REQUEST, CODE_VALIDATION, e.to_string())
                .with_errors(violations)
        }
        DomainError::DniAlreadyExists { dni } => Problem::new(
            StatusCode::BAD_REQUEST,
            CODE_DNI_CONFLICT,
            format!("A persona with dni '{dni}' already exists"),
        ),
        DomainError::NotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            CODE_NOT_FOUND,
            format!("Persona with id {id} was not found"),
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                CODE_INTERNAL,
                STORAGE_FAILURE_DETAIL,
            )
        }
    };

    finish(problem, instance)
}

/// Same as [`domain_error_to_problem`], except that a storage failure
/// during update is reported as 400.
pub fn update_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    match e {
        DomainError::Database { .. } => {
            tracing::error!(error = ?e, "Database error occurred during update");
            finish(
                Problem::new(
                    StatusCode::BAD_REQUEST,
                    CODE_UPDATE_FAILED,
                    STORAGE_FAILURE_DETAIL,
                ),
                instance,
            )
        }
        _ => domain_error_to_problem(e, instance),
    }
}

/// Malformed or non-JSON request body.
pub fn json_rejection_to_problem(rejection: &JsonRejection, instance: &str) -> Problem {
    let status = match rejection {
        JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    finish(
        Problem::new(status, CODE_BAD_REQUEST, rejection.body_text()),
        instance,
    )
}

/// Non-integer `{id}` path segment.
pub fn path_rejection_to_problem(rejection: &PathRejection, instance: &str) -> Problem {
    finish(
        Problem::new(
            StatusCode::BAD_REQUEST,
            CODE_BAD_REQUEST,
            rejection.body_text(),
        ),
        instance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::FieldViolation;

    #[test]
    fn validation_maps_to_400_with_field_list() {
        let e = DomainError::validation(vec![FieldViolation::new("apellidos", "is required")]);
        let p = domain_error_to_problem(&e, "/api/personas");
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, CODE_VALIDATION);
        assert_eq!(p.instance, "/api/personas");
        assert_eq!(
            p.errors,
            Some(vec![ValidationViolation {
                field: "apellidos".to_owned(),
                message: "is required".to_owned(),
            }])
        );
    }

    #[test]
    fn duplicate_dni_is_bad_request_naming_the_dni() {
        let p = domain_error_to_problem(&DomainError::dni_already_exists("12345678"), "/");
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, CODE_DNI_CONFLICT);
        assert!(p.detail.contains("12345678"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let p = domain_error_to_problem(&DomainError::not_found(5), "/api/personas/5");
        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.code, CODE_NOT_FOUND);
    }

    #[test]
    #[tracing_test::traced_test]
    fn database_error_text_is_not_leaked() {
        let e = DomainError::database("UNIQUE constraint failed: secret_table.col");
        let p = domain_error_to_problem(&e, "/");
        assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(p.detail, STORAGE_FAILURE_DETAIL);
        assert!(!p.detail.contains("secret_table"));
        assert!(logs_contain("Database error occurred"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn storage_failure_on_update_is_400_without_details() {
        let e = DomainError::database("disk I/O error");
        let p = update_error_to_problem(&e, "/api/personas/1");
        assert_eq!(p.status, StatusCode::BAD_REQUEST);
        assert_eq!(p.code, CODE_UPDATE_FAILED);
        assert_eq!(p.detail, STORAGE_FAILURE_DETAIL);
        assert!(logs_contain("disk I/O error"));
    }

    #[test]
    fn update_keeps_other_mappings() {
        let p = update_error_to_problem(&DomainError::not_found(3), "/api/personas/3");
        assert_eq!(p.status, StatusCode::NOT_FOUND);
    }
}
