use actix_web::HttpResponse;
use thiserror::Error;

/// Error taxonomy shared by the resource services.
///
/// Each variant maps to a fixed HTTP status at the boundary; expected
/// failures (missing rows, duplicate keys, bad payloads) never surface
/// as 500s.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<diesel::result::Error> for AppError {
    fn from(e: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match e {
            DieselError::NotFound => AppError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                AppError::Constraint(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, info) => {
                AppError::Constraint(info.message().to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Constraint(_) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": self.to_string()
            })),
            AppError::Validation(_) => {
                HttpResponse::UnprocessableEntity().json(serde_json::json!({
                    "error": self.to_string()
                }))
            }
            AppError::Internal(_) => HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn not_found_returns_404() {
        assert_eq!(AppError::NotFound.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn constraint_violation_returns_400() {
        let err = AppError::Constraint("duplicate key".to_string());
        assert_eq!(err.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_failure_returns_422() {
        let err = AppError::Validation("bad email".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn unique_violation_maps_to_constraint() {
        let err: AppError = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint".to_string()),
        )
        .into();
        assert!(matches!(err, AppError::Constraint(_)));
    }

    #[test]
    fn other_diesel_errors_map_to_internal() {
        let err: AppError = diesel::result::Error::BrokenTransactionManager.into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
