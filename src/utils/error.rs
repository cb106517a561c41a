use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Unauthorized,
    Forbidden,
    Validation(String),
    NotFound(String),
    OutOfSeats,
    DatabaseError(String),
    GatewayError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => write!(f, "Unauthorized Access"),
            AppError::Forbidden => write!(f, "Forbidden Access"),
            AppError::Validation(msg) => write!(f, "Invalid request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::OutOfSeats => write!(f, "No seats available"),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::GatewayError(msg) => write!(f, "Payment gateway error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::OutOfSeats => StatusCode::CONFLICT,
            AppError::DatabaseError(_) | AppError::GatewayError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": true,
            "message": self.to_string(),
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<mongodb::bson::oid::Error> for AppError {
    fn from(_: mongodb::bson::oid::Error) -> Self {
        AppError::Validation("malformed object id".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::OutOfSeats.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::GatewayError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_messages_match_wire_format() {
        // The front end matches on these exact strings
        assert_eq!(AppError::Unauthorized.to_string(), "Unauthorized Access");
        assert_eq!(AppError::Forbidden.to_string(), "Forbidden Access");
    }
}
