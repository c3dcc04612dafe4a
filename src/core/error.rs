use crate::repositories::StoreError;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self {
            status,
            message,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    // Common error constructors
    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error(message: &'static str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Errore di storage: il testo originale dell'errore finisce in `details`
    pub fn storage(err: &StoreError) -> Self {
        Self::internal_server_error("Storage error").with_details(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_carry_the_raw_text() {
        let invalid = AppError::storage(&StoreError::InvalidId("abc".to_string()));
        assert_eq!(invalid.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(invalid.message(), "Storage error");
        assert!(invalid.details.as_deref().unwrap_or_default().contains("abc"));

        let db = AppError::storage(&StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            db.details.as_deref(),
            Some(sqlx::Error::PoolClosed.to_string().as_str())
        );
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let body = serde_json::to_value(ErrorResponse {
            error: "Invalid JSON",
            details: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Invalid JSON" }));
    }
}
