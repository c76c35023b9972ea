//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::db::DatabaseError;
use crate::prescriptions::PrescriptionError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Drugs must be a non-empty list")]
    InvalidDrugList,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Drug {0} not found")]
    DrugNotFound(Uuid),
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid or unauthorized doctor id {0}")]
    UnauthorizedDoctor(Uuid),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                format!("Missing required field: {field}"),
            ),
            ApiError::InvalidDrugList => (
                StatusCode::BAD_REQUEST,
                "INVALID_DRUG_LIST",
                "Drugs must be a non-empty list".to_string(),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail.clone(),
            ),
            ApiError::DrugNotFound(id) => (
                StatusCode::BAD_REQUEST,
                "DRUG_NOT_FOUND",
                format!("Drug {id} not found"),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password".to_string(),
            ),
            ApiError::UnauthorizedDoctor(id) => (
                StatusCode::FORBIDDEN,
                "UNAUTHORIZED_DOCTOR",
                format!("Invalid or unauthorized doctor id {id}"),
            ),
            ApiError::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(field) => ApiError::MissingField(field),
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::MissingField(field) => ApiError::MissingField(field),
            CatalogError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<PrescriptionError> for ApiError {
    fn from(err: PrescriptionError) -> Self {
        match err {
            PrescriptionError::MissingField(field) => ApiError::MissingField(field),
            PrescriptionError::EmptyDrugList => ApiError::InvalidDrugList,
            PrescriptionError::UnauthorizedDoctor(id) => ApiError::UnauthorizedDoctor(id),
            PrescriptionError::DrugNotFound(id) => ApiError::DrugNotFound(id),
            PrescriptionError::NotFound(id) => {
                ApiError::NotFound(format!("Prescription {id} not found"))
            }
            PrescriptionError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_field_returns_400() {
        let response = ApiError::MissingField("patient_name").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "MISSING_FIELD");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("patient_name"));
    }

    #[tokio::test]
    async fn drug_not_found_returns_400_naming_the_id() {
        let id = Uuid::new_v4();
        let response = ApiError::DrugNotFound(id).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "DRUG_NOT_FOUND");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains(&id.to_string()));
    }

    #[tokio::test]
    async fn invalid_credentials_returns_401() {
        let response = ApiError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unauthorized_doctor_returns_403() {
        let response = ApiError::UnauthorizedDoctor(Uuid::new_v4()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNAUTHORIZED_DOCTOR");
    }

    #[tokio::test]
    async fn not_found_returns_404() {
        let response = ApiError::NotFound("Prescription gone".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn internal_returns_500_and_hides_details() {
        let response = ApiError::Internal("disk on fire".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        // Internal errors hide details from the client
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn prescription_errors_map_to_api_kinds() {
        let id = Uuid::new_v4();
        let api: ApiError = PrescriptionError::NotFound(id).into();
        assert!(matches!(api, ApiError::NotFound(_)));

        let api: ApiError = PrescriptionError::EmptyDrugList.into();
        assert!(matches!(api, ApiError::InvalidDrugList));

        let api: ApiError = PrescriptionError::UnauthorizedDoctor(id).into();
        assert!(matches!(api, ApiError::UnauthorizedDoctor(e) if e == id));
    }
}
