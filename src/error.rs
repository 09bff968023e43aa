use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::messages::StoreError;

/// Errors raised by catalog lookups and contact intake.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Lookup by slug or id found nothing. Holds the entity name.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Required contact fields that were missing or empty.
    #[error("missing or empty field(s): {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    QueryString(#[from] QueryRejection),
}

pub type AppResult<T> = Result<T, AppError>;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Service(ServiceError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Service(ServiceError::StorageUnavailable(StoreError::NotConfigured)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Service(ServiceError::StorageUnavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::JsonBody(rejection) => rejection.status(),
            AppError::QueryString(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Service(ServiceError::StorageUnavailable(err)) => {
                tracing::error!(error = %err, "Contact message write failed");
                "Message could not be saved".to_string()
            }
            AppError::JsonBody(rejection) => rejection.body_text(),
            AppError::QueryString(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404_with_entity_message() {
        let err = AppError::from(ServiceError::NotFound("Category"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn test_validation_maps_to_422_and_lists_fields() {
        let err = AppError::from(ServiceError::Validation(vec!["email", "message"]));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing or empty field(s): email, message");
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let unconfigured = AppError::from(ServiceError::from(StoreError::NotConfigured));
        assert_eq!(unconfigured.status(), StatusCode::SERVICE_UNAVAILABLE);

        let rejected = AppError::from(ServiceError::from(StoreError::Rejected("full".into())));
        assert_eq!(rejected.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_catalog_and_contact_errors_share_service_error() {
        fn lookup() -> AppResult<()> {
            crate::catalog::fixtures::catalog().product_by_id("missing")?;
            Ok(())
        }
        fn intake() -> AppResult<()> {
            crate::contact::ContactSubmission::default().into_message()?;
            Ok(())
        }

        assert!(matches!(lookup(), Err(AppError::Service(ServiceError::NotFound("Product")))));
        assert!(matches!(
            intake(),
            Err(AppError::Service(ServiceError::Validation(_)))
        ));
    }
}
