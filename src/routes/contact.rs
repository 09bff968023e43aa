/**
 * Contact Routes
 * Contact form intake
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::contact::{submit_contact, ContactSubmission};
use crate::db::models::ContactMessage;
use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/contact - Store a contact message and return it with its id
pub async fn create_contact_message(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> AppResult<Json<ContactMessage>> {
    let Json(submission) = payload?;
    let message = submit_contact(state.message_store(), submission).await?;
    Ok(Json(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::messages::memory::MemoryMessageStore;
    use crate::error::ErrorResponse;
    use crate::routes::test_support::{post_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Test User",
            "email": "test@example.com",
            "subject": "Test Inquiry",
            "message": "This is a test message from the API testing suite."
        })
    }

    #[tokio::test]
    async fn test_contact_returns_stored_message() {
        let store = Arc::new(MemoryMessageStore::default());
        let app = test_app(Some(store.clone()));

        let (status, bytes) = post_json(app, "/api/contact", &valid_body()).await;
        assert_eq!(status, StatusCode::OK);

        let created: ContactMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created.name, "Test User");
        assert_eq!(created.email, "test@example.com");
        assert_eq!(store.len().await, 1);
        assert_eq!(store.messages.lock().await[0].id, created.id);
    }

    #[tokio::test]
    async fn test_repeated_submissions_create_distinct_records() {
        let store = Arc::new(MemoryMessageStore::default());

        let (_, first) = post_json(test_app(Some(store.clone())), "/api/contact", &valid_body()).await;
        let (_, second) =
            post_json(test_app(Some(store.clone())), "/api/contact", &valid_body()).await;

        let first: ContactMessage = serde_json::from_slice(&first).unwrap();
        let second: ContactMessage = serde_json::from_slice(&second).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_and_empty_fields_are_422_without_write() {
        let store = Arc::new(MemoryMessageStore::default());
        let app = test_app(Some(store.clone()));

        let (status, bytes) =
            post_json(app, "/api/contact", &json!({ "name": "Test", "email": "" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.detail.contains("email"));
        assert!(body.detail.contains("subject"));
        assert!(body.detail.contains("message"));
        assert!(!body.detail.contains(" name"));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_422() {
        let (status, _) = post_json(
            test_app(Some(Arc::new(MemoryMessageStore::default()))),
            "/api/contact",
            &json!({ "name": 42, "email": "a@b.c", "subject": "s", "message": "m" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_without_store_is_503() {
        let (status, bytes) = post_json(test_app(None), "/api/contact", &valid_body()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "Message could not be saved");
    }

    #[tokio::test]
    async fn test_store_failure_is_500() {
        let store = Arc::new(MemoryMessageStore::failing());
        let (status, _) = post_json(test_app(Some(store)), "/api/contact", &valid_body()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
