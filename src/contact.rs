/*!
 * Contact Intake
 * Validates a contact form submission and writes it to the message store
 */
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::messages::{MessageStore, StoreError};
use crate::db::models::ContactMessage;
use crate::error::ServiceError;

/// Contact form body. Fields are optional here so a missing field is
/// reported the same way as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

impl ContactSubmission {
    /// Build the record to persist: fresh id, current UTC time, fields echoed as sent.
    pub fn into_message(self) -> Result<ContactMessage, ServiceError> {
        let mut missing = Vec::new();
        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let subject = required(self.subject, "subject", &mut missing);
        let message = required(self.message, "message", &mut missing);

        if !missing.is_empty() {
            return Err(ServiceError::Validation(missing));
        }

        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            created_at: Utc::now(),
        })
    }
}

/// Validate and persist one contact message. Performs no write when validation fails.
pub async fn submit_contact(
    store: Option<&dyn MessageStore>,
    submission: ContactSubmission,
) -> Result<ContactMessage, ServiceError> {
    let message = submission.into_message()?;
    let store = store.ok_or(StoreError::NotConfigured)?;

    store.insert(&message).await?;

    tracing::info!(message_id = %message.id, "contact message stored");

    Ok(message)
}
