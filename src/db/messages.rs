//! Contact message store: the single insert-one write path of the service.

use async_trait::async_trait;
use sqlx::PgPool;
use std::time::Duration;

use super::models::ContactMessage;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No message store was configured at startup.
    #[error("message store is not configured")]
    NotConfigured,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store answered but did not take the write.
    #[error("message store rejected the write: {0}")]
    Rejected(String),
}

/// Persistent destination for contact messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist one message. Called exactly once per accepted submission.
    async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError>;

    /// Round-trip latency to the backing store.
    async fn ping(&self) -> Result<Duration, StoreError>;
}

/// PostgreSQL-backed store over the `contact_messages` table.
#[derive(Debug, Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Close every pooled connection. Pending acquires fail afterwards.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO contact_messages (id, name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.created_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            return Err(StoreError::Rejected(format!(
                "expected 1 row inserted, got {}",
                result.rows_affected()
            )));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<Duration, StoreError> {
        Ok(super::health_check(&self.pool).await?)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::*;
    use tokio::sync::Mutex;

    /// In-process store used by handler tests.
    #[derive(Default)]
    pub struct MemoryMessageStore {
        pub messages: Mutex<Vec<ContactMessage>>,
        pub fail_writes: bool,
    }

    impl MemoryMessageStore {
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }

        pub async fn len(&self) -> usize {
            self.messages.lock().await.len()
        }
    }

    #[async_trait]
    impl MessageStore for MemoryMessageStore {
        async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Rejected("write refused".to_string()));
            }
            self.messages.lock().await.push(message.clone());
            Ok(())
        }

        async fn ping(&self) -> Result<Duration, StoreError> {
            Ok(Duration::from_millis(1))
        }
    }
}
