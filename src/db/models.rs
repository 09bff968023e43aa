//! Data Models - catalog records served from the seed and contact messages written to the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product category, looked up publicly by its slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
}

/// Catalog product. Seed defaults are applied by `catalog::seed::SeedProduct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Slug of the owning category. Not checked against the category list.
    pub category: String,
    pub image_url: String,
    pub additional_images: Vec<String>,
    pub material: String,
    pub dimensions: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Contact message as persisted in `contact_messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
