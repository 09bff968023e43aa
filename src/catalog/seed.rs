//! Seed loading: turns a JSON seed document into a validated [`Catalog`].

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::Catalog;
use crate::db::models::{Category, Product};

/// Seed compiled into the binary, used when no seed file is configured.
const DEFAULT_SEED: &str = include_str!("default_seed.json");

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate category slug '{0}'")]
    DuplicateSlug(String),

    #[error("category slug '{0}' is not URL-safe")]
    InvalidSlug(String),

    #[error("duplicate product id '{0}'")]
    DuplicateProductId(String),

    #[error("product '{id}' has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<SeedProduct>,
}

/// Product as written in a seed file; `created_at` is optional there.
#[derive(Debug, Deserialize)]
struct SeedProduct {
    id: String,
    name: String,
    description: String,
    price: f64,
    category: String,
    image_url: String,
    #[serde(default)]
    additional_images: Vec<String>,
    material: String,
    #[serde(default)]
    dimensions: Option<String>,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl SeedProduct {
    fn into_product(self, seeded_at: DateTime<Utc>) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image_url: self.image_url,
            additional_images: self.additional_images,
            material: self.material,
            dimensions: self.dimensions,
            is_featured: self.is_featured,
            created_at: self.created_at.unwrap_or(seeded_at),
        }
    }
}

/// Parse a seed document. Products without `created_at` are stamped with the load time.
pub fn load_from_str(json: &str) -> Result<Catalog, SeedError> {
    let document: SeedDocument = serde_json::from_str(json)?;
    let seeded_at = Utc::now();
    let products = document
        .products
        .into_iter()
        .map(|p| p.into_product(seeded_at))
        .collect();

    Catalog::new(document.categories, products)
}

pub fn load_from_path(path: &Path) -> Result<Catalog, SeedError> {
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&json)
}

pub fn load_default() -> Result<Catalog, SeedError> {
    load_from_str(DEFAULT_SEED)
}

/// Load from `path` when given, otherwise the embedded seed.
pub fn load(path: Option<&Path>) -> Result<Catalog, SeedError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading catalog seed file");
            load_from_path(path)
        }
        None => {
            tracing::info!("CATALOG_SEED_PATH not set. Using embedded catalog seed.");
            load_default()
        }
    }
}
