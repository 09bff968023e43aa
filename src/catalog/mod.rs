/*!
 * Catalog
 * Immutable category/product lists and the read-only queries over them
 */
pub mod seed;

use serde::{de, Deserialize, Deserializer};
use std::collections::HashSet;

use crate::db::models::{Category, Product};
use crate::error::ServiceError;

pub use seed::SeedError;

/// Products and categories served by the API, fixed for the process lifetime.
///
/// Order is the seed order and is preserved by every query.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    products: Vec<Product>,
}

/// Optional constraints for [`Catalog::list_products`]. Present filters are ANDed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    /// Accepts `true/false`, `1/0`, `yes/no`, `on/off`, `t/f`, `y/n`, any case.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: Option<bool>,
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_flag(&raw)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid boolean value '{raw}' for `featured`")))
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        // An empty `?category=` is treated like no category filter at all.
        let category_ok = match self.category.as_deref() {
            Some(category) if !category.is_empty() => product.category == category,
            _ => true,
        };
        let featured_ok = self
            .featured
            .map_or(true, |featured| product.is_featured == featured);
        category_ok && featured_ok
    }
}

impl Catalog {
    /// Build a catalog, rejecting duplicate slugs/ids, unsafe slugs and bad prices.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Result<Self, SeedError> {
        let mut slugs = HashSet::new();
        for category in &categories {
            if !seed::is_valid_slug(&category.slug) {
                return Err(SeedError::InvalidSlug(category.slug.clone()));
            }
            if !slugs.insert(category.slug.as_str()) {
                return Err(SeedError::DuplicateSlug(category.slug.clone()));
            }
        }

        let mut ids = HashSet::new();
        for product in &products {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(SeedError::InvalidPrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
            if !ids.insert(product.id.as_str()) {
                return Err(SeedError::DuplicateProductId(product.id.clone()));
            }
            if !slugs.contains(product.category.as_str()) {
                tracing::warn!(
                    product_id = %product.id,
                    category = %product.category,
                    "product references an unknown category"
                );
            }
        }

        Ok(Self {
            categories,
            products,
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_by_slug(&self, slug: &str) -> Result<&Category, ServiceError> {
        self.categories
            .iter()
            .find(|c| c.slug == slug)
            .ok_or(ServiceError::NotFound("Category"))
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn product_by_id(&self, id: &str) -> Result<&Product, ServiceError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(ServiceError::NotFound("Product"))
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}
