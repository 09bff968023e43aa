/**
 * Catalog Routes
 * Read-only category and product endpoints
 */
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::ProductFilter;
use crate::db::models::{Category, Product};
use crate::error::AppResult;
use crate::state::AppState;

/// Response for GET /api/
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// GET /api/ - Service banner
pub async fn api_root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Quality Finds API".to_string(),
    })
}

/// GET /api/categories - All categories in seed order
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}

/// GET /api/categories/{slug}
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.catalog.category_by_slug(&slug)?.clone()))
}

/// GET /api/products?category=&featured=
pub async fn list_products(
    State(state): State<AppState>,
    filter: Result<Query<ProductFilter>, QueryRejection>,
) -> AppResult<Json<Vec<Product>>> {
    let Query(filter) = filter?;
    let products = state
        .catalog
        .list_products(&filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    Ok(Json(state.catalog.product_by_id(&id)?.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorResponse;
    use crate::routes::test_support::{get_json, test_app};
    use axum::http::StatusCode;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = get_json::<RootResponse>(test_app(None), "/api/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.message, "Quality Finds API");
    }

    #[tokio::test]
    async fn test_list_categories() {
        let (status, body) = get_json::<Vec<Category>>(test_app(None), "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        let slugs: Vec<_> = body.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, ["wallets", "jewelry", "bags"]);
    }

    #[tokio::test]
    async fn test_get_category_by_slug() {
        let (status, body) = get_json::<Category>(test_app(None), "/api/categories/wallets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.id, "cat-wallets");
    }

    #[tokio::test]
    async fn test_unknown_category_is_404() {
        let (status, body) =
            get_json::<ErrorResponse>(test_app(None), "/api/categories/invalid").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "Category not found");
    }

    #[tokio::test]
    async fn test_list_products_unfiltered() {
        let (status, body) = get_json::<Vec<Product>>(test_app(None), "/api/products").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["prod-1", "prod-2", "prod-3", "prod-4", "prod-5", "prod-6"]);
    }

    #[tokio::test]
    async fn test_list_products_filters_compose() {
        let (_, by_category) =
            get_json::<Vec<Product>>(test_app(None), "/api/products?category=wallets").await;
        assert_eq!(ids(&by_category), ["prod-1", "prod-2"]);

        let (_, featured) =
            get_json::<Vec<Product>>(test_app(None), "/api/products?featured=true").await;
        assert_eq!(ids(&featured), ["prod-1", "prod-3", "prod-6"]);

        let (_, both) = get_json::<Vec<Product>>(
            test_app(None),
            "/api/products?category=wallets&featured=true",
        )
        .await;
        assert_eq!(ids(&both), ["prod-1"]);

        let (_, other) =
            get_json::<Vec<Product>>(test_app(None), "/api/products?category=jewelry").await;
        assert!(!ids(&other).contains(&"prod-1"));
    }

    #[tokio::test]
    async fn test_list_products_accepts_featured_spellings() {
        for query in ["featured=1", "featured=yes", "featured=on", "featured=True"] {
            let (status, body) =
                get_json::<Vec<Product>>(test_app(None), &format!("/api/products?{query}")).await;
            assert_eq!(status, StatusCode::OK, "{query}");
            assert_eq!(ids(&body), ["prod-1", "prod-3", "prod-6"], "{query}");
        }

        let (status, body) =
            get_json::<Vec<Product>>(test_app(None), "/api/products?category=wallets&featured=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&body), ["prod-2"]);
    }

    #[tokio::test]
    async fn test_list_products_rejects_non_bool_featured() {
        let (status, body) =
            get_json::<ErrorResponse>(test_app(None), "/api/products?featured=maybe").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.detail.is_empty());
    }

    #[tokio::test]
    async fn test_get_product_and_unknown_id() {
        let (status, body) = get_json::<Product>(test_app(None), "/api/products/prod-1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_featured);
        assert_eq!(body.category, "wallets");

        let (status, body) =
            get_json::<ErrorResponse>(test_app(None), "/api/products/invalid-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.detail, "Product not found");
    }

    #[tokio::test]
    async fn test_product_json_shape() {
        let (_, body) =
            get_json::<serde_json::Value>(test_app(None), "/api/products/prod-1").await;
        for field in [
            "id",
            "name",
            "description",
            "price",
            "category",
            "image_url",
            "additional_images",
            "material",
            "dimensions",
            "is_featured",
            "created_at",
        ] {
            assert!(body.get(field).is_some(), "missing {field}");
        }
        assert!(body["dimensions"].is_null());
    }
}
