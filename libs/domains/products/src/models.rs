use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Electronics,
    Clothing,
    Food,
    Books,
    Home,
    Sports,
    Toys,
    Other,
}

impl Category {
    /// All categories, in declaration order (used for error messages)
    pub const ALL: [Category; 8] = [
        Category::Electronics,
        Category::Clothing,
        Category::Food,
        Category::Books,
        Category::Home,
        Category::Sports,
        Category::Toys,
        Category::Other,
    ];
}

/// Product entity - the document stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product name, unique across the catalog
    pub name: String,
    /// Product description
    pub description: String,
    /// Price, non-negative
    pub price: f64,
    /// Units in stock
    pub stock: i32,
    /// Product category
    pub category: Category,
    /// Opaque image references, at most 5
    #[serde(default)]
    pub images: Vec<String>,
    /// Whether the product is featured on the listing page
    #[serde(default)]
    pub featured: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fully validated payload for creating a product
///
/// Produced by `validate::validate_create`; every field is populated and
/// defaults are already applied. The `Validate` derive re-states the
/// constraint table so the payload is re-checked at the persistence
/// boundary even when constructed directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
    pub category: Category,
    #[validate(length(max = 5))]
    pub images: Vec<String>,
    pub featured: bool,
}

/// Validated partial payload for updating a product
///
/// Only fields present here are written; `None` means "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 3, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category: Option<Category>,
    #[validate(length(max = 5))]
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
}

impl UpdateProduct {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.images.is_none()
            && self.featured.is_none()
    }
}

/// Query parameters for the listing endpoint
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListParams {
    /// Case-insensitive substring match against name or description
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<Category>,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Storage-level filter shared by the page fetch and the count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<Category>,
}

/// Pagination summary returned alongside a page of products
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Pagination {
    pub page: u64,
    pub limit: i64,
    /// Count of products matching the filter, not the page size
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: i64, total: u64) -> Self {
        let per_page = limit.max(1) as u64;
        Self {
            page,
            limit,
            total,
            total_pages: total.div_ceil(per_page),
        }
    }
}

/// A page slice of the catalog plus its pagination summary
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

impl Product {
    /// Build a new product from a validated create payload
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            category: input.category,
            images: input.images,
            featured: input.featured,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_snake_case() {
        assert_eq!(Category::Electronics.to_string(), "electronics");
        assert_eq!("home".parse::<Category>().unwrap(), Category::Home);
        assert!("garden".parse::<Category>().is_err());
    }

    #[test]
    fn pagination_rounds_up_partial_pages() {
        let pagination = Pagination::new(3, 10, 25);
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.total, 25);
    }

    #[test]
    fn pagination_exact_division() {
        assert_eq!(Pagination::new(1, 10, 30).total_pages, 3);
    }

    #[test]
    fn pagination_empty_collection() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
    }

    #[test]
    fn new_product_applies_timestamps_and_id() {
        let product = Product::new(CreateProduct {
            name: "Wireless Mouse".to_string(),
            description: "A mouse without wires".to_string(),
            price: 29.99,
            stock: 4,
            category: Category::Electronics,
            images: vec![],
            featured: false,
        });

        assert_eq!(product.created_at, product.updated_at);
        assert!(!product.id.is_nil());
    }

    #[test]
    fn update_is_empty_when_nothing_supplied() {
        assert!(UpdateProduct::default().is_empty());
        assert!(!UpdateProduct {
            price: Some(1.0),
            ..Default::default()
        }
        .is_empty());
    }
}
