//! HTTP handlers for the Products API
//!
//! Write endpoints accept `application/x-www-form-urlencoded` bodies;
//! repeated `images` keys become the image list. Every endpoint
//! answers with the [`Envelope`] shape.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::Form;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::cache::ViewCache;
use crate::models::{Category, ListParams, Pagination, Product, ProductPage};
use crate::repository::ProductRepository;
use crate::response::{Envelope, Message};
use crate::service::ProductService;
use crate::validate::{FieldError, ProductForm};

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        toggle_featured,
    ),
    components(schemas(
        Product,
        ProductForm,
        ProductPage,
        Pagination,
        Category,
        FieldError,
        Message
    )),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R, C>(service: ProductService<R, C>) -> Router
where
    R: ProductRepository + 'static,
    C: ViewCache + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/featured", post(toggle_featured))
        .with_state(shared_service)
}

/// List products with search, category filter, and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListParams),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 500, description = "Database error")
    )
)]
async fn list_products<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Query(params): Query<ListParams>,
) -> Envelope<ProductPage> {
    service.list(params).await.into()
}

/// Create a new product from form input
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Product name already exists"),
        (status = 500, description = "Database error")
    )
)]
async fn create_product<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Form(form): Form<ProductForm>,
) -> Response {
    match service.create(&form).await {
        Ok(product) => (StatusCode::CREATED, Envelope::success(product)).into_response(),
        Err(error) => Envelope::<Product>::failure(error).into_response(),
    }
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Database error")
    )
)]
async fn get_product<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Path(id): Path<Uuid>,
) -> Envelope<Product> {
    service.get_one(id).await.into()
}

/// Update a product from partial form input
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ProductForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The updated product", body = Product),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product name already exists"),
        (status = 500, description = "Database error")
    )
)]
async fn update_product<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Path(id): Path<Uuid>,
    Form(form): Form<ProductForm>,
) -> Envelope<Product> {
    service.update(id, &form).await.into()
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deletion confirmation", body = Message),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Database error")
    )
)]
async fn delete_product<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Path(id): Path<Uuid>,
) -> Envelope<Message> {
    service
        .remove(id)
        .await
        .map(|()| Message::new("Product deleted"))
        .into()
}

/// Toggle the featured flag
#[utoipa::path(
    post,
    path = "/{id}/featured",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "The product with the flag flipped", body = Product),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Database error")
    )
)]
async fn toggle_featured<R: ProductRepository, C: ViewCache>(
    State(service): State<Arc<ProductService<R, C>>>,
    Path(id): Path<Uuid>,
) -> Envelope<Product> {
    service.toggle_featured(id).await.into()
}
