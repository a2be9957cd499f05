use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use service_core::errors::AppError;

use crate::models::{NewProduct, Product, ProductChanges};
use crate::store::ProductStore;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Products Service" }))
}

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
    ),
    tag = "products"
)]
pub async fn list_products(store: web::Data<ProductStore>) -> Result<HttpResponse, AppError> {
    let store = store.into_inner();
    let rows = web::block(move || store.list())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<ProductResponse> = rows.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "products"
)]
pub async fn create_product(
    store: web::Data<ProductStore>,
    body: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let store = store.into_inner();
    let created = web::block(move || {
        store.insert(NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    store: web::Data<ProductStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    let product = web::block(move || store.get(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match product {
        Some(product) => Ok(HttpResponse::Ok().json(ProductResponse::from(product))),
        None => Err(AppError::NotFound),
    }
}

/// PUT /products/{id}
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product replaced", body = ProductResponse),
        (status = 404, description = "Product not found"),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "products"
)]
pub async fn update_product(
    store: web::Data<ProductStore>,
    path: web::Path<i32>,
    body: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let store = store.into_inner();
    let updated = web::block(move || {
        store.replace(
            id,
            ProductChanges {
                name: body.name,
                description: body.description,
                price: body.price,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(updated)))
}

/// DELETE /products/{id}
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    store: web::Data<ProductStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    web::block(move || store.delete(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Product deleted successfully" })))
}
