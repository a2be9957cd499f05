use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use service_core::errors::AppError;

use crate::enrichment::PeerDirectory;
use crate::models::{NewOrder, Order, OrderChanges};
use crate::store::OrderStore;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderPayload {
    pub user_id: i32,
    pub product_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    /// Display name from the users service, or "User #<id>" when the
    /// lookup cannot produce one.
    pub user_name: String,
    pub product_name: String,
    pub created_at: String,
}

/// Builds the response shape for one order, including the two peer
/// lookups. Enrichment failures degrade to placeholders and never fail
/// the request.
async fn to_response(order: Order, peers: &PeerDirectory) -> OrderResponse {
    let user_name = peers.user_name(order.user_id).await.into_name();
    let product_name = peers.product_name(order.product_id).await.into_name();
    OrderResponse {
        id: order.id,
        user_id: order.user_id,
        product_id: order.product_id,
        user_name,
        product_name,
        created_at: order.created_at.to_rfc3339(),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Orders Service" }))
}

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "All orders with display names", body = [OrderResponse]),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    store: web::Data<OrderStore>,
    peers: web::Data<PeerDirectory>,
) -> Result<HttpResponse, AppError> {
    let store = store.into_inner();
    let rows = web::block(move || store.list())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let mut items = Vec::with_capacity(rows.len());
    for order in rows {
        items.push(to_response(order, &peers).await);
    }
    Ok(HttpResponse::Ok().json(items))
}

/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    store: web::Data<OrderStore>,
    peers: web::Data<PeerDirectory>,
    body: web::Json<OrderPayload>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let store = store.into_inner();
    let created = web::block(move || {
        store.insert(NewOrder {
            user_id: body.user_id,
            product_id: body.product_id,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(to_response(created, &peers).await))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    store: web::Data<OrderStore>,
    peers: web::Data<PeerDirectory>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    let order = web::block(move || store.get(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match order {
        Some(order) => Ok(HttpResponse::Ok().json(to_response(order, &peers).await)),
        None => Err(AppError::NotFound),
    }
}

/// PUT /orders/{id}
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Order replaced", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    store: web::Data<OrderStore>,
    peers: web::Data<PeerDirectory>,
    path: web::Path<i32>,
    body: web::Json<OrderPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let store = store.into_inner();
    let updated = web::block(move || {
        store.replace(
            id,
            OrderChanges {
                user_id: body.user_id,
                product_id: body.product_id,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(to_response(updated, &peers).await))
}

/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    store: web::Data<OrderStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    web::block(move || store.delete(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "Order deleted successfully" })))
}
