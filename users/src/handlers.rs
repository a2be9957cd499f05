use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use service_core::errors::AppError;
use service_core::validate::require_valid_email;

use crate::models::{NewUser, User, UserChanges};
use crate::store::UserStore;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Users Service" }))
}

/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
    ),
    tag = "users"
)]
pub async fn list_users(store: web::Data<UserStore>) -> Result<HttpResponse, AppError> {
    let store = store.into_inner();
    let rows = web::block(move || store.list())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let items: Vec<UserResponse> = rows.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "users"
)]
pub async fn create_user(
    store: web::Data<UserStore>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    require_valid_email(&body.email)?;

    let store = store.into_inner();
    let created = web::block(move || {
        store.insert(NewUser {
            name: body.name,
            email: body.email,
        })
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn get_user(
    store: web::Data<UserStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    let user = web::block(move || store.get(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        None => Err(AppError::NotFound),
    }
}

/// PUT /users/{id}
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced", body = UserResponse),
        (status = 400, description = "Email already registered"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Malformed payload"),
    ),
    tag = "users"
)]
pub async fn update_user(
    store: web::Data<UserStore>,
    path: web::Path<i32>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    require_valid_email(&body.email)?;

    let store = store.into_inner();
    let updated = web::block(move || {
        store.replace(
            id,
            UserChanges {
                name: body.name,
                email: body.email,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
pub async fn delete_user(
    store: web::Data<UserStore>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let store = store.into_inner();
    web::block(move || store.delete(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully" })))
}
