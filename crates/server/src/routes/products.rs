use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::product::{Model as Product, ProductCreateInput, ProductUpdateInput};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

#[utoipa::path(
    get, path = "/products", tag = "products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Persistence Error", body = crate::errors::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let list = state.products.find_all().await?;
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = ProductCreateInput,
    responses(
        (status = 201, description = "Created", body = Product),
        (status = 500, description = "Persistence Error", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<ProductCreateInput>,
) -> Result<(StatusCode, Json<Product>), JsonApiError> {
    let created = state.products.create(input).await?;
    info!(id = created.id, name = %created.name, "created product");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = Product),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Product>, JsonApiError> {
    match state.products.find_one(id).await? {
        Some(p) => Ok(Json(p)),
        None => Err(JsonApiError::not_found(format!("product {} not found", id))),
    }
}

#[utoipa::path(
    patch, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductUpdateInput,
    responses(
        (status = 200, description = "Updated", body = Product),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 500, description = "Persistence Error", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<ProductUpdateInput>,
) -> Result<Json<Product>, JsonApiError> {
    let updated = state.products.update(id, input).await?;
    info!(id = updated.id, "updated product");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted; body is the removed product", body = Product),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 500, description = "Persistence Error", body = crate::errors::ErrorBody)
    )
)]
pub async fn remove(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Product>, JsonApiError> {
    let removed = state.products.remove(id).await?;
    info!(id = removed.id, "deleted product");
    Ok(Json(removed))
}
