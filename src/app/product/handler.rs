//! 产品处理器

use axum::{extract::State, response::Json};
use uuid::Uuid;

use super::{
    model::{Product, ProductFields},
    service::ProductService,
};
use crate::core::{
    error::CoreError,
    extract::{JsonBody, PathParam},
    response::ApiResponse,
};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Product>, CoreError> {
    let product = state.product_service.get_product(id).await?;
    Ok(Json(product))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(fields): JsonBody<ProductFields>,
) -> Result<Json<ApiResponse>, CoreError> {
    state.product_service.create_product(fields).await?;
    Ok(Json(ApiResponse::success()))
}

/// PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(fields): JsonBody<ProductFields>,
) -> Result<Json<ApiResponse>, CoreError> {
    state.product_service.update_product(id, fields).await?;
    Ok(Json(ApiResponse::success()))
}

/// DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApiResponse>, CoreError> {
    state.product_service.delete_product(id).await?;
    Ok(Json(ApiResponse::success()))
}
