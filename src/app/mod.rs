//! HTTP 路由组装

pub mod product;

use std::time::Duration;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::{error::CoreError, middleware::request_logging_middleware};
use product::handler::{self, AppState};

/// 创建路由
pub fn router(state: AppState, timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/products",
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            "/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    let count = state.product_service.count_products().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "store": state.product_service.store_kind(),
        "products": count,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
