//! 产品 API 客户端
//!
//! `HttpProductApi` 通过 HTTP 访问后端；`LocalProductApi` 在进程内直接调用
//! [`ProductService`]，用于纯内存模式和测试。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use uuid::Uuid;

use crate::app::product::{
    model::{Product, ProductFields},
    service::ProductService,
};
use crate::core::{
    error::{CoreError, ErrorResponse},
    response::ApiResponse,
};
use crate::infrastructure::config::ClientConfig;

/// 客户端错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Status { status: 409, .. })
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Status {
            status: err.status_code().as_u16(),
            message: err.to_string(),
        }
    }
}

/// 后端产品接口
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ApiError>;

    async fn create(&self, fields: &ProductFields) -> Result<(), ApiError>;

    async fn update(&self, id: Uuid, fields: &ProductFields) -> Result<(), ApiError>;

    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

/// 基于 reqwest 的 HTTP 客户端
pub struct HttpProductApi {
    client: Client,
    base: String,
}

impl HttpProductApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base)
    }

    fn product_url(&self, id: Uuid) -> String {
        format!("{}/products/{}", self.base, id)
    }
}

/// 非 2xx 状态转换为 [`ApiError::Status`]，尽量带上服务端的错误消息
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn expect_ack(response: Response) -> Result<(), ApiError> {
    let ack: ApiResponse = check_status(response)
        .await?
        .json()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    if ack.success {
        Ok(())
    } else {
        Err(ApiError::Decode("server did not acknowledge the operation".to_string()))
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(self.products_url())
            .send()
            .await
            .map_err(network)?;

        check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.products_url())
            .json(fields)
            .send()
            .await
            .map_err(network)?;

        expect_ack(response).await
    }

    async fn update(&self, id: Uuid, fields: &ProductFields) -> Result<(), ApiError> {
        let response = self
            .client
            .put(self.product_url(id))
            .json(fields)
            .send()
            .await
            .map_err(network)?;

        expect_ack(response).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.product_url(id))
            .send()
            .await
            .map_err(network)?;

        expect_ack(response).await
    }
}

/// 进程内客户端，直接调用服务层
#[derive(Clone)]
pub struct LocalProductApi {
    service: ProductService,
}

impl LocalProductApi {
    pub fn new(service: ProductService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ProductApi for LocalProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.service.list_products().await?)
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), ApiError> {
        self.service.create_product(fields.clone()).await?;
        Ok(())
    }

    async fn update(&self, id: Uuid, fields: &ProductFields) -> Result<(), ApiError> {
        self.service.update_product(id, fields.clone()).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.service.delete_product(id).await?;
        Ok(())
    }
}
