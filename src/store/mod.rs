//! 产品存储层
//!
//! 对单一产品集合提供增删改查。`PgProductStore` 是主要部署形态，
//! `MemoryProductStore` 满足同一契约，用于纯内存模式和测试。

use async_trait::async_trait;
use uuid::Uuid;

use crate::app::product::model::{Product, ProductFields};

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;

pub use memory::MemoryProductStore;
#[cfg(feature = "database")]
pub use postgres::PgProductStore;

/// 存储层错误类型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(Uuid),

    #[error("product {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict { id: Uuid, expected: i64, actual: i64 },

    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// 产品存储契约
///
/// `update` 整体替换可编辑字段；`update`/`delete` 针对不存在的 id
/// 返回 [`StoreError::NotFound`]，不会静默成功。
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 按插入顺序返回全部产品
    async fn list(&self) -> StoreResult<Vec<Product>>;

    async fn get(&self, id: Uuid) -> StoreResult<Product>;

    /// 分配新 id 并保存
    async fn create(&self, fields: ProductFields) -> StoreResult<Product>;

    async fn update(&self, id: Uuid, fields: ProductFields) -> StoreResult<Product>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// 产品数量，不加载记录
    async fn count(&self) -> StoreResult<usize>;

    /// 存储类型名称，用于健康检查
    fn kind(&self) -> &'static str;
}

/// 请求携带版本号时，必须与当前版本一致
pub(crate) fn check_version(id: Uuid, expected: Option<i64>, actual: i64) -> StoreResult<()> {
    match expected {
        Some(expected) if expected != actual => Err(StoreError::Conflict {
            id,
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}
