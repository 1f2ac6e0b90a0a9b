//! 内存存储实现

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{check_version, ProductStore, StoreError, StoreResult};
use crate::app::product::model::{Product, ProductFields};

/// 基于 `Vec` 的存储，保持插入顺序
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有记录初始化，主要用于测试
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> StoreResult<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, fields: ProductFields) -> StoreResult<Product> {
        let product = Product::new(Uuid::new_v4(), fields);
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: Uuid, fields: ProductFields) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;

        check_version(id, fields.version, product.version)?;
        product.replace_fields(fields);
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))?;
        products.remove(index);
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.products.read().await.len())
    }

    fn kind(&self) -> &'static str {
        "in-memory"
    }
}
