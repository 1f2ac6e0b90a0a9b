//! 产品业务服务
//!
//! 存储层不做字段校验，所有写入在这里重新校验后再转发。

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::model::{Product, ProductFields};
use crate::core::error::CoreError;
use crate::store::ProductStore;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.list().await?)
    }

    pub async fn count_products(&self) -> Result<usize, CoreError> {
        Ok(self.store.count().await?)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, CoreError> {
        Ok(self.store.get(id).await?)
    }

    pub async fn create_product(&self, fields: ProductFields) -> Result<Product, CoreError> {
        fields.validate()?;
        let fields = normalize(fields);

        let product = self.store.create(fields).await?;
        info!("Created product: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        fields: ProductFields,
    ) -> Result<Product, CoreError> {
        fields.validate()?;
        let fields = normalize(fields);

        let product = self.store.update(id, fields).await?;
        info!(
            "Updated product: {} ({}) to version {}",
            product.name, product.id, product.version
        );
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        info!("Deleted product: {}", id);
        Ok(())
    }
}

fn normalize(mut fields: ProductFields) -> ProductFields {
    fields.name = fields.name.trim().to_string();
    fields
}
