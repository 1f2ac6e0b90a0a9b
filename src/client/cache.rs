//! 客户端产品缓存
//!
//! 缓存内容只会被 [`ProductCache::refresh`] 整体替换，从不做局部修补；
//! 每次成功的写操作之后都从后端重新拉取全部数据。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::api::{ApiError, ProductApi};
use crate::app::product::model::Product;

#[derive(Default)]
struct Snapshot {
    products: Vec<Product>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub struct ProductCache {
    api: Arc<dyn ProductApi>,
    snapshot: RwLock<Snapshot>,
}

impl ProductCache {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    pub fn api(&self) -> &Arc<dyn ProductApi> {
        &self.api
    }

    /// 重新拉取全部产品；失败时保留原有内容
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let products = match self.api.list().await {
            Ok(products) => products,
            Err(e) => {
                warn!("Failed to refresh product cache: {}", e);
                return Err(e);
            }
        };

        let count = products.len();
        let mut snapshot = self.snapshot.write().await;
        snapshot.products = products;
        snapshot.refreshed_at = Some(Utc::now());
        debug!("Product cache refreshed with {} products", count);
        Ok(count)
    }

    pub async fn products(&self) -> Vec<Product> {
        self.snapshot.read().await.products.clone()
    }

    /// 按 id 查找，不依赖列表位置
    pub async fn find(&self, id: Uuid) -> Option<Product> {
        self.snapshot
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.snapshot.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.refreshed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use crate::app::product::model::ProductFields;

    /// 可切换为失败的假 API
    struct FlakyApi {
        products: Vec<Product>,
        failing: AtomicBool,
    }

    #[async_trait]
    impl ProductApi for FlakyApi {
        async fn list(&self) -> Result<Vec<Product>, ApiError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(ApiError::Network("connection refused".to_string()))
            } else {
                Ok(self.products.clone())
            }
        }

        async fn create(&self, _: &ProductFields) -> Result<(), ApiError> {
            unimplemented!()
        }

        async fn update(&self, _: Uuid, _: &ProductFields) -> Result<(), ApiError> {
            unimplemented!()
        }

        async fn delete(&self, _: Uuid) -> Result<(), ApiError> {
            unimplemented!()
        }
    }

    fn product(name: &str) -> Product {
        Product::new(Uuid::new_v4(), ProductFields::new(name, "Tools", 1.0, 1.0))
    }

    #[tokio::test]
    async fn refresh_replaces_contents_and_finds_by_id() {
        let products = vec![product("Widget"), product("Gadget")];
        let gadget_id = products[1].id;
        let api = Arc::new(FlakyApi {
            products,
            failing: AtomicBool::new(false),
        });
        let cache = ProductCache::new(api);
        assert!(cache.is_empty().await);
        assert!(cache.refreshed_at().await.is_none());

        assert_eq!(cache.refresh().await.unwrap(), 2);
        assert_eq!(cache.find(gadget_id).await.unwrap().name, "Gadget");
        assert!(cache.find(Uuid::new_v4()).await.is_none());
        assert!(cache.refreshed_at().await.is_some());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let api = Arc::new(FlakyApi {
            products: vec![product("Widget")],
            failing: AtomicBool::new(false),
        });
        let cache = ProductCache::new(api.clone());
        cache.refresh().await.unwrap();

        api.failing.store(true, Ordering::SeqCst);
        assert!(matches!(cache.refresh().await, Err(ApiError::Network(_))));
        assert_eq!(cache.len().await, 1);
    }
}
