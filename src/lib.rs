//! # 库存管理
//!
//! - `store`：产品存储（PostgreSQL / 内存）
//! - `app`：REST 接口与服务层校验
//! - `client`：客户端缓存、视图渲染、表单控制器与 CSV 导出
//! - `infrastructure`：配置、日志、数据库连接池

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;
pub mod store;

pub use app::product::model::{Product, ProductFields, CATEGORIES, LOW_STOCK_THRESHOLD};
pub use store::{ProductStore, StoreError};
