//! 产品数据模型

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// 库存不足阈值，数量低于该值的产品会被标记
pub const LOW_STOCK_THRESHOLD: f64 = 5.0;

/// 可选的产品分类
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Clothing",
    "Food",
    "Furniture",
    "Tools",
    "Office",
    "Other",
];

/// 产品名称只允许字母和空白
pub(crate) static LETTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("letters pattern compiles"));

pub(crate) const NAME_MESSAGE: &str = "Product Name must contain letters only!";
pub(crate) const QTY_MESSAGE: &str = "Quantity must be a positive number!";
pub(crate) const PRICE_MESSAGE: &str = "Price must be a positive number!";
pub(crate) const CATEGORY_MESSAGE: &str = "Please select a category!";

/// 持久化的产品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub qty: f64,
    pub price: f64,
    /// 每次更新递增，用于检测并发修改
    #[serde(default = "initial_version")]
    pub version: i64,
}

fn initial_version() -> i64 {
    1
}

impl Product {
    /// 由存储层分配 id 后构造新记录
    pub fn new(id: Uuid, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
            qty: fields.qty,
            price: fields.price,
            version: initial_version(),
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.qty < LOW_STOCK_THRESHOLD
    }

    /// 当前记录的可编辑字段，附带版本号
    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            category: self.category.clone(),
            qty: self.qty,
            price: self.price,
            version: Some(self.version),
        }
    }

    /// 整体替换可编辑字段（不是局部补丁）
    pub fn replace_fields(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.category = fields.category;
        self.qty = fields.qty;
        self.price = fields.price;
        self.version += 1;
    }
}

/// 创建/更新请求体
///
/// `version` 只在更新时有意义：携带时必须与存储中的版本一致，
/// 省略则按最后写入为准。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductFields {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(range(min = 0.0, message = "Quantity must be a positive number!"))]
    pub qty: f64,
    #[validate(range(min = 0.0, message = "Price must be a positive number!"))]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl ProductFields {
    pub fn new(name: impl Into<String>, category: impl Into<String>, qty: f64, price: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            qty,
            price,
            version: None,
        }
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && LETTERS_RE.is_match(trimmed)
}

pub(crate) fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(field_error("letters_only", NAME_MESSAGE))
    }
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if is_known_category(category) {
        Ok(())
    } else {
        Err(field_error("unknown_category", CATEGORY_MESSAGE))
    }
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}
