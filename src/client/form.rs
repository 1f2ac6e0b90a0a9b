//! 新建/编辑表单控制器
//!
//! 两种状态：`Creating`（未持有 id）和 `Editing`（持有正在编辑的记录 id 与版本）。
//! 提交时先同步校验全部字段，校验失败不会发出任何请求；请求失败时保持当前
//! 状态以便重试；成功后清空表单、回到 `Creating` 并整体刷新缓存。
//! 版本冲突时重新加载列表，并把持有的版本推进到最新，保留用户输入。

use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    api::ApiError,
    cache::ProductCache,
    Notice,
};
use crate::app::product::model::{
    is_known_category, is_valid_name, Product, ProductFields, CATEGORY_MESSAGE, NAME_MESSAGE,
    PRICE_MESSAGE, QTY_MESSAGE,
};

/// 非负十进制数，不接受符号和指数
static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("amount pattern compiles"));

/// 表单原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub qty: String,
    pub price: String,
    pub category: String,
}

impl FormInput {
    pub fn new(
        name: impl Into<String>,
        qty: impl Into<String>,
        price: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            qty: qty.into(),
            price: price.into(),
            category: category.into(),
        }
    }

    /// 用已有产品填充表单
    pub fn from_product(product: &Product) -> Self {
        Self::new(
            product.name.clone(),
            product.qty.to_string(),
            product.price.to_string(),
            product.category.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Creating,
    Editing { id: Uuid, version: i64 },
}

/// 字段校验错误，按名称、数量、价格、分类的顺序报告第一个
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{}", NAME_MESSAGE)]
    Name,
    #[error("{}", QTY_MESSAGE)]
    Quantity,
    #[error("{}", PRICE_MESSAGE)]
    Price,
    #[error("{}", CATEGORY_MESSAGE)]
    Category,
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] FieldError),

    #[error("A submission is already in progress.")]
    Busy,

    #[error("Operation failed, check the backend: {0}")]
    Api(#[from] ApiError),

    /// 记录已被他处修改；列表已重新加载，输入保留，可再次提交覆盖
    #[error("This product was changed elsewhere. The list has been reloaded; submit again to overwrite it.")]
    Conflict(#[source] ApiError),

    /// 写入已成功，表单已重置，但重新加载列表失败
    #[error("Product saved, but the list could not be reloaded: {0}")]
    Refresh(ApiError),
}

fn parse_amount(raw: &str) -> Option<f64> {
    if !AMOUNT_RE.is_match(raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

/// 校验原始输入并转换为请求字段
pub fn validate(input: &FormInput) -> Result<ProductFields, FieldError> {
    let name = input.name.trim();
    if !is_valid_name(name) {
        return Err(FieldError::Name);
    }

    let qty = parse_amount(input.qty.trim()).ok_or(FieldError::Quantity)?;
    let price = parse_amount(input.price.trim()).ok_or(FieldError::Price)?;

    let category = input.category.trim();
    if category.is_empty() || !is_known_category(category) {
        return Err(FieldError::Category);
    }

    Ok(ProductFields::new(name, category, qty, price))
}

#[derive(Default)]
struct FormData {
    state: FormState,
    input: FormInput,
    /// 每次外部修改递增，提交完成时据此判断表单是否已被改动
    revision: u64,
}

impl FormData {
    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

/// 提交期间持有的标记，离开作用域时释放
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Default)]
pub struct FormController {
    data: Mutex<FormData>,
    submitting: AtomicBool,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn state(&self) -> FormState {
        self.data.lock().await.state
    }

    pub async fn input(&self) -> FormInput {
        self.data.lock().await.input.clone()
    }

    pub async fn set_input(&self, input: FormInput) {
        let mut data = self.data.lock().await;
        data.input = input;
        data.touch();
    }

    /// 进入编辑状态，表单填入该产品的字段
    pub async fn begin_edit(&self, product: &Product) {
        let mut data = self.data.lock().await;
        data.state = FormState::Editing {
            id: product.id,
            version: product.version,
        };
        data.input = FormInput::from_product(product);
        data.touch();
    }

    /// 放弃编辑，回到新建状态
    pub async fn cancel(&self) {
        let mut data = self.data.lock().await;
        data.state = FormState::Creating;
        data.input = FormInput::default();
        data.touch();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn submit(&self, cache: &ProductCache) -> Result<Notice, FormError> {
        let (state, fields, revision) = {
            let data = self.data.lock().await;
            (data.state, validate(&data.input)?, data.revision)
        };

        let _in_flight = InFlight::acquire(&self.submitting).ok_or(FormError::Busy)?;

        let api = cache.api();
        let notice = match state {
            FormState::Editing { id, version } => {
                match api.update(id, &fields.with_version(version)).await {
                    Ok(()) => {}
                    Err(e) if e.is_conflict() => {
                        return Err(self.rebase(cache, id, revision, e).await);
                    }
                    Err(e) => return Err(e.into()),
                }
                info!("Updated product {}", id);
                Notice::success("Product updated successfully!")
            }
            FormState::Creating => {
                api.create(&fields).await?;
                info!("Created product {}", fields.name);
                Notice::success("Product added successfully!")
            }
        };

        // 请求期间表单被改动过则保留改动
        {
            let mut data = self.data.lock().await;
            if data.revision == revision {
                data.state = FormState::Creating;
                data.input = FormInput::default();
                data.touch();
            }
        }

        cache.refresh().await.map_err(FormError::Refresh)?;
        Ok(notice)
    }

    /// 版本冲突后重新加载，并让编辑状态指向记录的最新版本
    async fn rebase(
        &self,
        cache: &ProductCache,
        id: Uuid,
        revision: u64,
        conflict: ApiError,
    ) -> FormError {
        if let Err(e) = cache.refresh().await {
            warn!("Reload after conflict on {} failed: {}", id, e);
            return FormError::Api(conflict);
        }

        match cache.find(id).await {
            Some(latest) => {
                let mut data = self.data.lock().await;
                if data.revision == revision {
                    data.state = FormState::Editing {
                        id,
                        version: latest.version,
                    };
                }
                FormError::Conflict(conflict)
            }
            None => FormError::Api(conflict),
        }
    }
}
