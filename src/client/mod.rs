//! 库存客户端
//!
//! 控制流：用户操作 → 表单校验 → HTTP 请求 → 成功后整体重新加载缓存 → 重新渲染。

pub mod api;
pub mod app;
pub mod cache;
pub mod export;
pub mod form;
pub mod view;

use std::fmt;

pub use api::{ApiError, HttpProductApi, LocalProductApi, ProductApi};
pub use app::{InventoryApp, Tab};
pub use cache::ProductCache;
pub use form::{FieldError, FormController, FormError, FormInput, FormState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// 需要展示给用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}
