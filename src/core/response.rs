//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 写操作的确认响应：`{"success": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
}

impl ApiResponse {
    pub fn success() -> Self {
        Self { success: true }
    }
}
