//! # DTO (Data Transfer Object) 层
//!
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Webhook 查询参数
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WebhookQuery {
    /// 配置了 `server.token` 时必须与之相同
    pub token: Option<String>,
}

/// Webhook 处理结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookResponse {
    /// 规范化后的中继文本 (摘要，或无法解析时的增强原文)
    #[schema(example = "📊 信号汇总 共1条 | long:1\n🟢 平安银行(000001) | 周期: 5 | 信号: 多信号")]
    pub message: String,
    /// 是否已成功投递到下游通知渠道
    pub delivered: bool,
}

/// 存活检查结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "0.1.0")]
    pub version: String,
}

/// 失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
