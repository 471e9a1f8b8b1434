//! # API 统一错误处理
//!
//! 将请求处理中的错误映射到 HTTP 状态码与 JSON 响应体。

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::ApiErrorResponse;

/// API 层统一错误枚举
///
/// # Invariants
/// - 投递失败不经过本类型：它们以 `delivered: false` 反映在正常响应中。
#[derive(Error, Debug)]
pub enum ApiError {
    /// Webhook 令牌不匹配 (401)
    #[error("认证失败: {0}")]
    Unauthorized(String),

    /// 请求体为空或无法解析 (400)
    #[error("请求参数错误: {0}")]
    BadRequest(String),

    /// 内部错误 (500)
    #[error("内部服务错误: {0}")]
    Internal(String),
}

/// 将 `ApiError` 转换为 axum 的 HTTP 响应
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Internal(msg) => {
                // 内部错误只记录日志，不向客户端透传细节
                tracing::error!("内部服务错误: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "服务器内部错误".to_string(),
                )
            }
        };

        let body = Json(ApiErrorResponse::from_msg(message));
        (status, body).into_response()
    }
}
