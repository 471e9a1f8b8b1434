//! # Webhook 接入控制器
//!
//! 接收外部告警，经流水线规范化后中继到通知渠道。

use axum::Json;
use axum::extract::{Query, State};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::flatten::body_to_text;
use crate::server::AppState;
use crate::types::{WebhookQuery, WebhookResponse};

/// 接收告警
///
/// 请求体可以是纯文本，也可以是 JSON 对象 (展平为 `键: 值` 行后处理)。
/// 投递失败不会导致请求失败，而是以 `delivered: false` 返回。
#[utoipa::path(
    post,
    path = "/api/v1/webhook",
    tag = "告警 (Alert)",
    params(WebhookQuery),
    request_body(content = String, content_type = "text/plain", description = "告警原文或 JSON 对象"),
    responses(
        (status = 200, description = "处理完成", body = WebhookResponse),
        (status = 400, description = "请求体为空"),
        (status = 401, description = "令牌不匹配")
    )
)]
pub async fn receive_alert(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    body: String,
) -> Result<Json<WebhookResponse>, ApiError> {
    // 1. 令牌校验
    if let Some(expected) = state.token.as_deref() {
        if query.token.as_deref() != Some(expected) {
            return Err(ApiError::Unauthorized("Invalid webhook token".into()));
        }
    }

    // 2. 请求体 → 流水线输入
    let text = body_to_text(&body);
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("Empty alert body".into()));
    }

    // 3. 规范化
    let message = state.pipeline.process(&text).await;

    // 4. 中继
    let delivered = match &state.notifier {
        Some(notifier) => match notifier.notify(&state.subject, &message).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Alert delivery failed: {}", e);
                false
            }
        },
        None => false,
    };
    info!(
        "Webhook handled: {} bytes in, delivered={}",
        body.len(),
        delivered
    );

    Ok(Json(WebhookResponse { message, delivered }))
}
