//! # `shaobing-api` - HTTP 接入层
//!
//! 哨兵告警中继的 HTTP 服务入口。
//! 使用 `axum` 构建路由，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收 TradingView 等平台推送的 Webhook 告警 (纯文本或 JSON)
//! - 将 JSON 告警展平为 `标签: 值` 文本后交给 `AlertPipeline`
//! - 通过注入的 `Notifier` 中继规范化后的摘要

pub mod error;
pub mod flatten;
pub mod routes;
pub mod server;
pub mod types;
