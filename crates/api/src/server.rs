//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use shaobing_alert::pipeline::AlertPipeline;
use shaobing_core::notify::port::Notifier;

use crate::routes::{health, webhook};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 所有字段在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - `notifier` 为空时只返回规范化结果，不做投递。
#[derive(Clone)]
pub struct AppState {
    /// 告警规范化流水线
    pub pipeline: Arc<AlertPipeline>,
    /// 下游通知渠道
    pub notifier: Option<Arc<dyn Notifier>>,
    /// Webhook 共享令牌
    pub token: Option<String>,
    /// 投递消息标题
    pub subject: String,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "哨兵告警中继 API",
        version = "0.1.0",
        description = "接收交易告警 Webhook，补全证券名称、规范化为信号摘要后中继到群机器人或 Telegram。",
        license(name = "MIT")
    ),
    tags(
        (name = "告警 (Alert)", description = "告警接入与中继"),
        (name = "系统 (System)", description = "存活检查")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(webhook::receive_alert))
        .routes(routes!(health::health))
        .with_state(state)
        .split_for_parts();

    // 告警来源不固定，允许所有来源
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 启动 HTTP 监听，直到 `shutdown` 完成。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
/// * `shutdown` - 优雅退出信号
///
/// # Returns
/// 绑定或服务失败时返回错误。
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(state);

    tracing::info!("🚀 Shaobing relay listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
