mod settings;

use std::sync::Arc;
use std::time::Duration;

use shaobing_alert::pipeline::AlertPipeline;
use shaobing_api::server::{AppState, start_server};
use shaobing_cache::mem::MemCache;
use shaobing_core::config::{AppConfig, NotifyConfig};
use shaobing_core::notify::error::NotifyError;
use shaobing_core::notify::port::Notifier;
use shaobing_core::symbol::port::NameSource;
use shaobing_feed::sina::SinaProvider;
use shaobing_feed::tencent::TencentProvider;
use shaobing_notify::telegram::TelegramNotifier;
use shaobing_notify::webhook::WebhookNotifier;
use shaobing_symbol::classify::DefaultClassifier;
use shaobing_symbol::resolver::NameResolver;
use shaobing_symbol::table::StaticTable;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到流水线与 API 层。
///
/// # Logic
/// 1. 加载分层配置并初始化全局日志。
/// 2. 实例化基础设施层（缓存、行情源、通知渠道）。
/// 3. 组装名称解析器与告警流水线。
/// 4. 启动 HTTP 服务，收到 Ctrl-C 后优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 配置与日志
    let config = settings::load("config/default")?;
    let _guard = init_tracing();
    shaobing_core::tls::ensure_crypto_provider();
    info!("Shaobing relay starting...");

    // 2. 名称解析
    let resolver = build_resolver(&config)?;

    // 3. 流水线
    let pipeline = AlertPipeline::new(Arc::new(resolver), config.pipeline.stray_lines)?;

    // 4. 通知渠道
    let notifier = build_notifier(&config.notify)?;
    if notifier.is_none() {
        warn!("No notifier configured, alerts will only be normalized");
    }

    let state = AppState {
        pipeline: Arc::new(pipeline),
        notifier,
        token: config.server.token.clone().filter(|t| !t.is_empty()),
        subject: config.notify.subject.clone(),
    };

    // 5. 启动服务并挂起，等待外部退出信号
    start_server(state, &config.server.bind_addr(), async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutdown signal received. Exiting...");
    })
    .await?;

    Ok(())
}

/// # Summary
/// 安装日志订阅器：控制台 + 按天滚动的文件。
///
/// # Logic
/// 过滤级别取自 `RUST_LOG`，缺省为 `info`。
///
/// # Returns
/// 文件写入线程的守卫，进程退出前必须持有。
fn init_tracing() -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "shaobing.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();
    guard
}

/// # Summary
/// 组装名称解析器：内置表 → 新浪 → 腾讯，共享一个内存缓存。
fn build_resolver(config: &AppConfig) -> Result<NameResolver, Box<dyn std::error::Error>> {
    let resolver = &config.resolver;
    let timeout = Duration::from_millis(resolver.timeout_ms);
    let ttl = (resolver.cache_ttl_secs > 0).then(|| Duration::from_secs(resolver.cache_ttl_secs));

    let sources: Vec<Arc<dyn NameSource>> = vec![
        Arc::new(StaticTable::builtin()) as Arc<dyn NameSource>,
        Arc::new(SinaProvider::new(resolver.sina_base_url.clone(), timeout)?),
        Arc::new(TencentProvider::new(resolver.tencent_base_url.clone(), timeout)?),
    ];
    info!(
        "Name resolver: {} source(s), timeout {}ms, cache capacity {}",
        sources.len(),
        resolver.timeout_ms,
        resolver.cache_capacity
    );

    Ok(NameResolver::new(
        Arc::new(MemCache::new(resolver.cache_capacity, ttl)),
        Arc::new(DefaultClassifier),
        sources,
        timeout,
    ))
}

/// # Summary
/// 按配置选择通知渠道：Webhook 优先，其次 Telegram，都未配置时返回 None。
fn build_notifier(config: &NotifyConfig) -> Result<Option<Arc<dyn Notifier>>, NotifyError> {
    if let Some(url) = config.webhook_url.as_deref().filter(|u| !u.is_empty()) {
        info!("Relaying alerts to webhook");
        return Ok(Some(Arc::new(WebhookNotifier::new(url)?)));
    }
    match (&config.telegram_bot_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            info!("Relaying alerts to Telegram chat {}", chat_id);
            Ok(Some(Arc::new(TelegramNotifier::new(
                token.clone(),
                chat_id.clone(),
            )?)))
        }
        _ => Ok(None),
    }
}
