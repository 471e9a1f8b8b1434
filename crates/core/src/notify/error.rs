use thiserror::Error;

/// # Summary
/// 告警投递错误枚举。
///
/// # Invariants
/// - 投递失败只影响本次中继结果，不影响流水线产出。
#[derive(Error, Debug)]
pub enum NotifyError {
    /// 网络连接或传输错误
    #[error("Network error: {0}")]
    Network(String),

    /// 配置错误 (如缺少 Webhook 地址或 Bot Token)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 目标平台返回的错误 (如 Telegram API Error、群机器人 errcode 非 0)
    #[error("Platform error: {0}")]
    Platform(String),
}
