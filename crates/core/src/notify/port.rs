use crate::notify::error::NotifyError;
use async_trait::async_trait;

/// # Summary
/// 将规范化后的告警摘要投递到下游目标的接口。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync`，以便被多个请求并发共享。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 投递一条带主题的消息。
    ///
    /// # Logic
    /// 1. 按目标平台要求组装消息体。
    /// 2. 通过 HTTP 发送并校验平台返回。
    ///
    /// # Arguments
    /// * `subject` - 消息标题。
    /// * `content` - 摘要正文。
    ///
    /// # Returns
    /// * 成功返回 `Ok(())`，失败返回 `Err(NotifyError)`。
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError>;
}
