use async_trait::async_trait;
use serde::Serialize;
use shaobing_core::notify::error::NotifyError;
use shaobing_core::notify::port::Notifier;

use crate::new_client;

/// Telegram Bot API 默认地址
pub const TELEGRAM_API: &str = "https://api.telegram.org";

/// # Summary
/// 通过 Telegram Bot API 投递告警摘要。
///
/// # Invariants
/// * `bot_token` 与 `chat_id` 非空，构造时校验。
/// * 摘要以纯文本发送，不启用 Markdown 解析（告警中的 `*`、`_` 会破坏格式）。
pub struct TelegramNotifier {
    api_base: String,
    bot_token: String,
    chat_id: String,
    client: reqwest::Client,
}

/// `sendMessage` 请求体
#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    /// # Summary
    /// 创建指向官方 API 的通知器。
    ///
    /// # Arguments
    /// * `bot_token` - Bot Token。
    /// * `chat_id` - 目标会话 ID。
    pub fn new(bot_token: String, chat_id: String) -> Result<Self, NotifyError> {
        Self::with_api_base(TELEGRAM_API, bot_token, chat_id)
    }

    /// 指定 API 根地址 (自建 Bot API 服务或测试桩)
    pub fn with_api_base(
        api_base: impl Into<String>,
        bot_token: String,
        chat_id: String,
    ) -> Result<Self, NotifyError> {
        if bot_token.trim().is_empty() || chat_id.trim().is_empty() {
            return Err(NotifyError::Config(
                "Telegram bot token and chat id are required".to_string(),
            ));
        }
        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
            client: new_client(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// # Summary
    /// 发送消息到配置的 Telegram 会话。
    ///
    /// # Logic
    /// 1. 拼接 `sendMessage` 地址。
    /// 2. 主题与正文以换行分隔。
    /// 3. 非 2xx 返回 `Platform` 错误并附带响应体。
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text: format!("{}\n{}", subject, content),
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Platform(format!(
                "Telegram API error: {}",
                error_text
            )));
        }

        Ok(())
    }
}
