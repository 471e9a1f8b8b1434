use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shaobing_core::notify::error::NotifyError;
use shaobing_core::notify::port::Notifier;
use tracing::debug;

use crate::new_client;

/// # Summary
/// 群机器人 Webhook 通知器（企业微信/钉钉风格的 `text` 消息）。
///
/// # Invariants
/// * `url` 在构造时校验为 http(s) 地址。
/// * 平台返回非 2xx 或 `errcode != 0` 均视为投递失败。
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

/// 消息体 `{"msgtype":"text","text":{"content":..}}`
#[derive(Serialize)]
struct TextMessage<'a> {
    msgtype: &'static str,
    text: TextContent<'a>,
}

#[derive(Serialize)]
struct TextContent<'a> {
    content: &'a str,
}

/// 平台回执；缺省字段视为成功
#[derive(Deserialize, Default)]
struct Receipt {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: String,
}

impl WebhookNotifier {
    /// # Summary
    /// 创建 Webhook 通知器。
    ///
    /// # Arguments
    /// * `url` - 机器人 Webhook 完整地址（含 key/access_token）。
    ///
    /// # Returns
    /// * 地址不是 http(s) 时返回 `NotifyError::Config`。
    pub fn new(url: impl Into<String>) -> Result<Self, NotifyError> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(NotifyError::Config(format!("Invalid webhook url: {}", url)));
        }
        Ok(Self {
            url,
            client: new_client(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    /// # Summary
    /// 以 `主题\n正文` 的纯文本消息投递。
    ///
    /// # Logic
    /// 1. 组装 `text` 消息并 POST。
    /// 2. 校验 HTTP 状态。
    /// 3. 回执为 JSON 时校验 `errcode`；非 JSON 回执按成功处理。
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        let text = if subject.is_empty() {
            content.to_string()
        } else {
            format!("{}\n{}", subject, content)
        };
        let payload = TextMessage {
            msgtype: "text",
            text: TextContent { content: &text },
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(NotifyError::Platform(format!(
                "Webhook returned {}: {}",
                status, body
            )));
        }

        let receipt: Receipt = serde_json::from_str(&body).unwrap_or_default();
        if receipt.errcode != 0 {
            return Err(NotifyError::Platform(format!(
                "Webhook errcode {}: {}",
                receipt.errcode, receipt.errmsg
            )));
        }

        debug!("Webhook delivered {} bytes", text.len());
        Ok(())
    }
}
