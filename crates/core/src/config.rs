use crate::alert::entity::StrayLinePolicy;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub resolver: ResolverConfig,
    pub pipeline: PipelineConfig,
    pub notify: NotifyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 非空时要求 webhook 请求携带相同的 `?token=`
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// 单个行情源调用的等待上限 (毫秒)
    pub timeout_ms: u64,
    /// 名称缓存条目上限，超过后整体清空
    pub cache_capacity: usize,
    /// 名称缓存有效期 (秒)，为 0 表示仅受容量约束
    pub cache_ttl_secs: u64,
    pub sina_base_url: String,
    pub tencent_base_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub stray_lines: StrayLinePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// 群机器人 Webhook 地址
    pub webhook_url: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    /// 投递消息的标题
    pub subject: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            token: None,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 2000,
            cache_capacity: 2048,
            cache_ttl_secs: 86400,
            sina_base_url: "https://hq.sinajs.cn".to_string(),
            tencent_base_url: "https://qt.gtimg.cn".to_string(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            telegram_bot_token: None,
            telegram_chat_id: None,
            subject: "交易信号".to_string(),
        }
    }
}

impl ServerConfig {
    /// 监听地址，如 `0.0.0.0:8080`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr(), "0.0.0.0:8080");
        assert!(config.server.token.is_none());
        assert_eq!(config.resolver.timeout_ms, 2000);
        assert_eq!(config.resolver.cache_capacity, 2048);
        assert_eq!(config.pipeline.stray_lines, StrayLinePolicy::Drop);
        assert_eq!(config.notify.subject, "交易信号");
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let json = r#"{"resolver": {"timeout_ms": 1500}, "pipeline": {"stray_lines": "standalone"}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.resolver.timeout_ms, 1500);
        assert_eq!(config.resolver.sina_base_url, "https://hq.sinajs.cn");
        assert_eq!(config.pipeline.stray_lines, StrayLinePolicy::Standalone);
        assert_eq!(config.server.port, 8080);
    }
}
