use crate::codec::{build_client, fetch_gbk};
use async_trait::async_trait;
use reqwest::Client;
use shaobing_core::common::{Exchange, InstrumentCode};
use shaobing_core::symbol::error::QuoteError;
use shaobing_core::symbol::port::NameSource;
use std::time::Duration;
use tracing::debug;

/// # Summary
/// 腾讯行情提供者（备用数据源）。
///
/// # Invariants
/// - 响应形如 `v_sz000819="51~岳阳兴长~000819~8.50~...";`，GBK 编码。
/// - 名称为 `~` 分隔的第二个字段。
#[derive(Clone)]
pub struct TencentProvider {
    client: Client,
    base_url: String,
}

impl TencentProvider {
    /// # Summary
    /// 创建一个新的 TencentProvider 实例。
    ///
    /// # Arguments
    /// * `base_url`: 接口根地址，如 `https://qt.gtimg.cn`。
    /// * `timeout`: 客户端请求超时。
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, QuoteError> {
        Ok(Self {
            client: build_client(timeout, None)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, symbol: &str) -> String {
        format!("{}/q={}", self.base_url, symbol)
    }
}

/// # Summary
/// 从腾讯响应文本中提取展示名称。
///
/// # Logic
/// 1. 以 `~` 切分，取第二个字段。
/// 2. 未匹配的代码返回 `v_pv_none_match="1";`，切分后不足两段，视为解码失败。
pub fn parse_name(payload: &str, symbol: &str) -> Result<String, QuoteError> {
    let name = payload
        .split('~')
        .nth(1)
        .ok_or_else(|| QuoteError::Decode(format!("no `~` field in tencent payload for {symbol}")))?
        .trim();
    if name.is_empty() {
        return Err(QuoteError::Empty(symbol.to_string()));
    }
    Ok(name.to_string())
}

#[async_trait]
impl NameSource for TencentProvider {
    fn id(&self) -> &'static str {
        "tencent"
    }

    async fn lookup(
        &self,
        code: &InstrumentCode,
        exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError> {
        let Some(exchange) = exchange else {
            return Ok(None);
        };
        let symbol = exchange.quote_symbol(code);
        let payload = fetch_gbk(&self.client, &self.url(&symbol)).await?;
        let name = parse_name(&payload, &symbol)?;
        debug!("tencent resolved {} -> {}", symbol, name);
        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        let payload = "v_hk00700=\"100~腾讯控股~00700~368.200~\";";
        assert_eq!(parse_name(payload, "hk00700").unwrap(), "腾讯控股");
    }

    #[test]
    fn test_parse_name_no_match() {
        assert!(matches!(
            parse_name("v_pv_none_match=\"1\";", "sz999999"),
            Err(QuoteError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_name_empty_field() {
        assert!(matches!(
            parse_name("v_sz000001=\"51~~000001\";", "sz000001"),
            Err(QuoteError::Empty(_))
        ));
    }
}
