use crate::codec::{build_client, fetch_gbk};
use async_trait::async_trait;
use reqwest::Client;
use shaobing_core::common::{Exchange, InstrumentCode};
use shaobing_core::symbol::error::QuoteError;
use shaobing_core::symbol::port::NameSource;
use std::time::Duration;
use tracing::debug;

/// 新浪行情接口要求的 Referer
const SINA_REFERER: &str = "https://finance.sina.com.cn";

/// # Summary
/// 新浪财经行情提供者（主数据源）。
///
/// # Invariants
/// - 响应形如 `var hq_str_sz000819="岳阳兴长,8.50,...";`，GBK 编码。
/// - 名称取第一个 `"` 分隔段中的首个逗号字段。
#[derive(Clone)]
pub struct SinaProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口根地址，如 `https://hq.sinajs.cn`
    base_url: String,
}

impl SinaProvider {
    /// # Summary
    /// 创建一个新的 SinaProvider 实例。
    ///
    /// # Logic
    /// 1. 配置客户端超时与浏览器 User-Agent。
    /// 2. 设置接口要求的 Referer 头，否则会返回 403。
    ///
    /// # Arguments
    /// * `base_url`: 接口根地址。
    /// * `timeout`: 客户端请求超时。
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, QuoteError> {
        Ok(Self {
            client: build_client(timeout, Some(SINA_REFERER))?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, symbol: &str) -> String {
        format!("{}/list={}", self.base_url, symbol)
    }
}

/// # Summary
/// 从新浪响应文本中提取展示名称。
///
/// # Logic
/// 1. 以 `"` 切分，取第一个被引号包围的段。
/// 2. 以 `,` 切分该段，取首字段并去除空白。
///
/// # Returns
/// 名称非空时返回，否则返回 `QuoteError`。
pub fn parse_name(payload: &str, symbol: &str) -> Result<String, QuoteError> {
    let quoted = payload
        .split('"')
        .nth(1)
        .ok_or_else(|| QuoteError::Decode(format!("no quoted field in sina payload for {symbol}")))?;
    let name = quoted.split(',').next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(QuoteError::Empty(symbol.to_string()));
    }
    Ok(name.to_string())
}

#[async_trait]
impl NameSource for SinaProvider {
    fn id(&self) -> &'static str {
        "sina"
    }

    /// # Summary
    /// 查询数字代码的展示名称。
    ///
    /// # Logic
    /// 1. 符号代码（无交易所）不适用，直接返回 `Ok(None)`。
    /// 2. 拼接市场前缀后请求接口并解析。
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
        debug!("sina resolved {} -> {}", symbol, name);
        Ok(Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name() {
        let payload = "var hq_str_sz000819=\"岳阳兴长,8.500,8.470,8.620\";\n";
        assert_eq!(parse_name(payload, "sz000819").unwrap(), "岳阳兴长");
    }

    #[test]
    fn test_parse_name_empty_quote() {
        let payload = "var hq_str_sz999999=\"\";";
        assert!(matches!(
            parse_name(payload, "sz999999"),
            Err(QuoteError::Empty(_))
        ));
    }

    #[test]
    fn test_parse_name_garbage() {
        assert!(matches!(
            parse_name("Forbidden", "sh600000"),
            Err(QuoteError::Decode(_))
        ));
    }

    #[test]
    fn test_url_template() {
        let p = SinaProvider::new("http://127.0.0.1:9/", Duration::from_secs(1)).unwrap();
        assert_eq!(p.url("hk00700"), "http://127.0.0.1:9/list=hk00700");
    }
}
