use reqwest::{Client, Response};
use shaobing_core::symbol::error::QuoteError;
use std::time::Duration;

/// 浏览器 User-Agent，部分行情接口会拒绝默认 UA
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// # Summary
/// 将行情接口返回的 GBK 字节解码为字符串。
///
/// # Logic
/// 1. 使用 GBK 解码（这些老牌行情接口不返回 UTF-8）。
/// 2. 出现无法映射的字节时视为解码失败。
pub fn decode_gbk(bytes: &[u8]) -> Result<String, QuoteError> {
    let (text, _, had_errors) = encoding_rs::GBK.decode(bytes);
    if had_errors {
        return Err(QuoteError::Decode("invalid GBK byte sequence".to_string()));
    }
    Ok(text.into_owned())
}

/// # Summary
/// 构建行情源共用的 HTTP 客户端。
///
/// # Arguments
/// * `timeout`: 客户端级别的请求超时。
/// * `referer`: 可选的 Referer 头。
pub(crate) fn build_client(timeout: Duration, referer: Option<&str>) -> Result<Client, QuoteError> {
    shaobing_core::tls::ensure_crypto_provider();
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(USER_AGENT),
    );
    if let Some(referer) = referer {
        let value = reqwest::header::HeaderValue::from_str(referer)
            .map_err(|e| QuoteError::Network(e.to_string()))?;
        headers.insert(reqwest::header::REFERER, value);
    }

    Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| QuoteError::Network(e.to_string()))
}

/// # Summary
/// 发送 GET 请求并以 GBK 解码响应体。
///
/// # Logic
/// 1. 网络错误映射为 `QuoteError::Network`。
/// 2. 非 2xx 映射为 `QuoteError::Status`。
/// 3. 读取完整字节后解码。
pub(crate) async fn fetch_gbk(client: &Client, url: &str) -> Result<String, QuoteError> {
    let resp: Response = client
        .get(url)
        .send()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(QuoteError::Status(resp.status().as_u16()));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| QuoteError::Network(e.to_string()))?;
    decode_gbk(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gbk() {
        let (bytes, _, _) = encoding_rs::GBK.encode("岳阳兴长");
        assert_eq!(decode_gbk(&bytes).unwrap(), "岳阳兴长");
        assert_eq!(decode_gbk(b"plain ascii").unwrap(), "plain ascii");
    }

    #[test]
    fn test_decode_gbk_rejects_truncated_sequence() {
        let (bytes, _, _) = encoding_rs::GBK.encode("腾讯");
        let truncated = &bytes[..bytes.len() - 1];
        assert!(decode_gbk(truncated).is_err());
    }
}
