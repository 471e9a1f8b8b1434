pub mod telegram;
pub mod webhook;

/// 通知渠道共用的 HTTP 客户端
pub(crate) fn new_client() -> reqwest::Client {
    shaobing_core::tls::ensure_crypto_provider();
    reqwest::Client::new()
}
