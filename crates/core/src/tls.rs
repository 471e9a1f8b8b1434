/// # Summary
/// 为进程安装 `ring` 加密后端，供所有基于 rustls 的 HTTP 客户端共用。
///
/// # Invariants
/// - 可重复调用；已安装时保持现状。
pub fn ensure_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        tracing::debug!("Crypto provider installed concurrently");
    }
}
