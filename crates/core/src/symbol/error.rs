use thiserror::Error;

/// # Summary
/// 行情名称查询错误枚举，覆盖远程报价源的各类失败。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - 仅在数据源调用边界内部流转，解析链路吞掉后降级为“未解析”。
#[derive(Error, Debug)]
pub enum QuoteError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 非 2xx 响应
    #[error("HTTP status {0}")]
    Status(u16),
    // 超过单次调用的等待上限
    #[error("Timed out after {0} ms")]
    Timeout(u64),
    // 响应体解码或字段切分失败
    #[error("Decode error: {0}")]
    Decode(String),
    // 响应格式正确但名称字段为空
    #[error("Empty name field for {0}")]
    Empty(String),
}
