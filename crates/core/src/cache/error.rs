use thiserror::Error;

/// # Summary
/// 缓存域错误枚举，覆盖名称缓存的编解码与底层存储故障。
///
/// # Invariants
/// - 名称解析链路只记录该错误并视作未命中，不向调用方传播。
#[derive(Error, Debug)]
pub enum CacheError {
    // 写入前序列化失败
    #[error("Serialize error: {0}")]
    Serialize(String),
    // 读取后反序列化失败 (通常意味着同一键被写入了不同类型)
    #[error("Deserialize error: {0}")]
    Deserialize(String),
    // 底层存储引擎故障
    #[error("Storage error: {0}")]
    Storage(String),
}
