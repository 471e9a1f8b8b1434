//! # `shaobing-core` - 领域内核
//!
//! 定义告警中继流水线各环节共享的实体、端口 (Trait) 与错误类型。
//! 本 crate 不包含任何 I/O 实现，具体适配器位于 `cache`、`feed`、`notify` 等 crate。

pub mod common;
pub mod config;
pub mod tls;

pub mod cache {
    pub mod error;
    pub mod port;
}

pub mod symbol {
    pub mod error;
    pub mod port;
}

pub mod alert {
    pub mod entity;
    pub mod error;
}

pub mod notify {
    pub mod error;
    pub mod port;
}

#[cfg(feature = "test-utils")]
pub mod test_utils;
