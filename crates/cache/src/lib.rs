//! # `shaobing-cache` - 缓存适配器
//!
//! 提供 `shaobing_core::cache::port::Cache` 的进程内实现。

pub mod mem;
