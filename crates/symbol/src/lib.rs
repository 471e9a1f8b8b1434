//! # `shaobing-symbol` - 证券名称解析
//!
//! 缓存 → 静态映射表 → 行情源 A → 行情源 B 的有序回退链。

pub mod classify;
pub mod resolver;
pub mod table;
