//! # `shaobing-feed` - 行情名称数据源
//!
//! 实现 `NameSource` 端口的两个远程报价源：
//! - [`sina::SinaProvider`]：主数据源，`"` 分隔的 GBK 文本。
//! - [`tencent::TencentProvider`]：备用数据源，`~` 分隔的 GBK 文本。

pub mod codec;
pub mod sina;
pub mod tencent;
