//! # `shaobing-alert` - 告警规范化流水线
//!
//! 原始告警文本 → 标记证券代码 → 解析名称并改写 → 切分片段 → 解析字段
//! → 方向分类 → 去重排序并渲染摘要。
//!
//! 各环节的正则均以“命名规则列表”的形式存在，可逐条单测。

pub mod digest;
pub mod direction;
pub mod extract;
pub mod labels;
pub mod parse;
pub mod pipeline;
pub mod segment;
