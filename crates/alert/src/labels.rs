//! 告警文本中识别的字段标签词表与公共正则片段。

use regex::Regex;
use shaobing_core::alert::error::AlertError;

/// 标的标签（较长的词须排在其前缀词之前）
pub const INSTRUMENT: &str = r"股票代码|标的代码|标的|品种|代码|股票|\b(?i:symbol|ticker)\b";
/// 周期标签
pub const PERIOD: &str = r"周期|\b(?i:period|interval)\b";
/// 价格标签
pub const PRICE: &str = r"当前价格|现价|收盘价|价格|\b(?i:price|close)\b";
/// 信号标签
pub const SIGNAL: &str = r"信号|\b(?i:signal)\b";
/// 指标标签
pub const INDICATOR: &str = r"指标|\b(?i:indicator)\b";
/// 标签与取值之间的分隔符
pub const SEP: &str = r"\s*[:：]\s*";

/// 标的标签的裸词形式，用于修剪推断信号末尾残留的标签词
pub const INSTRUMENT_WORDS: &[&str] = &["股票代码", "标的代码", "标的", "品种", "代码", "股票"];

/// 所有标签的并集
pub fn any_label() -> String {
    format!("(?:{INSTRUMENT}|{PERIOD}|{PRICE}|{SIGNAL}|{INDICATOR})")
}

/// # Summary
/// 编译一条命名规则的正则。
///
/// # Returns
/// 编译失败时返回带规则名的 `AlertError::Pattern`。
pub fn compile(rule: &'static str, pattern: &str) -> Result<Regex, AlertError> {
    Regex::new(pattern).map_err(|e| AlertError::Pattern {
        rule,
        reason: e.to_string(),
    })
}
