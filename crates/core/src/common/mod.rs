use serde::{Deserialize, Serialize};

/// # Summary
/// 证券代码实体，代表告警文本中被识别出的单个标的引用。
///
/// # Invariants
/// - 创建后不可变，`raw` 保持原文字节不变（仅去除首尾空白）。
/// - 纯 ASCII 数字视为 `Numeric`，其余视为 `Symbolic`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstrumentCode {
    // 原始代码文本 (例如: 000819, 00700, CL1!, BTCUSDT)
    raw: String,
}

impl InstrumentCode {
    /// # Summary
    /// 从原文片段构造证券代码。
    ///
    /// # Arguments
    /// * `raw`: 原文中的代码文本。
    ///
    /// # Returns
    /// 去除首尾空白后的代码实体。
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self {
            raw: raw.as_ref().trim().to_string(),
        }
    }

    /// 原文代码
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// # Summary
    /// 判定代码的解析路径类别。
    ///
    /// # Logic
    /// 1. 非空且全部为 ASCII 数字 → `Numeric`，可走交易所行情查询。
    /// 2. 其余 → `Symbolic`，仅查静态映射表。
    pub fn kind(&self) -> CodeKind {
        if !self.raw.is_empty() && self.raw.bytes().all(|b| b.is_ascii_digit()) {
            CodeKind::Numeric
        } else {
            CodeKind::Symbolic
        }
    }
}

impl std::fmt::Display for InstrumentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// # Summary
/// 证券代码的解析路径类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    // 纯数字代码 (A 股 / 港股)
    Numeric,
    // 字母或符号代码 (期货、外汇、加密货币、指数)
    Symbolic,
}

/// # Summary
/// 数字代码归属的交易所。
///
/// # Invariants
/// - 前缀与新浪、腾讯行情接口使用的市场前缀一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    // 香港交易所
    Hk,
    // 上海证券交易所
    Sh,
    // 深圳证券交易所
    Sz,
}

impl Exchange {
    /// 行情接口使用的市场前缀
    pub fn prefix(&self) -> &'static str {
        match self {
            Exchange::Hk => "hk",
            Exchange::Sh => "sh",
            Exchange::Sz => "sz",
        }
    }

    /// # Summary
    /// 生成远程行情查询使用的完整代码。
    ///
    /// # Logic
    /// 1. 港股代码左侧补零至 5 位。
    /// 2. 拼接市场前缀，例如 `hk00700`、`sz000819`。
    pub fn quote_symbol(&self, code: &InstrumentCode) -> String {
        match self {
            Exchange::Hk => format!("{}{:0>5}", self.prefix(), code.as_str()),
            _ => format!("{}{}", self.prefix(), code.as_str()),
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}
