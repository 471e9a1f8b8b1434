use serde::{Deserialize, Serialize};

/// # Summary
/// 交易方向分类。
///
/// # Invariants
/// - 分类是全函数：任何信号文本都恰好落入四类之一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    // 做多
    Long,
    // 做空
    Short,
    // 止损
    Stop,
    // 无明确方向
    Neutral,
}

impl Direction {
    /// 汇总统计与表头使用的固定顺序
    pub const ALL: [Direction; 4] = [
        Direction::Long,
        Direction::Short,
        Direction::Stop,
        Direction::Neutral,
    ];

    /// 摘要排序优先级，数值越小越靠前 (做空 → 止损 → 做多 → 中性)
    pub fn priority(&self) -> u8 {
        match self {
            Direction::Short => 0,
            Direction::Stop => 1,
            Direction::Long => 2,
            Direction::Neutral => 3,
        }
    }

    /// 摘要行首的方向图标
    pub fn icon(&self) -> &'static str {
        match self {
            Direction::Short => "🔴",
            Direction::Stop => "⛔",
            Direction::Long => "🟢",
            Direction::Neutral => "⚪",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
            Direction::Stop => write!(f, "stop"),
            Direction::Neutral => write!(f, "neutral"),
        }
    }
}

/// # Summary
/// 被判定为描述同一条告警的连续文本行。
///
/// # Invariants
/// - 片段之间相互独立，不依赖彼此内容。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertSegment {
    // 已去除项目符号装饰的文本行
    pub lines: Vec<String>,
}

impl AlertSegment {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            lines: vec![first.into()],
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// 以换行拼接的片段全文
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// # Summary
/// 从单个告警片段中解析出的结构化字段。
///
/// # Invariants
/// - 仅当 `is_valid()` 为真时才会出现在摘要中。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    // 标的 (可能已被改写为 名称(代码))
    pub instrument: Option<String>,
    // K 线周期 (仅数字)
    pub period: Option<String>,
    // 价格
    pub price: Option<String>,
    // 信号短语
    pub signal: Option<String>,
    // 指标名称
    pub indicator: Option<String>,
    // 由信号短语分类得到的方向
    pub direction: Direction,
}

impl Default for AlertRecord {
    fn default() -> Self {
        Self {
            instrument: None,
            period: None,
            price: None,
            signal: None,
            indicator: None,
            direction: Direction::Neutral,
        }
    }
}

impl AlertRecord {
    /// # Summary
    /// 判断该记录是否足以作为一条告警输出。
    ///
    /// # Logic
    /// 必须有标的，且至少有信号或价格之一。该规则蕴含“至少两个字段”。
    pub fn is_valid(&self) -> bool {
        self.instrument.is_some() && (self.signal.is_some() || self.price.is_some())
    }
}

/// # Summary
/// 无法归属到任何已打开片段的游离行处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrayLinePolicy {
    // 丢弃
    #[default]
    Drop,
    // 作为单行片段输出
    Standalone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_validity() {
        let mut record = AlertRecord {
            instrument: Some("000001".into()),
            period: Some("5".into()),
            ..Default::default()
        };
        assert!(!record.is_valid());

        record.price = Some("12.3".into());
        assert!(record.is_valid());

        let no_instrument = AlertRecord {
            signal: Some("多信号".into()),
            price: Some("1".into()),
            ..Default::default()
        };
        assert!(!no_instrument.is_valid());
    }

    #[test]
    fn test_direction_priority_order() {
        let mut dirs = Direction::ALL.to_vec();
        dirs.sort_by_key(|d| d.priority());
        assert_eq!(
            dirs,
            vec![
                Direction::Short,
                Direction::Stop,
                Direction::Long,
                Direction::Neutral
            ]
        );
    }

    #[test]
    fn test_stray_policy_serde() {
        let p: StrayLinePolicy = serde_json::from_str("\"standalone\"").unwrap();
        assert_eq!(p, StrayLinePolicy::Standalone);
    }
}
