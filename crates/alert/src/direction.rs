use shaobing_core::alert::entity::Direction;

/// 做空关键词，优先级最高
const SHORT_KEYWORDS: &[&str] = &["做空", "空信号", "卖信号", "卖出", "空头", "开空", "short", "sell"];
/// 做多关键词
const LONG_KEYWORDS: &[&str] = &["做多", "多信号", "买信号", "买入", "多头", "开多", "long", "buy"];
/// 止损关键词
const STOP_KEYWORDS: &[&str] = &["止损", "stop"];

/// 按优先级排列的方向词表：做空 → 做多 → 止损
const VOCABULARY: &[(Direction, &[&str])] = &[
    (Direction::Short, SHORT_KEYWORDS),
    (Direction::Long, LONG_KEYWORDS),
    (Direction::Stop, STOP_KEYWORDS),
];

/// # Summary
/// 将信号短语映射为交易方向。
///
/// # Logic
/// 1. 转小写后按固定优先级做子串匹配。
/// 2. 做空词表先于做多词表检查，部分做空短语会包含做多词表中的子串。
/// 3. 均未命中 (含空串) 返回 `Neutral`。
pub fn classify(signal: &str) -> Direction {
    let lowered = signal.to_lowercase();
    VOCABULARY
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(direction, _)| *direction)
        .unwrap_or(Direction::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_vocabulary() {
        let cases = [
            ("多信号", Direction::Long),
            ("金叉 买入", Direction::Long),
            ("BUY signal", Direction::Long),
            ("做空", Direction::Short),
            ("卖信号", Direction::Short),
            ("Sell", Direction::Short),
            ("触发止损", Direction::Stop),
            ("Stop Hit", Direction::Stop),
            ("横盘震荡", Direction::Neutral),
            ("", Direction::Neutral),
        ];
        for (signal, expected) in cases {
            assert_eq!(classify(signal), expected, "signal `{signal}`");
        }
    }

    #[test]
    fn test_short_checked_before_long() {
        // 同时含多空子串时以做空为准
        assert_eq!(classify("多头止盈转空头"), Direction::Short);
        assert_eq!(classify("sell to close long"), Direction::Short);
        // 做多优先于止损
        assert_eq!(classify("止损后重新买入"), Direction::Long);
    }
}
