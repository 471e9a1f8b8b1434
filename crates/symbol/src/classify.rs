use shaobing_core::common::{CodeKind, Exchange, InstrumentCode};
use shaobing_core::symbol::port::MarketClassifier;

/// # Summary
/// 默认的数字代码交易所归类规则。
///
/// # Logic
/// - 1~5 位数字 → 港股。
/// - 6 位且以 `6`、`5`、`9` 开头 → 上交所。
/// - 6 位且以 `0`、`1`、`3` 开头 → 深交所。
/// - 其余 (如北交所 `4`/`8` 开头) → 无法归类。
///
/// # Invariants
/// - 经验规则，存在已知误判；需要修正时替换实现而非改动解析链。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl MarketClassifier for DefaultClassifier {
    fn classify(&self, code: &InstrumentCode) -> Option<Exchange> {
        if code.kind() != CodeKind::Numeric {
            return None;
        }
        let raw = code.as_str();
        match raw.len() {
            1..=5 => Some(Exchange::Hk),
            6 => match raw.as_bytes().first()? {
                b'6' | b'5' | b'9' => Some(Exchange::Sh),
                b'0' | b'1' | b'3' => Some(Exchange::Sz),
                _ => None,
            },
            _ => None,
        }
    }
}
