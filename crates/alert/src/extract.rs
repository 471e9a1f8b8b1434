use crate::labels::{self, INSTRUMENT, SEP};
use futures::future::join_all;
use regex::Regex;
use shaobing_core::alert::error::AlertError;
use shaobing_core::common::InstrumentCode;
use shaobing_core::symbol::port::NameLookup;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// # Summary
/// 标记后的文本片段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    // 原样保留的文本
    Text(String),
    // 待解析的证券代码
    Target(InstrumentCode),
}

/// # Summary
/// 提取器输出：原文被切分为文本段与代码标记的有序序列。
///
/// # Invariants
/// - 标记不是文本，因此不会与用户输入中的任何字符序列冲突。
/// - 所有 `Target` 以原代码渲染时，结果与输入逐字节一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedText {
    pieces: Vec<Piece>,
}

impl TaggedText {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.pieces.last_mut() {
            Some(Piece::Text(last)) => last.push_str(text),
            _ => self.pieces.push(Piece::Text(text.to_string())),
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// 去重后的代码列表，按首次出现顺序
    pub fn codes(&self) -> Vec<InstrumentCode> {
        let mut seen = Vec::new();
        for piece in &self.pieces {
            if let Piece::Target(code) = piece {
                if !seen.contains(code) {
                    seen.push(code.clone());
                }
            }
        }
        seen
    }

    /// # Summary
    /// 将标记渲染回文本。
    ///
    /// # Logic
    /// 已解析的代码渲染为 `名称(代码)`，未解析的渲染为原代码。
    pub fn render(&self, names: &HashMap<InstrumentCode, String>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Target(code) => match names.get(code) {
                    Some(name) => {
                        out.push_str(name);
                        out.push('(');
                        out.push_str(code.as_str());
                        out.push(')');
                    }
                    None => out.push_str(code.as_str()),
                },
            }
        }
        out
    }
}

/// # Summary
/// 规则命中后的动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    // 原样保留 (例如已是 名称(代码) 形式)
    Keep,
    // 标记为待解析代码
    Tag,
}

/// # Summary
/// 作用于“标的标签之后”文本的一条命名规则。
///
/// # Invariants
/// - 正则以 `^` 锚定在标签分隔符之后。
/// - `bounded` 为真时，命中之后的下一个字符不得是 ASCII 字母或数字。
pub struct ExtractRule {
    pub name: &'static str,
    pub action: RuleAction,
    pattern: Regex,
    bounded: bool,
}

impl ExtractRule {
    fn new(
        name: &'static str,
        action: RuleAction,
        pattern: &str,
        bounded: bool,
    ) -> Result<Self, AlertError> {
        Ok(Self {
            name,
            action,
            pattern: labels::compile(name, pattern)?,
            bounded,
        })
    }

    /// # Summary
    /// 在标签之后的文本上尝试本规则。
    ///
    /// # Returns
    /// 命中返回匹配的字节长度，否则返回 None。
    pub fn apply(&self, tail: &str) -> Option<usize> {
        let m = self.pattern.find(tail)?;
        let mut len = m.end();
        if self.action == RuleAction::Tag {
            // 句末的点号不属于代码
            len -= tail[..len].len() - tail[..len].trim_end_matches('.').len();
            if len == 0 {
                return None;
            }
        }
        if self.bounded
            && tail[len..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(len)
    }
}

/// # Summary
/// 目标提取器：扫描标的标签并标记其后的证券代码。
///
/// # Invariants
/// - 未被标记的文本逐字节保留。
/// - 规则按顺序尝试，首条命中者生效。
pub struct TargetExtractor {
    label: Regex,
    rules: Vec<ExtractRule>,
}

impl TargetExtractor {
    /// # Summary
    /// 编译标签正则与默认规则列表。
    ///
    /// # Logic
    /// 1. `already_named`：`名称(代码)` 形式，保持原样，避免重复包裹。
    /// 2. `numeric_code`：5~6 位数字。
    /// 3. `symbolic_code`：字母开头的期货/外汇/加密代码，如 `CL1!`、`BTCUSDT`。
    pub fn new() -> Result<Self, AlertError> {
        Ok(Self {
            label: labels::compile("instrument_label", &format!("(?:{INSTRUMENT}){SEP}"))?,
            rules: vec![
                ExtractRule::new(
                    "already_named",
                    RuleAction::Keep,
                    r"^[^\s,，;；|()（）]+[(（]\s*[A-Za-z0-9._!]{1,15}\s*[)）]",
                    false,
                )?,
                ExtractRule::new("numeric_code", RuleAction::Tag, r"^[0-9]{5,6}", true)?,
                ExtractRule::new(
                    "symbolic_code",
                    RuleAction::Tag,
                    r"^[A-Za-z][A-Za-z0-9._!]{0,14}",
                    true,
                )?,
            ],
        })
    }

    /// 按顺序排列的规则列表
    pub fn rules(&self) -> &[ExtractRule] {
        &self.rules
    }

    /// # Summary
    /// 扫描文本并标记所有证券代码。
    ///
    /// # Logic
    /// 1. 查找每一个 `标签 + 分隔符`。
    /// 2. 对分隔符之后的文本依次尝试规则。
    /// 3. `Tag` 规则命中则切出代码标记；`Keep` 或未命中则原样保留。
    pub fn extract(&self, text: &str) -> TaggedText {
        let mut tagged = TaggedText::default();
        let mut cursor = 0;

        for label in self.label.find_iter(text) {
            // 上一个代码可能已越过本标签
            if label.start() < cursor {
                continue;
            }
            let tail = &text[label.end()..];
            let hit = self
                .rules
                .iter()
                .find_map(|rule| rule.apply(tail).map(|len| (rule, len)));

            let Some((rule, len)) = hit else {
                continue;
            };
            if rule.action == RuleAction::Tag {
                let code_end = label.end() + len;
                tagged.push_text(&text[cursor..label.end()]);
                tagged
                    .pieces
                    .push(Piece::Target(InstrumentCode::new(&text[label.end()..code_end])));
                debug!("{} tagged `{}`", rule.name, &text[label.end()..code_end]);
                cursor = code_end;
            }
        }
        tagged.push_text(&text[cursor..]);
        tagged
    }
}

/// # Summary
/// 目标改写器：并发解析所有代码并替换标记。
pub struct TargetRewriter {
    lookup: Arc<dyn NameLookup>,
}

impl TargetRewriter {
    pub fn new(lookup: Arc<dyn NameLookup>) -> Self {
        Self { lookup }
    }

    /// # Summary
    /// 解析全部代码并渲染最终文本。
    ///
    /// # Logic
    /// 1. 收集去重后的代码集合。
    /// 2. 并发查询，等待全部完成（join 语义，而非先到先得）。
    /// 3. 已解析的渲染为 `名称(代码)`，其余保留原代码；不会残留任何标记。
    pub async fn resolve_all(&self, tagged: &TaggedText) -> String {
        let codes = tagged.codes();
        if codes.is_empty() {
            return tagged.render(&HashMap::new());
        }

        let lookups = codes.iter().map(|code| self.lookup.resolve(code));
        let names: HashMap<InstrumentCode, String> = codes
            .iter()
            .cloned()
            .zip(join_all(lookups).await)
            .filter_map(|(code, name)| name.map(|n| (code, n)))
            .collect();

        debug!("Resolved {}/{} instrument codes", names.len(), codes.len());
        tagged.render(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(text: &str) -> Vec<String> {
        let extractor = TargetExtractor::new().unwrap();
        extractor
            .extract(text)
            .codes()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect()
    }

    #[test]
    fn test_rules_in_order() {
        let extractor = TargetExtractor::new().unwrap();
        let names: Vec<_> = extractor.rules().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["already_named", "numeric_code", "symbolic_code"]);
    }

    #[test]
    fn test_already_named_rule() {
        let extractor = TargetExtractor::new().unwrap();
        let rule = &extractor.rules()[0];
        assert_eq!(rule.apply("岳阳兴长(000819)"), Some("岳阳兴长(000819)".len()));
        assert_eq!(rule.apply("腾讯控股（00700）, 周期"), Some("腾讯控股（00700）".len()));
        assert_eq!(rule.apply("000819"), None);
    }

    #[test]
    fn test_numeric_code_rule() {
        let extractor = TargetExtractor::new().unwrap();
        let rule = &extractor.rules()[1];
        assert_eq!(rule.apply("000819, 周期"), Some(6));
        assert_eq!(rule.apply("00700"), Some(5));
        assert_eq!(rule.apply("0008191"), None);
        assert_eq!(rule.apply("1234"), None);
        assert_eq!(rule.apply("600519SH"), None);
    }

    #[test]
    fn test_symbolic_code_rule() {
        let extractor = TargetExtractor::new().unwrap();
        let rule = &extractor.rules()[2];
        assert_eq!(rule.apply("CL1! 多信号"), Some(4));
        assert_eq!(rule.apply("BTCUSDT，周期"), Some(7));
        assert_eq!(rule.apply("AAPL."), Some(4));
        assert_eq!(rule.apply("周期"), None);
    }

    #[test]
    fn test_extract_marks_codes() {
        assert_eq!(targets("标的: 000819"), vec!["000819"]);
        assert_eq!(targets("品种：CL1!，信号：多"), vec!["CL1!"]);
        assert_eq!(
            targets("标的: 000001\n标的: 00700\n标的: 000001"),
            vec!["000001", "00700"]
        );
    }

    #[test]
    fn test_extract_skips_out_of_range_and_named() {
        assert!(targets("标的: 1234").is_empty());
        assert!(targets("标的: 1234567").is_empty());
        assert!(targets("标的: 岳阳兴长(000819)").is_empty());
        assert!(targets("价格: 12345").is_empty());
    }

    #[test]
    fn test_unresolved_render_is_identity() {
        let extractor = TargetExtractor::new().unwrap();
        let inputs = [
            "标的: 000819, 周期: 5",
            "标的：CL1!\n信号: 做空",
            "无标签文本 000819",
            "symbol: BTCUSDT price: 1",
        ];
        for input in inputs {
            let tagged = extractor.extract(input);
            assert_eq!(tagged.render(&HashMap::new()), input);
        }
    }

    #[test]
    fn test_render_wraps_resolved_names() {
        let extractor = TargetExtractor::new().unwrap();
        let tagged = extractor.extract("标的: 000819，周期: 5");
        let mut names = HashMap::new();
        names.insert(InstrumentCode::new("000819"), "岳阳兴长".to_string());
        assert_eq!(tagged.render(&names), "标的: 岳阳兴长(000819)，周期: 5");
    }
}
