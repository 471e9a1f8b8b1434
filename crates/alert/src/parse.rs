use crate::direction::classify;
use crate::labels::{self, INDICATOR, INSTRUMENT, INSTRUMENT_WORDS, PERIOD, PRICE, SEP, SIGNAL};
use regex::Regex;
use shaobing_core::alert::entity::{AlertRecord, AlertSegment};
use shaobing_core::alert::error::AlertError;
use std::ops::Range;

/// 推断信号首尾需要剥离的标点
const SIGNAL_TRIM: &[char] = &[
    ',', '，', ';', '；', ':', '：', '|', '。', '.', '、', '-', '—', '(', ')', '（', '）', '[', ']',
    '【', '】',
];

/// # Summary
/// 告警记录中的字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Instrument,
    Period,
    Price,
    Signal,
    Indicator,
}

/// # Summary
/// 一条字段提取规则：`标签 + 分隔符 + 取值`。
///
/// # Invariants
/// - 取值位于命名捕获组 `v`。
pub struct FieldRule {
    pub field: Field,
    pattern: Regex,
}

/// # Summary
/// 单条规则的命中结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch {
    pub value: String,
    // 整个 `标签:取值` 的字节范围
    pub span: Range<usize>,
}

impl FieldRule {
    fn new(field: Field, name: &'static str, pattern: &str) -> Result<Self, AlertError> {
        Ok(Self {
            field,
            pattern: labels::compile(name, pattern)?,
        })
    }

    /// 返回首个命中的取值与范围
    pub fn find(&self, text: &str) -> Option<FieldMatch> {
        let caps = self.pattern.captures(text)?;
        let whole = caps.get(0)?;
        let value = caps.name("v")?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(FieldMatch {
            value: value.to_string(),
            span: whole.range(),
        })
    }
}

/// # Summary
/// 告警字段解析器。
///
/// # Invariants
/// - 每个字段独立提取，字段缺失不影响其他字段。
/// - 无显式信号标签时，信号由周期或标的之后、同一行内下一个标签之前的文本推断。
pub struct FieldParser {
    rules: Vec<FieldRule>,
    any_label: Regex,
}

impl FieldParser {
    pub fn new() -> Result<Self, AlertError> {
        let value = r"(?P<v>[^\s,，;；|]+)";
        Ok(Self {
            rules: vec![
                // `名称(代码)` 整体优先，名称中可能含空格
                FieldRule::new(
                    Field::Instrument,
                    "instrument",
                    &format!(
                        "(?:{INSTRUMENT}){SEP}(?P<v>[^,，;；|\\n(（]+[(（][^)）\\s]+[)）]|[^\\s,，;；|]+)"
                    ),
                )?,
                FieldRule::new(
                    Field::Period,
                    "period",
                    &format!("(?:{PERIOD}){SEP}(?P<v>[0-9]+)\\s*(?:分钟|小时|日|天|(?i:min|m|h|d)\\b)?"),
                )?,
                FieldRule::new(
                    Field::Price,
                    "price",
                    &format!("(?:{PRICE}){SEP}(?P<v>-?(?:[0-9]{{1,3}}(?:,[0-9]{{3}})+|[0-9]+)(?:\\.[0-9]+)?)"),
                )?,
                FieldRule::new(
                    Field::Signal,
                    "signal",
                    &format!("(?:{SIGNAL}){SEP}(?P<v>[^,，;；|\\n]+)"),
                )?,
                FieldRule::new(
                    Field::Indicator,
                    "indicator",
                    &format!("(?:{INDICATOR}){SEP}{value}"),
                )?,
            ],
            any_label: labels::compile("any_label", &format!("{}{SEP}", labels::any_label()))?,
        })
    }

    /// 指定字段的规则
    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    fn find(&self, field: Field, text: &str) -> Option<FieldMatch> {
        self.rule(field)?.find(text)
    }

    /// # Summary
    /// 推断未显式标注的信号短语。
    ///
    /// # Logic
    /// 1. 依次以周期字段末尾、标的字段末尾为起点，取第一个非空的推断结果；
    ///    两者都没有时从头开始。
    /// 2. 终点：起点之后第一个标签的开头，或首个非空内容所在行的行尾，取较早者。
    /// 3. 剥离首尾空白与标点，以及末尾残留的标的标签词。
    pub fn infer_signal(
        &self,
        text: &str,
        period: Option<&FieldMatch>,
        instrument: Option<&FieldMatch>,
    ) -> Option<String> {
        let anchors: Vec<usize> = [period, instrument]
            .into_iter()
            .flatten()
            .map(|m| m.span.end)
            .collect();
        if anchors.is_empty() {
            return self.signal_after(text, 0);
        }
        anchors
            .into_iter()
            .find_map(|anchor| self.signal_after(text, anchor))
    }

    fn signal_after(&self, text: &str, anchor: usize) -> Option<String> {
        let rest = text.get(anchor..)?;
        let label_end = self
            .any_label
            .find(rest)
            .map(|m| m.start())
            .unwrap_or(rest.len());
        // 推断信号不跨行
        let content = rest
            .find(|c: char| !(c.is_whitespace() || SIGNAL_TRIM.contains(&c)))
            .unwrap_or(rest.len());
        let line_end = rest[content..]
            .find('\n')
            .map(|i| content + i)
            .unwrap_or(rest.len());

        let mut span = trim_signal(&rest[..label_end.min(line_end)]);
        while let Some(stripped) = INSTRUMENT_WORDS
            .iter()
            .find_map(|word| span.strip_suffix(*word))
        {
            span = trim_signal(stripped);
        }

        if span.is_empty() {
            None
        } else {
            Some(span.to_string())
        }
    }

    /// # Summary
    /// 解析单个片段为告警记录。
    ///
    /// # Logic
    /// 1. 逐条规则独立提取各字段。
    /// 2. 无信号标签时推断信号。
    /// 3. 由信号短语分类交易方向。
    pub fn parse(&self, segment: &AlertSegment) -> AlertRecord {
        let text = segment.text();
        let instrument = self.find(Field::Instrument, &text);
        let period = self.find(Field::Period, &text);
        let signal = self
            .find(Field::Signal, &text)
            .map(|m| m.value)
            .or_else(|| self.infer_signal(&text, period.as_ref(), instrument.as_ref()));

        AlertRecord {
            direction: classify(signal.as_deref().unwrap_or_default()),
            instrument: instrument.map(|m| m.value),
            period: period.map(|m| m.value),
            price: self.find(Field::Price, &text).map(|m| m.value),
            signal,
            indicator: self.find(Field::Indicator, &text).map(|m| m.value),
        }
    }
}

fn trim_signal(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || SIGNAL_TRIM.contains(&c))
}
