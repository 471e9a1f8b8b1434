use crate::labels::{self, INSTRUMENT, SEP};
use regex::Regex;
use shaobing_core::alert::entity::{AlertSegment, StrayLinePolicy};
use shaobing_core::alert::error::AlertError;
use tracing::debug;

/// 行尾分隔符：在标签前断行后需要从上一段末尾剥离
const TRAILING_DELIMITERS: &[char] = &[',', '，', ';', '；', '|', '、'];

/// # Summary
/// 单行的归类结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    // 含标的标签，开启新告警
    Instrument,
    // 其他内容 (字段标签行或普通文本)
    Body,
}

/// # Summary
/// 告警切分器：将一段文本拆成互相独立的告警片段。
///
/// # Invariants
/// - 非空输入至少产生一个片段（最坏情况下整段输入即一个片段）。
/// - 仅有一个标的标签时按卡片布局整体成段；多个时按流式布局切分。
/// - 游离行的处理由 `StrayLinePolicy` 统一决定，不做逐输入特判。
pub struct AlertSegmenter {
    bullet: Regex,
    any_label: Regex,
    instrument_label: Regex,
    policy: StrayLinePolicy,
}

impl AlertSegmenter {
    /// # Summary
    /// 编译切分所需的正则。
    ///
    /// # Arguments
    /// * `policy`: 游离行处理策略。
    pub fn new(policy: StrayLinePolicy) -> Result<Self, AlertError> {
        Ok(Self {
            bullet: labels::compile(
                "bullet",
                r"^\s*(?:(?:[•·●○▪►✅✔☑🔔📈📉🟢🔴⚠]\x{FE0F}?)|(?:[-*>](?:\s|$)))+\s*",
            )?,
            any_label: labels::compile("any_label", &format!("{}{SEP}", labels::any_label()))?,
            instrument_label: labels::compile(
                "instrument_label",
                &format!("(?:{INSTRUMENT}){SEP}"),
            )?,
            policy,
        })
    }

    /// 去除行首的项目符号与勾选装饰
    pub fn strip_decorations<'a>(&self, line: &'a str) -> &'a str {
        match self.bullet.find(line) {
            Some(m) => &line[m.end()..],
            None => line,
        }
    }

    /// # Summary
    /// 以标签为锚点将挤在一行内的多个字段拆成多行。
    ///
    /// # Logic
    /// 1. 行内不足两个 `标签:` 时原样返回。
    /// 2. 在每个标签前断开，剥离上一段末尾的分隔符与空白。
    /// 3. 丢弃空段。
    pub fn split_labels(&self, line: &str) -> Vec<String> {
        let starts: Vec<usize> = self.any_label.find_iter(line).map(|m| m.start()).collect();
        if starts.len() < 2 {
            return vec![line.trim().to_string()];
        }

        let mut bounds = Vec::with_capacity(starts.len() + 2);
        bounds.push(0);
        bounds.extend(starts.iter().copied().filter(|&s| s > 0));
        bounds.push(line.len());

        bounds
            .windows(2)
            .map(|w| {
                line[w[0]..w[1]]
                    .trim()
                    .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_DELIMITERS.contains(&c))
                    .to_string()
            })
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// # Summary
    /// 规范化文本：去装饰、按标签断行，得到“一行一标签”的行序列。
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.lines()
            .flat_map(|raw| {
                let line = self.strip_decorations(raw);
                if line.trim().is_empty() {
                    vec![String::new()]
                } else {
                    self.split_labels(line)
                }
            })
            .collect()
    }

    fn kind(&self, line: &str) -> LineKind {
        if line.trim().is_empty() {
            LineKind::Blank
        } else if self.instrument_label.is_match(line) {
            LineKind::Instrument
        } else {
            LineKind::Body
        }
    }

    /// # Summary
    /// 切分告警片段。
    ///
    /// # Logic
    /// 1. 规范化为一行一标签。
    /// 2. 标的行不超过一行：卡片布局，全部非空行组成一个片段（含标题行）。
    /// 3. 否则为流式布局：标的行开启新片段，其余行追加到当前片段；
    ///    尚无片段时按 `StrayLinePolicy` 丢弃或单独成段。
    /// 4. 若最终无任何片段，整段输入作为一个片段返回。
    pub fn segment(&self, text: &str) -> Vec<AlertSegment> {
        if text.is_empty() {
            return Vec::new();
        }

        let lines = self.normalize(text);
        let kinds: Vec<LineKind> = lines.iter().map(|l| self.kind(l)).collect();
        let instrument_lines = kinds.iter().filter(|k| **k == LineKind::Instrument).count();

        let mut segments = Vec::new();
        if instrument_lines <= 1 {
            let body: Vec<String> = lines
                .into_iter()
                .zip(kinds)
                .filter(|(_, kind)| *kind != LineKind::Blank)
                .map(|(line, _)| line)
                .collect();
            if !body.is_empty() {
                segments.push(AlertSegment { lines: body });
            }
        } else {
            let mut current: Option<AlertSegment> = None;
            for (line, kind) in lines.into_iter().zip(kinds) {
                match kind {
                    LineKind::Blank => {}
                    LineKind::Instrument => {
                        if let Some(done) = current.replace(AlertSegment::new(line)) {
                            segments.push(done);
                        }
                    }
                    LineKind::Body => match current.as_mut() {
                        Some(open) => open.push(line),
                        None => match self.policy {
                            StrayLinePolicy::Drop => debug!("Dropping stray line `{}`", line),
                            StrayLinePolicy::Standalone => segments.push(AlertSegment::new(line)),
                        },
                    },
                }
            }
            segments.extend(current);
        }

        if segments.is_empty() {
            segments.push(AlertSegment::new(text));
        }
        debug!("Segmented into {} alert(s)", segments.len());
        segments
    }
}
