use pinyin::ToPinyin;
use shaobing_core::alert::entity::{AlertRecord, Direction};
use std::cmp::Ordering;
use tracing::debug;

/// 字段之间的分隔符
const DELIMITER: &str = " | ";

/// # Summary
/// 摘要渲染器：过滤、去重、排序、统计并输出文本摘要。
///
/// # Invariants
/// - 永不报错；没有有效记录时原样返回回退文本。
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestRenderer;

impl DigestRenderer {
    /// # Summary
    /// 过滤有效记录并折叠相邻重复项。
    ///
    /// # Logic
    /// 1. 丢弃无效记录（缺标的，或信号与价格皆无）。
    /// 2. 相邻记录的 `(标的, 方向, 信号)` 相同时只保留第一条。
    pub fn dedupe(&self, records: &[AlertRecord]) -> Vec<AlertRecord> {
        let mut kept: Vec<AlertRecord> = Vec::new();
        for record in records.iter().filter(|r| r.is_valid()) {
            let repeated = kept.last().is_some_and(|last| {
                last.instrument == record.instrument
                    && last.direction == record.direction
                    && last.signal == record.signal
            });
            if !repeated {
                kept.push(record.clone());
            }
        }
        kept
    }

    /// # Summary
    /// 按方向优先级、再按标的名称稳定排序。
    ///
    /// # Logic
    /// 名称按拼音比较：汉字取无声调拼音，其余字符大小写折叠；键相同时按原文码点决胜。
    pub fn sort(&self, records: &mut [AlertRecord]) {
        records.sort_by(|a, b| {
            a.direction
                .priority()
                .cmp(&b.direction.priority())
                .then_with(|| compare_names(a.instrument.as_deref(), b.instrument.as_deref()))
        });
    }

    /// 表头：总数与非零的方向计数 (固定顺序 long, short, stop, neutral)
    pub fn header(&self, records: &[AlertRecord]) -> String {
        let counts: Vec<String> = Direction::ALL
            .iter()
            .map(|d| (d, records.iter().filter(|r| r.direction == *d).count()))
            .filter(|(_, n)| *n > 0)
            .map(|(d, n)| format!("{d}:{n}"))
            .collect();
        format!("📊 信号汇总 共{}条{}{}", records.len(), DELIMITER, counts.join(", "))
    }

    /// 单条记录：方向图标 + 标的，随后按 周期、价格、信号、指标 顺序输出已有字段
    pub fn line(&self, record: &AlertRecord) -> String {
        let mut parts = vec![format!(
            "{} {}",
            record.direction.icon(),
            record.instrument.as_deref().unwrap_or_default()
        )];
        let fields = [
            ("周期", &record.period),
            ("价格", &record.price),
            ("信号", &record.signal),
            ("指标", &record.indicator),
        ];
        parts.extend(
            fields
                .iter()
                .filter_map(|&(label, value)| value.as_ref().map(|v| format!("{label}: {v}"))),
        );
        parts.join(DELIMITER)
    }

    /// # Summary
    /// 渲染完整摘要。
    ///
    /// # Arguments
    /// * `records`: 片段解析结果（含无效记录）。
    /// * `fallback`: 没有有效记录时返回的文本。
    pub fn render(&self, records: &[AlertRecord], fallback: &str) -> String {
        let mut kept = self.dedupe(records);
        if kept.is_empty() {
            debug!("No valid alert record among {}, relaying text as-is", records.len());
            return fallback.to_string();
        }
        self.sort(&mut kept);

        let mut lines = Vec::with_capacity(kept.len() + 1);
        lines.push(self.header(&kept));
        lines.extend(kept.iter().map(|r| self.line(r)));
        lines.join("\n")
    }
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    let (a, b) = (a.unwrap_or_default(), b.unwrap_or_default());
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

// 逐字符的排序键，汉字展开为拼音音节
fn collation_key(name: &str) -> Vec<String> {
    name.chars()
        .zip(name.to_pinyin())
        .map(|(c, syllable)| match syllable {
            Some(syllable) => syllable.plain().to_string(),
            None => c.to_lowercase().collect(),
        })
        .collect()
}
