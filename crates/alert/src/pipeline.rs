use crate::digest::DigestRenderer;
use crate::extract::{TargetExtractor, TargetRewriter};
use crate::parse::FieldParser;
use crate::segment::AlertSegmenter;
use shaobing_core::alert::entity::{AlertRecord, StrayLinePolicy};
use shaobing_core::alert::error::AlertError;
use shaobing_core::symbol::port::NameLookup;
use std::sync::Arc;
use tracing::{debug, info};

/// # Summary
/// 告警规范化流水线门面。
///
/// # Invariants
/// - 构建期编译全部规则，失败时返回 `AlertError`。
/// - `process` 总是返回字符串：无法规范化时退回到最近一次有效的中间文本。
pub struct AlertPipeline {
    extractor: TargetExtractor,
    rewriter: TargetRewriter,
    segmenter: AlertSegmenter,
    parser: FieldParser,
    renderer: DigestRenderer,
}

impl AlertPipeline {
    /// # Summary
    /// 组装流水线。
    ///
    /// # Arguments
    /// * `lookup`: 名称查询函数（通常为带缓存与回退链的 `NameResolver`）。
    /// * `policy`: 游离行处理策略。
    pub fn new(lookup: Arc<dyn NameLookup>, policy: StrayLinePolicy) -> Result<Self, AlertError> {
        Ok(Self {
            extractor: TargetExtractor::new()?,
            rewriter: TargetRewriter::new(lookup),
            segmenter: AlertSegmenter::new(policy)?,
            parser: FieldParser::new()?,
            renderer: DigestRenderer,
        })
    }

    /// # Summary
    /// 仅做名称增强：标记代码并替换为 `名称(代码)`，不改动其余文本。
    pub async fn enrich(&self, text: &str) -> String {
        let tagged = self.extractor.extract(text);
        self.rewriter.resolve_all(&tagged).await
    }

    /// 将增强后的文本切分并解析为记录
    pub fn records(&self, enriched: &str) -> Vec<AlertRecord> {
        self.segmenter
            .segment(enriched)
            .iter()
            .map(|segment| self.parser.parse(segment))
            .collect()
    }

    /// # Summary
    /// 处理一段原始告警文本。
    ///
    /// # Logic
    /// 1. 空白输入原样返回。
    /// 2. 标记代码 → 并发解析名称 → 改写。
    /// 3. 切分片段 → 解析字段与方向。
    /// 4. 渲染摘要；无有效记录时返回改写后的文本。
    pub async fn process(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let enriched = self.enrich(text).await;
        let records = self.records(&enriched);
        let valid = records.iter().filter(|r| r.is_valid()).count();
        debug!("Parsed {} record(s), {} valid", records.len(), valid);

        let output = self.renderer.render(&records, &enriched);
        info!(
            "Alert normalized: {} bytes in, {} bytes out, {} valid record(s)",
            text.len(),
            output.len(),
            valid
        );
        output
    }
}
