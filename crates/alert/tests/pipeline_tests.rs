use async_trait::async_trait;
use shaobing_alert::pipeline::AlertPipeline;
use shaobing_alert::segment::AlertSegmenter;
use shaobing_cache::mem::MemCache;
use shaobing_core::alert::entity::{Direction, StrayLinePolicy};
use shaobing_core::common::{Exchange, InstrumentCode};
use shaobing_core::symbol::error::QuoteError;
use shaobing_core::symbol::port::{NameLookup, NameSource};
use shaobing_core::test_utils::StaticLookup;
use shaobing_symbol::classify::DefaultClassifier;
use shaobing_symbol::resolver::NameResolver;
use shaobing_symbol::table::StaticTable;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn pipeline(lookup: Arc<dyn NameLookup>) -> AlertPipeline {
    AlertPipeline::new(lookup, StrayLinePolicy::Drop).unwrap()
}

/// # Summary
/// 没有标的标签的文本：增强与完整处理都是恒等变换。
#[tokio::test]
async fn test_text_without_labels_is_identity() {
    let p = pipeline(Arc::new(StaticLookup::new().with("000819", "岳阳兴长")));
    let inputs = [
        "今日市场震荡，000819 走势偏弱",
        "周期: 5\n信号: 多信号",
        "Hello, world!",
        "  leading and trailing  ",
    ];
    for input in inputs {
        assert_eq!(p.enrich(input).await, input);
        assert_eq!(p.process(input).await, input);
    }
}

/// # Summary
/// 已是 `名称(代码)` 形式的引用不会被再次包裹，也不会触发查询。
#[tokio::test]
async fn test_already_named_reference_is_untouched() {
    let lookup = Arc::new(StaticLookup::new().with("000819", "岳阳兴长"));
    let p = pipeline(lookup.clone());
    let input = "标的: 岳阳兴长(000819)";

    assert_eq!(p.enrich(input).await, input);
    // 对增强结果再次处理同样保持不变
    let once = p.enrich("标的: 000819").await;
    assert_eq!(p.enrich(&once).await, once);
    assert_eq!(lookup.calls("000819"), 1);
}

/// # Summary
/// 示例 1：数字代码被解析并改写为 `名称(代码)`。
#[tokio::test]
async fn test_example_numeric_code_is_enriched() {
    let p = pipeline(Arc::new(StaticLookup::new().with("000819", "岳阳兴长")));
    let output = p.process("标的: 000819").await;

    assert!(output.contains("岳阳兴长(000819)"));
    assert!(!output.contains(": 000819"));
}

/// # Summary
/// 示例 2：逗号拼接的单行告警解析为一条做多记录。
#[tokio::test]
async fn test_example_single_line_alert() {
    let p = pipeline(Arc::new(StaticLookup::new()));
    let input = "标的: 000001, 周期: 5, 信号: 多信号, 当前价格: 12.3";

    let records = p.records(&p.enrich(input).await);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.instrument.as_deref(), Some("000001"));
    assert_eq!(record.period.as_deref(), Some("5"));
    assert_eq!(record.signal.as_deref(), Some("多信号"));
    assert_eq!(record.price.as_deref(), Some("12.3"));
    assert_eq!(record.direction, Direction::Long);

    let output = p.process(input).await;
    assert_eq!(
        output,
        "📊 信号汇总 共1条 | long:1\n🟢 000001 | 周期: 5 | 价格: 12.3 | 信号: 多信号"
    );
}

/// # Summary
/// 示例 3：两条告警按 做空 → 做多 排序，表头统计正确。
#[tokio::test]
async fn test_example_short_listed_before_long() {
    let p = pipeline(Arc::new(
        StaticLookup::new()
            .with("000001", "平安银行")
            .with("600519", "贵州茅台"),
    ));
    let input = "✅ 标的: 000001\n周期: 15\n信号: 多信号\n价格: 12.3\n\n✅ 标的: 600519\n周期: 60\n信号: 做空\n价格: 1688";

    let output = p.process(input).await;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("long:1, short:1"));
    assert!(lines[1].starts_with("🔴 贵州茅台(600519)"));
    assert!(lines[2].starts_with("🟢 平安银行(000001)"));
}

/// # Summary
/// 流式布局中相邻的重复告警只保留一条。
#[tokio::test]
async fn test_adjacent_duplicates_collapse() {
    let p = pipeline(Arc::new(StaticLookup::new()));
    let input = "标的: CL1!, 信号: 做空\n标的: CL1!, 信号: 做空\n标的: GC1!, 信号: 做多";

    let output = p.process(input).await;
    assert_eq!(output.lines().count(), 3);
    assert!(output.contains("共2条"));
}

/// # Summary
/// 切分结果拼接后覆盖原文中的所有标签行。
#[tokio::test]
async fn test_segments_preserve_labelled_content() {
    let segmenter = AlertSegmenter::new(StrayLinePolicy::Drop).unwrap();
    let input = "- 标的: 000001\n- 周期: 5\n- 信号: 多信号\n- 标的: 600519, 价格: 1700, 指标: RSI";

    let joined: Vec<String> = segmenter
        .segment(input)
        .into_iter()
        .flat_map(|s| s.lines)
        .collect();
    for expected in [
        "标的: 000001",
        "周期: 5",
        "信号: 多信号",
        "标的: 600519",
        "价格: 1700",
        "指标: RSI",
    ] {
        assert!(joined.iter().any(|l| l == expected), "missing `{expected}`");
    }
}

/// # Summary
/// 没有有效记录时，输出为增强后的文本而非空摘要。
#[tokio::test]
async fn test_no_valid_record_returns_enriched_text() {
    let p = pipeline(Arc::new(StaticLookup::new().with("CL1!", "WTI原油")));
    let input = "标的: CL1!\n周期: 5";
    assert_eq!(p.process(input).await, "标的: WTI原油(CL1!)\n周期: 5");
}

/// # Summary
/// 每次查询耗时固定的名称查询替身，用于验证并发解析。
struct SlowLookup;

#[async_trait]
impl NameLookup for SlowLookup {
    async fn resolve(&self, code: &InstrumentCode) -> Option<String> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Some(format!("N{}", code))
    }
}

/// # Summary
/// 多个不同代码并发解析，总耗时接近单次而非累加。
#[tokio::test]
async fn test_distinct_codes_resolve_concurrently() {
    let p = pipeline(Arc::new(SlowLookup));
    let input = "标的: 000001\n标的: 000002\n标的: 000003\n标的: 000004";

    let started = Instant::now();
    let output = p.enrich(input).await;
    assert!(started.elapsed() < Duration::from_millis(600));
    assert!(output.contains("N000004(000004)"));
}

/// # Summary
/// 永不返回的行情源。
struct HangingSource;

#[async_trait]
impl NameSource for HangingSource {
    fn id(&self) -> &'static str {
        "hanging"
    }

    async fn lookup(
        &self,
        _code: &InstrumentCode,
        _exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

/// # Summary
/// 总是失败的行情源。
struct FailingSource;

#[async_trait]
impl NameSource for FailingSource {
    fn id(&self) -> &'static str {
        "failing"
    }

    async fn lookup(
        &self,
        code: &InstrumentCode,
        _exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError> {
        Err(QuoteError::Network(format!("connection refused for {code}")))
    }
}

/// # Summary
/// 示例 4：主数据源超时、备用数据源失败时，输出保留原代码且不会挂起。
#[tokio::test]
async fn test_example_provider_timeout_keeps_bare_code() {
    let resolver = NameResolver::new(
        Arc::new(MemCache::default()),
        Arc::new(DefaultClassifier),
        vec![
            Arc::new(StaticTable::builtin()) as Arc<dyn NameSource>,
            Arc::new(HangingSource) as Arc<dyn NameSource>,
            Arc::new(FailingSource) as Arc<dyn NameSource>,
        ],
        Duration::from_millis(150),
    );
    let p = pipeline(Arc::new(resolver));

    let started = Instant::now();
    let output = p.process("标的: 00700，信号: 做多，价格: 368.2").await;
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(output.contains("🟢 00700"));
    assert!(!output.contains("(00700)"));
}

/// # Summary
/// 流式布局中推断的信号不会吞入下一条告警的标题行。
#[tokio::test]
async fn test_stream_inferred_signal_ignores_next_header() {
    let p = pipeline(Arc::new(StaticLookup::new()));
    let input = "【突破提醒】\n标的: 000001\n周期: 5\n多头突破\n\n【做空提醒】\n标的: 600519\n周期: 5\n跌破支撑";

    let records = p.records(&p.enrich(input).await);
    assert_eq!(records[0].signal.as_deref(), Some("多头突破"));
    assert_eq!(records[0].direction, Direction::Long);

    let output = p.process(input).await;
    assert_eq!(
        output,
        "📊 信号汇总 共2条 | long:1, neutral:1\n🟢 000001 | 周期: 5 | 信号: 多头突破\n⚪ 600519 | 周期: 5 | 信号: 跌破支撑"
    );
}

/// # Summary
/// 名称中含空格时，摘要保留完整的 `名称(代码)`。
#[tokio::test]
async fn test_resolved_name_with_space_is_kept_whole() {
    let p = pipeline(Arc::new(StaticLookup::new().with("000002", "万 科Ａ")));
    let output = p.process("标的: 000002, 信号: 做多, 价格: 9.1").await;
    assert_eq!(
        output,
        "📊 信号汇总 共1条 | long:1\n🟢 万 科Ａ(000002) | 价格: 9.1 | 信号: 做多"
    );
}

/// # Summary
/// 信号位于标的与周期之间时同样能被推断。
#[tokio::test]
async fn test_signal_before_period_is_inferred() {
    let p = pipeline(Arc::new(StaticLookup::new()));
    let output = p.process("标的: 000001, 多信号, 周期: 5, 价格: 12.3").await;
    assert_eq!(
        output,
        "📊 信号汇总 共1条 | long:1\n🟢 000001 | 周期: 5 | 价格: 12.3 | 信号: 多信号"
    );
}
