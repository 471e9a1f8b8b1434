use async_trait::async_trait;
use shaobing_core::cache::port::{Cache, CacheExt};
use shaobing_core::common::{CodeKind, Exchange, InstrumentCode};
use shaobing_core::symbol::error::QuoteError;
use shaobing_core::symbol::port::{MarketClassifier, NameLookup, NameSource};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// # Summary
/// 证券名称解析器：缓存前置的有序回退链。
///
/// # Invariants
/// - 每个数据源调用都有硬性等待上限，超时视作该数据源失败并继续回退。
/// - 单个代码的最长等待不超过 `sources.len() × timeout`。
/// - 数据源错误只记录日志，永不传播给调用方。
/// - 仅缓存成功结果，未解析的代码下次仍会重新查询。
pub struct NameResolver {
    // 进程级共享的名称缓存
    cache: Arc<dyn Cache>,
    // 数字代码的交易所归类规则
    classifier: Arc<dyn MarketClassifier>,
    // 按顺序尝试的数据源
    sources: Vec<Arc<dyn NameSource>>,
    // 单次数据源调用的等待上限
    timeout: Duration,
}

impl NameResolver {
    /// # Summary
    /// 组装名称解析器。
    ///
    /// # Arguments
    /// * `cache`: 共享缓存。
    /// * `classifier`: 交易所归类规则。
    /// * `sources`: 按优先级排列的数据源（通常为 静态表、新浪、腾讯）。
    /// * `timeout`: 单次调用的等待上限。
    pub fn new(
        cache: Arc<dyn Cache>,
        classifier: Arc<dyn MarketClassifier>,
        sources: Vec<Arc<dyn NameSource>>,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            classifier,
            sources,
            timeout,
        }
    }

    /// # Summary
    /// 生成 `(市场, 代码)` 形式的缓存键。
    ///
    /// # Logic
    /// 数字代码使用交易所前缀 (`hk`/`sh`/`sz`)，符号代码使用 `sym`。
    fn cache_key(code: &InstrumentCode, exchange: Option<Exchange>) -> String {
        match exchange {
            Some(exchange) => format!("{}:{}", exchange.prefix(), code.as_str()),
            None => format!("sym:{}", code.as_str()),
        }
    }

    /// # Summary
    /// 在等待上限内调用单个数据源。
    ///
    /// # Logic
    /// 超时通过 `tokio::time::timeout` 取消底层 Future，映射为 `QuoteError::Timeout`。
    async fn call_source(
        &self,
        source: &dyn NameSource,
        code: &InstrumentCode,
        exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError> {
        match tokio::time::timeout(self.timeout, source.lookup(code, exchange)).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::Timeout(
                u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    /// # Summary
    /// 解析单个代码的展示名称。
    ///
    /// # Logic
    /// 1. 数字代码先经归类规则确定交易所，无法归类则直接返回 None。
    /// 2. 查询缓存，命中即返回。
    /// 3. 依次尝试各数据源，首个非空结果写入缓存后返回。
    /// 4. 任何数据源错误（含超时）仅记录 warn 日志并继续。
    ///
    /// # Returns
    /// 解析成功返回名称，否则返回 None。
    pub async fn resolve_code(&self, code: &InstrumentCode) -> Option<String> {
        let exchange = match code.kind() {
            CodeKind::Numeric => match self.classifier.classify(code) {
                Some(exchange) => Some(exchange),
                None => {
                    debug!("No market matches numeric code {}, leaving unresolved", code);
                    return None;
                }
            },
            CodeKind::Symbolic => None,
        };

        let key = Self::cache_key(code, exchange);
        match self.cache.get::<String>(&key).await {
            Ok(Some(name)) => {
                debug!("Name cache hit {} -> {}", key, name);
                return Some(name);
            }
            Ok(None) => {}
            Err(e) => warn!("Name cache read failed for {}: {}", key, e),
        }

        for source in &self.sources {
            match self.call_source(source.as_ref(), code, exchange).await {
                Ok(Some(name)) => {
                    debug!("{} resolved {} -> {}", source.id(), key, name);
                    if let Err(e) = self.cache.set(&key, &name).await {
                        warn!("Name cache write failed for {}: {}", key, e);
                    }
                    return Some(name);
                }
                Ok(None) => {}
                Err(e) => warn!("Name source {} failed for {}: {}", source.id(), key, e),
            }
        }

        debug!("All name sources exhausted for {}", key);
        None
    }
}

#[async_trait]
impl NameLookup for NameResolver {
    async fn resolve(&self, code: &InstrumentCode) -> Option<String> {
        self.resolve_code(code).await
    }
}
