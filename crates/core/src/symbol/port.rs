use crate::common::{Exchange, InstrumentCode};
use crate::symbol::error::QuoteError;
use async_trait::async_trait;

/// # Summary
/// 名称解析策略接口，回退链中的单个环节（静态表、行情源 A、行情源 B ...）。
///
/// # Invariants
/// - 所有策略遵循统一契约：`Ok(Some)` 命中，`Ok(None)` 不适用或无结果，`Err` 为数据源故障。
/// - 实现只做幂等读取，不得修改共享状态。
#[async_trait]
pub trait NameSource: Send + Sync {
    /// 数据源标识，用于日志。
    fn id(&self) -> &'static str;

    /// # Summary
    /// 查询单个代码的展示名称。
    ///
    /// # Arguments
    /// * `code`: 证券代码。
    /// * `exchange`: 数字代码的归属交易所；符号代码为 `None`。
    ///
    /// # Returns
    /// 命中返回名称；不适用返回 `Ok(None)`；远程失败返回 `QuoteError`。
    async fn lookup(
        &self,
        code: &InstrumentCode,
        exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError>;
}

/// # Summary
/// 数字代码的交易所归类规则。
///
/// # Invariants
/// - 这是一个经验规则，存在已知例外（如北交所等板块前缀）。
/// - 以可替换实现的形式存在，修正规则时无需改动解析链路。
pub trait MarketClassifier: Send + Sync {
    /// 返回代码所属交易所，无法归类时返回 `None`。
    fn classify(&self, code: &InstrumentCode) -> Option<Exchange>;
}

/// # Summary
/// 流水线消费的名称查询函数。
///
/// # Invariants
/// - 永不失败、永不无限阻塞：`None` 是正常且预期的结果。
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// 解析代码为展示名称，无法解析时返回 `None`。
    async fn resolve(&self, code: &InstrumentCode) -> Option<String>;
}
