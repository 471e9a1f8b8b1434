use async_trait::async_trait;
use shaobing_core::common::{Exchange, InstrumentCode};
use shaobing_core::symbol::error::QuoteError;
use shaobing_core::symbol::port::NameSource;
use std::collections::HashMap;

/// 内置的非股票品种映射：期货、外汇、贵金属、加密货币与指数
const BUILTIN: &[(&str, &str)] = &[
    // 期货连续合约
    ("CL1!", "WTI原油"),
    ("BZ1!", "布伦特原油"),
    ("NG1!", "天然气"),
    ("GC1!", "COMEX黄金"),
    ("SI1!", "COMEX白银"),
    ("HG1!", "COMEX铜"),
    ("ES1!", "标普500期货"),
    ("NQ1!", "纳指100期货"),
    ("YM1!", "道指期货"),
    ("RTY1!", "罗素2000期货"),
    // 外汇与贵金属现货
    ("XAUUSD", "现货黄金"),
    ("XAGUSD", "现货白银"),
    ("EURUSD", "欧元/美元"),
    ("GBPUSD", "英镑/美元"),
    ("AUDUSD", "澳元/美元"),
    ("USDJPY", "美元/日元"),
    ("USDCNH", "美元/离岸人民币"),
    ("DXY", "美元指数"),
    // 加密货币
    ("BTCUSDT", "比特币"),
    ("ETHUSDT", "以太坊"),
    ("SOLUSDT", "Solana"),
    ("BNBUSDT", "币安币"),
    ("XRPUSDT", "瑞波币"),
    ("DOGEUSDT", "狗狗币"),
    ("BTCUSD", "比特币"),
    ("ETHUSD", "以太坊"),
    // 指数
    ("SPX", "标普500"),
    ("NDX", "纳斯达克100"),
    ("DJI", "道琼斯工业指数"),
    ("HSI", "恒生指数"),
    ("HSTECH", "恒生科技指数"),
];

/// # Summary
/// 进程内静态代码映射表，覆盖没有远程报价接口的品种。
///
/// # Invariants
/// - 仅做精确匹配，不做大小写或前后缀归一。
/// - 只对符号代码生效；数字代码直接返回 `Ok(None)`。
#[derive(Debug, Clone)]
pub struct StaticTable {
    entries: HashMap<String, String>,
}

impl StaticTable {
    /// 使用内置映射创建
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN.iter().copied())
    }

    /// 使用自定义映射创建
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// 精确查询
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }
}

impl Default for StaticTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl NameSource for StaticTable {
    fn id(&self) -> &'static str {
        "static"
    }

    async fn lookup(
        &self,
        code: &InstrumentCode,
        exchange: Option<Exchange>,
    ) -> Result<Option<String>, QuoteError> {
        if exchange.is_some() {
            return Ok(None);
        }
        Ok(self.get(code.as_str()).map(str::to_string))
    }
}
