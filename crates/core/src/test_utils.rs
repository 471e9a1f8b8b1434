//! 供下游 crate 测试使用的内存替身实现。

use crate::common::InstrumentCode;
use crate::notify::error::NotifyError;
use crate::notify::port::Notifier;
use crate::symbol::port::NameLookup;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Mutex;

/// # Summary
/// 基于预置映射的名称查询替身，同时记录每个代码被查询的次数。
#[derive(Default)]
pub struct StaticLookup {
    names: DashMap<String, String>,
    calls: DashMap<String, usize>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一条 代码 → 名称 映射
    pub fn with(self, code: &str, name: &str) -> Self {
        self.names.insert(code.to_string(), name.to_string());
        self
    }

    /// 指定代码被查询的次数
    pub fn calls(&self, code: &str) -> usize {
        self.calls.get(code).map(|v| *v).unwrap_or(0)
    }
}

#[async_trait]
impl NameLookup for StaticLookup {
    async fn resolve(&self, code: &InstrumentCode) -> Option<String> {
        *self.calls.entry(code.as_str().to_string()).or_insert(0) += 1;
        self.names.get(code.as_str()).map(|v| v.value().clone())
    }
}

/// # Summary
/// 记录所有投递内容的通知替身，可配置为始终失败。
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次投递都返回平台错误
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// 已投递的 (主题, 正文) 列表
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Platform("stub failure".to_string()));
        }
        let mut sent = self
            .sent
            .lock()
            .map_err(|e| NotifyError::Platform(e.to_string()))?;
        sent.push((subject.to_string(), content.to_string()));
        Ok(())
    }
}
