use async_trait::async_trait;
use dashmap::DashMap;
use shaobing_core::cache::error::CacheError;
use shaobing_core::cache::port::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

/// # Summary
/// 单个缓存条目，记录写入时刻以支持过期判定。
struct Entry {
    value: Vec<u8>,
    stored_at: Instant,
}

/// # Summary
/// 基于 DashMap 的有界内存缓存实现。
///
/// # Invariants
/// - 所有操作均通过并发哈希表 `DashMap` 执行，保证多线程安全。
/// - 条目数超过 `capacity` 时整体清空，不做精确的 LRU 追踪。
/// - `ttl` 为 `None` 时条目只受容量约束；过期条目在读取时视为未命中并被移除。
pub struct MemCache {
    // 线程安全的 KV 存储容器
    storage: DashMap<String, Entry>,
    // 条目数上限
    capacity: usize,
    // 条目有效期
    ttl: Option<Duration>,
}

impl MemCache {
    /// # Summary
    /// 创建一个有界 MemCache 实例。
    ///
    /// # Arguments
    /// * `capacity`: 条目数上限，超过后整体清空。
    /// * `ttl`: 条目有效期，`None` 表示永不过期。
    pub fn new(capacity: usize, ttl: Option<Duration>) -> Self {
        Self {
            storage: DashMap::new(),
            capacity,
            ttl,
        }
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }
}

impl Default for MemCache {
    fn default() -> Self {
        Self::new(1024, None)
    }
}

#[async_trait]
impl Cache for MemCache {
    /// # Summary
    /// 写入原始字节数据。
    ///
    /// # Logic
    /// 1. 插入或覆盖条目，并刷新写入时刻。
    /// 2. 若条目数超过上限，整体清空后再保留本次写入。
    async fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<(), CacheError> {
        if self.storage.len() >= self.capacity && !self.storage.contains_key(key) {
            debug!(
                "MemCache over capacity ({}), sweeping {} entries",
                self.capacity,
                self.storage.len()
            );
            self.storage.clear();
        }
        self.storage.insert(
            key.to_string(),
            Entry {
                value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// # Summary
    /// 读取原始字节数据。
    ///
    /// # Logic
    /// 1. 检索条目并克隆其值。
    /// 2. 已过期的条目在此处移除并返回 None。
    async fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let hit = match self.storage.get(key) {
            Some(entry) if self.is_expired(&entry) => None,
            Some(entry) => return Ok(Some(entry.value.clone())),
            None => return Ok(None),
        };
        // 读锁已释放，可安全移除
        self.storage.remove(key);
        Ok(hit)
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        self.storage.remove(key);
        Ok(())
    }

    async fn len(&self) -> usize {
        self.storage.len()
    }
}
