use serde::{Deserialize, Serialize};
use shaobing_cache::mem::MemCache;
use shaobing_core::cache::port::{Cache, CacheExt};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct ResolvedItem {
    code: String,
    name: String,
}

#[tokio::test]
async fn test_mem_cache_raw_ops() {
    let cache = MemCache::default();
    let key = "sz:000819";
    let value = vec![1, 2, 3, 4];

    // 测试存取
    cache.set_raw(key, value.clone()).await.unwrap();
    let result = cache.get_raw(key).await.unwrap().unwrap();
    assert_eq!(result, value);

    // 测试删除
    cache.del(key).await.unwrap();
    let result = cache.get_raw(key).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_mem_cache_typed_ops() {
    let cache = MemCache::default();
    let item = ResolvedItem {
        code: "00700".to_string(),
        name: "腾讯控股".to_string(),
    };

    cache.set("hk:00700", &item).await.unwrap();
    let result: ResolvedItem = cache.get("hk:00700").await.unwrap().unwrap();
    assert_eq!(result, item);

    // 同一键按错误类型读取应返回反序列化错误
    let wrong: Result<Option<u32>, _> = cache.get("hk:00700").await;
    assert!(wrong.is_err());
}

#[tokio::test]
async fn test_mem_cache_bulk_eviction_over_capacity() {
    let cache = MemCache::new(3, None);
    for i in 0..3 {
        cache.set(&format!("k{i}"), &i).await.unwrap();
    }
    assert_eq!(cache.len().await, 3);

    // 覆盖已有键不触发清空
    cache.set("k0", &10).await.unwrap();
    assert_eq!(cache.len().await, 3);

    // 第 4 个新键触发整体清空，只保留本次写入
    cache.set("k3", &3).await.unwrap();
    assert_eq!(cache.len().await, 1);
    let kept: Option<i32> = cache.get("k3").await.unwrap();
    assert_eq!(kept, Some(3));
    let gone: Option<i32> = cache.get("k1").await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_mem_cache_ttl_expiry() {
    let cache = MemCache::new(16, Some(Duration::from_millis(30)));
    cache.set("sh:600519", &"贵州茅台").await.unwrap();
    let fresh: Option<String> = cache.get("sh:600519").await.unwrap();
    assert_eq!(fresh.as_deref(), Some("贵州茅台"));

    tokio::time::sleep(Duration::from_millis(60)).await;
    let expired: Option<String> = cache.get("sh:600519").await.unwrap();
    assert!(expired.is_none());
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_mem_cache_concurrent_writers() {
    let cache = Arc::new(MemCache::new(10_000, None));
    let mut handles = Vec::new();
    for t in 0..8 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..100 {
                cache.set(&format!("t{t}:{i}"), &i).await.unwrap();
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(cache.len().await, 800);
}
