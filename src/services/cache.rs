//! 解答缓存 - 业务能力层
//!
//! 有界、带 TTL 的键值缓存，避免对同一张题目图片重复调用后端。
//!
//! ## 行为约定
//! - 容量满时淘汰"创建时间最早"的那一条（不是最久未访问）。
//!   目标规模只有几百到几千条，O(n) 扫描淘汰足够，不值得上堆结构。
//! - 过期条目在读取时惰性删除；`purge_expired` 供周期性维护用。
//! - 缓存被所有并发 `solve` 调用共享，内部用互斥锁保证每个
//!   操作原子完成，锁内只做同步的表操作。

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::models::provider::Provider;

/// 指纹计算时取图片负载的前多少字节
const IMAGE_PREFIX_LEN: usize = 100;

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    solution: String,
    provider: Provider,
    created_at: Instant,
    /// 插入序号，创建时间完全相同时的淘汰决胜
    seq: u64,
    hits: u64,
}

/// 缓存统计快照（只读，无副作用）
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub ttl: Duration,
    pub total_hits: u64,
    pub avg_hits: f64,
    /// 各后端贡献的条目数
    pub providers: HashMap<Provider, usize>,
}

/// 解答缓存
pub struct ResponseCache {
    inner: Mutex<CacheState>,
    capacity: usize,
    ttl: Duration,
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    next_seq: u64,
}

/// 计算缓存指纹
///
/// SHA-256 覆盖所有判别串（科目、考试层级、模式标签等）加上
/// 图片负载的稳定前缀。相同输入必得相同键，任一判别串变化
/// 都会改变键。
pub fn fingerprint(image: &[u8], discriminators: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in discriminators {
        hasher.update(part.as_bytes());
        hasher.update(b"-");
    }
    hasher.update(&image[..image.len().min(IMAGE_PREFIX_LEN)]);
    format!("{:x}", hasher.finalize())
}

impl ResponseCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(CacheState {
                entries: HashMap::new(),
                next_seq: 0,
            }),
            capacity,
            ttl,
        }
    }

    /// 读取缓存
    ///
    /// 过期条目当场删除并返回 `None`；命中则累加命中计数。
    pub fn get(&self, key: &str) -> Option<String> {
        let mut state = self.inner.lock().expect("cache lock poisoned");

        let expired = match state.entries.get(key) {
            None => return None,
            Some(entry) => entry.created_at.elapsed() > self.ttl,
        };

        if expired {
            state.entries.remove(key);
            debug!("缓存条目已过期，删除: {}", &key[..12.min(key.len())]);
            return None;
        }

        let entry = state.entries.get_mut(key)?;
        entry.hits += 1;
        Some(entry.solution.clone())
    }

    /// 写入缓存
    ///
    /// 容量已满时先淘汰创建时间最早的一条，再插入新条目
    /// （命中计数归零）。
    pub fn put(&self, key: &str, solution: &str, provider: Provider) {
        let mut state = self.inner.lock().expect("cache lock poisoned");

        if state.entries.len() >= self.capacity && !state.entries.contains_key(key) {
            if let Some(oldest) = state
                .entries
                .iter()
                .min_by_key(|(_, e)| (e.created_at, e.seq))
                .map(|(k, _)| k.clone())
            {
                state.entries.remove(&oldest);
                debug!("缓存已满，淘汰最早条目: {}", &oldest[..12.min(oldest.len())]);
            }
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            key.to_string(),
            CacheEntry {
                solution: solution.to_string(),
                provider,
                created_at: Instant::now(),
                seq,
                hits: 0,
            },
        );
    }

    /// 统计快照
    pub fn stats(&self) -> CacheStats {
        let state = self.inner.lock().expect("cache lock poisoned");

        let total_hits: u64 = state.entries.values().map(|e| e.hits).sum();
        let mut providers: HashMap<Provider, usize> = HashMap::new();
        for entry in state.entries.values() {
            *providers.entry(entry.provider).or_insert(0) += 1;
        }

        CacheStats {
            size: state.entries.len(),
            capacity: self.capacity,
            ttl: self.ttl,
            total_hits,
            avg_hits: if state.entries.is_empty() {
                0.0
            } else {
                total_hits as f64 / state.entries.len() as f64
            },
            providers,
        }
    }

    /// 清空全部条目
    pub fn clear(&self) {
        let mut state = self.inner.lock().expect("cache lock poisoned");
        state.entries.clear();
    }

    /// 清理全部过期条目，返回删除数量
    ///
    /// 全表扫描，只用于周期性维护，不在热路径上调用。
    pub fn purge_expired(&self) -> usize {
        let mut state = self.inner.lock().expect("cache lock poisoned");
        let before = state.entries.len();
        let ttl = self.ttl;
        state.entries.retain(|_, e| e.created_at.elapsed() <= ttl);
        before - state.entries.len()
    }
}
