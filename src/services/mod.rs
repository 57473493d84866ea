//! 业务能力层（Services）
//!
//! 描述"我能做什么"，每个模块只处理单次调用，不关心流程：
//! - `cache` - 解答缓存能力
//! - `prompt` - 提示词构建能力
//! - `confidence` - 置信度打分能力
//! - `providers` - 各 AI 后端的调用能力
//! - `enrichment` - 附加信息提取能力
//!
//! 分发顺序、兜底和聚合由编排层决定。

pub mod cache;
pub mod confidence;
pub mod enrichment;
pub mod prompt;
pub mod providers;

pub use cache::{CacheStats, ResponseCache};
