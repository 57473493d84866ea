//! # Exam Photo Solver
//!
//! 一个多 AI 后端的拍照解题编排核心
//!
//! ## 架构设计
//!
//! 本系统采用严格的三层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 纯值对象，不含业务逻辑
//! - `Provider` / `ProviderConfig` - AI 后端标识与静态描述
//! - `SolveRequest` / `ModelResponse` - 一次解题调用的输入输出
//! - `Subject` / `ExamTier` - 科目与考试层级元数据
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次调用
//! - `ResponseCache` - 有界、带 TTL 的解答缓存
//! - `prompt` - 提示词构建（纯函数）
//! - `confidence` - 解答置信度启发式打分
//! - `providers` - 各 AI 后端的适配器（gemini / claude / gpt / ollama）
//! - `enrichment` - 从自由文本中提取难度/相似题/知识点复习
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - `McpService` 调度中心
//! - 缓存检查 → 分发策略 → 结果聚合 → 缓存写回
//! - 三种分发策略：指定单后端 / 自动选择+兜底 / 全后端并发
//!
//! ## 设计原则
//!
//! 1. **单一职责**：适配器只管调用，打分器只管打分，编排层只管调度
//! 2. **错误即数据**：适配器失败记录在 `ModelResponse.error`，从不向上抛
//! 3. **向下依赖**：orchestrator → services → models
//! 4. **显式配置**：所有后端凭证通过 `Config` 注入，无全局状态

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::ProviderError;
pub use models::provider::{ModelResponse, Provider, ProviderConfig};
pub use models::request::{ChatRole, ChatTurn, SolveRequest};
pub use models::subject::{ExamTier, Subject};
pub use orchestrator::McpService;
pub use services::cache::{CacheStats, ResponseCache};
