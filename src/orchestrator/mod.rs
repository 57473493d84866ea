//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是整个系统的"指挥中心"，负责一次解题调用的完整调度。
//!
//! ## 模块划分
//!
//! ### `mcp_service` - 解题编排服务
//! - 管理后端生命周期（按配置启用、静态参数表）
//! - 缓存检查与写回
//! - 选择分发策略并聚合结果
//! - 附加信息提取
//!
//! ### `dispatch` - 分发策略
//! - 全后端并发（等全部结束、过滤低置信、按优先级排序）
//! - 自动选择（串行尝试、首个合格即停、并发兜底）
//!
//! ## 层次关系
//!
//! ```text
//! mcp_service (一次 solve 调用)
//!     ↓
//! dispatch (决定调用哪些后端、什么顺序)
//!     ↓
//! services (能力层：cache / prompt / providers / confidence / enrichment)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：dispatch 管策略，mcp_service 管资源和流程
//! 2. **错误即数据**：后端失败记录在结果里，从不中断兄弟调用
//! 3. **策略对后端泛型**：dispatch 只认"可调用的后端"，便于测试注入

pub mod dispatch;
pub mod mcp_service;

// 重新导出主要类型
pub use dispatch::{HIGH_CONFIDENCE, LOW_CONFIDENCE};
pub use mcp_service::McpService;
