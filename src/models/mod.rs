//! 模型层（Models）
//!
//! 纯值对象，不含业务逻辑：
//! - `provider` - AI 后端标识、静态描述、单次调用结果
//! - `request` - 解题请求与聊天上下文
//! - `subject` - 科目与考试层级元数据
//! - `enrichment` - 难度/相似题/知识点复习等附加结构

pub mod enrichment;
pub mod provider;
pub mod request;
pub mod subject;

pub use enrichment::{Difficulty, SimilarQuestion, TopicReview};
pub use provider::{ModelResponse, Provider, ProviderCapabilities, ProviderConfig};
pub use request::{ChatRole, ChatTurn, SolveRequest};
pub use subject::{ExamTier, Subject};
