//! 解题请求与聊天上下文

use serde::{Deserialize, Serialize};

use crate::models::provider::Provider;
use crate::models::subject::{ExamTier, Subject};

/// 聊天角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// 一轮历史对话
///
/// 插入顺序即时间顺序，提示词构建时只取最近几轮。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

/// 一次解题调用的输入
///
/// 构造后不再修改，生命周期只覆盖一次编排调用。
#[derive(Debug, Clone)]
pub struct SolveRequest {
    /// 题目图片原始字节
    pub image: Vec<u8>,
    /// 图片媒体类型（如 `image/jpeg`）
    pub mime_type: String,
    /// 科目（可选，缺省时由模型自行识别）
    pub subject: Option<Subject>,
    /// 考试层级（可选）
    pub exam_tier: Option<ExamTier>,
    /// 聊天模式下用户的追问
    pub user_message: Option<String>,
    /// 历史对话（仅聊天模式使用）
    pub chat_context: Vec<ChatTurn>,
    /// 指定后端；`None` 表示自动选择
    pub preferred_provider: Option<Provider>,
    /// 是否要求全后端并发比较
    pub require_multiple: bool,
    /// 是否要求难度评估
    pub require_difficulty: bool,
    /// 是否要求相似题
    pub require_similar: bool,
    /// 是否要求知识点复习
    pub require_topic_review: bool,
}

impl SolveRequest {
    pub fn new(image: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            image,
            mime_type: mime_type.into(),
            subject: None,
            exam_tier: None,
            user_message: None,
            chat_context: Vec::new(),
            preferred_provider: None,
            require_multiple: false,
            require_difficulty: false,
            require_similar: false,
            require_topic_review: false,
        }
    }

    /// 是否处于聊天追问模式
    ///
    /// 需要同时有追问消息和至少一轮历史对话。
    pub fn is_chat_mode(&self) -> bool {
        self.user_message.is_some() && !self.chat_context.is_empty()
    }

    /// 指定的后端（把哨兵值 `Auto` 归一化为 `None`）
    pub fn forced_provider(&self) -> Option<Provider> {
        match self.preferred_provider {
            Some(Provider::Auto) | None => None,
            Some(provider) => Some(provider),
        }
    }
}
