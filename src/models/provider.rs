//! AI 后端标识与静态描述
//!
//! 后端集合是封闭的枚举而非开放的多态：每个后端对应
//! `services/providers/` 下的一个适配器函数，由编排层的
//! 单个 match 分发。

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::enrichment::{Difficulty, SimilarQuestion, TopicReview};

/// AI 后端标识
///
/// `Auto` 是哨兵值，表示"由编排层自动选择"，不对应任何适配器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
    Claude,
    Gpt,
    Ollama,
    Auto,
}

impl Provider {
    /// 全部真实后端（不含 `Auto`）
    pub const BACKENDS: [Provider; 4] = [
        Provider::Gemini,
        Provider::Claude,
        Provider::Gpt,
        Provider::Ollama,
    ];

    /// 标识字符串（与序列化形式一致）
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Claude => "claude",
            Provider::Gpt => "gpt",
            Provider::Ollama => "ollama",
            Provider::Auto => "auto",
        }
    }

    /// 面向用户的展示名称
    pub fn display_name(self) -> &'static str {
        match self {
            Provider::Gemini => "Google Gemini",
            Provider::Claude => "Anthropic Claude",
            Provider::Gpt => "OpenAI GPT-4 Vision",
            Provider::Ollama => "Ollama (Yerel Model)",
            Provider::Auto => "Otomatik Seçim",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "claude" => Ok(Provider::Claude),
            "gpt" => Ok(Provider::Gpt),
            "ollama" => Ok(Provider::Ollama),
            "auto" => Ok(Provider::Auto),
            other => Err(format!("desteklenmeyen sağlayıcı: {other}")),
        }
    }
}

/// 后端的附加能力集合
///
/// 决定提示词中是否附加对应的附加指令块，以及响应
/// 提取阶段是否尝试解析对应字段。
#[derive(Debug, Clone, Copy)]
pub struct ProviderCapabilities {
    pub difficulty_estimation: bool,
    pub similar_questions: bool,
    pub topic_review: bool,
}

/// 单个后端的静态描述
///
/// 在 `McpService` 构造时创建一次，之后不再修改。
/// `priority` 越小越先尝试，同时决定并发结果的输出顺序。
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub priority: u8,
    pub enabled: bool,
    pub max_retries: u32,
    pub timeout: Duration,
    pub capabilities: ProviderCapabilities,
}

impl ProviderConfig {
    /// 各后端的静态参数表
    ///
    /// 超时与重试预算沿用各后端的经验值：云端后端 30-45 秒，
    /// 本地 Ollama 最慢给 60 秒。
    pub fn for_provider(provider: Provider) -> Self {
        let all = ProviderCapabilities {
            difficulty_estimation: true,
            similar_questions: true,
            topic_review: true,
        };
        match provider {
            Provider::Gemini => Self {
                provider,
                priority: 1,
                enabled: true,
                max_retries: 3,
                timeout: Duration::from_secs(30),
                capabilities: all,
            },
            Provider::Claude => Self {
                provider,
                priority: 2,
                enabled: true,
                max_retries: 3,
                timeout: Duration::from_secs(45),
                capabilities: all,
            },
            Provider::Gpt => Self {
                provider,
                priority: 3,
                enabled: true,
                max_retries: 3,
                timeout: Duration::from_secs(40),
                capabilities: all,
            },
            Provider::Ollama => Self {
                provider,
                priority: 4,
                enabled: true,
                max_retries: 2,
                timeout: Duration::from_secs(60),
                // 本地模型只做基础解答，不生成相似题和知识点复习
                capabilities: ProviderCapabilities {
                    difficulty_estimation: true,
                    similar_questions: false,
                    topic_review: false,
                },
            },
            Provider::Auto => Self {
                provider,
                priority: u8::MAX,
                enabled: false,
                max_retries: 0,
                timeout: Duration::ZERO,
                capabilities: ProviderCapabilities {
                    difficulty_estimation: false,
                    similar_questions: false,
                    topic_review: false,
                },
            },
        }
    }
}

/// 单个后端一次解题尝试的结果
///
/// 失败时 `solution` 为空、`confidence` 为 0、`error` 记录原因；
/// 创建后不再修改（附加字段由编排层在返回前一次性填充）。
#[derive(Debug, Clone, Serialize)]
pub struct ModelResponse {
    pub provider: Provider,
    pub solution: String,
    /// 启发式置信度，始终落在 [0, 1]
    pub confidence: f64,
    pub processing_time: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_questions: Option<Vec<SimilarQuestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_review: Option<TopicReview>,
}

impl ModelResponse {
    /// 成功结果
    pub fn success(provider: Provider, solution: String, confidence: f64, elapsed: Duration) -> Self {
        Self {
            provider,
            solution,
            confidence,
            processing_time: elapsed,
            error: None,
            difficulty: None,
            similar_questions: None,
            topic_review: None,
        }
    }

    /// 失败结果（错误即数据，不向上抛）
    pub fn failure(provider: Provider, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            provider,
            solution: String::new(),
            confidence: 0.0,
            processing_time: elapsed,
            error: Some(error.into()),
            difficulty: None,
            similar_questions: None,
            topic_review: None,
        }
    }

    /// 是否为可用的成功结果
    pub fn is_usable(&self) -> bool {
        !self.solution.is_empty() && self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in Provider::BACKENDS {
            assert_eq!(provider.as_str().parse::<Provider>().unwrap(), provider);
        }
        assert_eq!("AUTO".parse::<Provider>().unwrap(), Provider::Auto);
        assert!("mistral".parse::<Provider>().is_err());
    }

    #[test]
    fn test_priorities_induce_total_order() {
        let mut priorities: Vec<u8> = Provider::BACKENDS
            .iter()
            .map(|p| ProviderConfig::for_provider(*p).priority)
            .collect();
        priorities.sort_unstable();
        priorities.dedup();
        assert_eq!(priorities.len(), Provider::BACKENDS.len());
        assert_eq!(priorities, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_failure_response_shape() {
        let response = ModelResponse::failure(Provider::Gpt, "boom", Duration::from_millis(5));
        assert!(response.solution.is_empty());
        assert_eq!(response.confidence, 0.0);
        assert!(!response.is_usable());
    }
}
