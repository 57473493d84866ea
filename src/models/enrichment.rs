//! 解答的附加结构
//!
//! 这些字段由 `services/enrichment` 从模型的自由文本中
//! 尽力提取，提取不到就整体缺省，从不报错。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单
    Kolay,
    /// 中等
    Orta,
    /// 困难
    Zor,
    /// 极难
    CokZor,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Kolay => "Kolay",
            Difficulty::Orta => "Orta",
            Difficulty::Zor => "Zor",
            Difficulty::CokZor => "Çok Zor",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "çok zor" 必须先于 "zor" 判断
        let lowered = s.trim().to_lowercase();
        if lowered.starts_with("çok zor") {
            return Ok(Difficulty::CokZor);
        }
        if lowered.starts_with("kolay") {
            return Ok(Difficulty::Kolay);
        }
        if lowered.starts_with("orta") {
            return Ok(Difficulty::Orta);
        }
        if lowered.starts_with("zor") {
            return Ok(Difficulty::Zor);
        }
        Err(format!("bilinmeyen zorluk: {s}"))
    }
}

/// 一道相似题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarQuestion {
    pub question: String,
    pub topic: String,
    pub difficulty: String,
}

/// 知识点复习
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicReview {
    pub main_topic: String,
    pub subtopics: Vec<String>,
    pub recommended_resources: Vec<String>,
    pub practice_advice: String,
}
