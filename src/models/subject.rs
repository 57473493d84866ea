//! 科目与考试层级元数据

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 科目枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// 数学
    Matematik,
    /// 几何
    Geometri,
    /// 物理
    Fizik,
    /// 化学
    Kimya,
    /// 生物
    Biyoloji,
    /// 土耳其语文
    Turkce,
    /// 文学
    Edebiyat,
    /// 历史
    Tarih,
    /// 地理
    Cografya,
    /// 哲学
    Felsefe,
}

impl Subject {
    /// 提示词中使用的标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Matematik => "Matematik",
            Subject::Geometri => "Geometri",
            Subject::Fizik => "Fizik",
            Subject::Kimya => "Kimya",
            Subject::Biyoloji => "Biyoloji",
            Subject::Turkce => "Türkçe",
            Subject::Edebiyat => "Edebiyat",
            Subject::Tarih => "Tarih",
            Subject::Cografya => "Coğrafya",
            Subject::Felsefe => "Felsefe",
        }
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "matematik" => Ok(Subject::Matematik),
            "geometri" => Ok(Subject::Geometri),
            "fizik" => Ok(Subject::Fizik),
            "kimya" => Ok(Subject::Kimya),
            "biyoloji" => Ok(Subject::Biyoloji),
            "turkce" | "türkçe" => Ok(Subject::Turkce),
            "edebiyat" => Ok(Subject::Edebiyat),
            "tarih" => Ok(Subject::Tarih),
            "cografya" | "coğrafya" => Ok(Subject::Cografya),
            "felsefe" => Ok(Subject::Felsefe),
            other => Err(format!("bilinmeyen ders: {other}")),
        }
    }
}

/// 考试层级
///
/// TYT 考基础能力，AYT 考专业领域，两者的提示词深度不同。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamTier {
    Tyt,
    Ayt,
}

impl ExamTier {
    /// 缩写名称（提示词与缓存指纹中使用）
    pub fn name(self) -> &'static str {
        match self {
            ExamTier::Tyt => "TYT",
            ExamTier::Ayt => "AYT",
        }
    }

    /// 全称
    pub fn full_name(self) -> &'static str {
        match self {
            ExamTier::Tyt => "Temel Yeterlilik Testi",
            ExamTier::Ayt => "Alan Yeterlilik Testi",
        }
    }
}

impl FromStr for ExamTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TYT" => Ok(ExamTier::Tyt),
            "AYT" => Ok(ExamTier::Ayt),
            other => Err(format!("bilinmeyen sınav türü: {other}")),
        }
    }
}
