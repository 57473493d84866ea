//! 响应附加信息提取 - 业务能力层
//!
//! 从模型的自由文本中用模式匹配提取难度/相似题/知识点复习。
//! 这种提取天然脆弱，定位是"尽力而为的增强"：匹配不到就
//! 返回 `None`，绝不升级为错误。

use regex::Regex;

use crate::models::enrichment::{Difficulty, SimilarQuestion, TopicReview};

/// 提取难度等级
///
/// 寻找 "Zorluk: <etiket>" 形式的行，标签解析失败视为未提供。
pub fn extract_difficulty(text: &str) -> Option<Difficulty> {
    let re = Regex::new(r"(?i)zorluk(?:\s+seviyesi)?\s*[:：]\s*(çok\s+zor|kolay|orta|zor)").ok()?;
    let captures = re.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}

/// 提取相似题列表
///
/// 寻找 "Soru: / Konu: / Zorluk:" 三行一组的块，最多取三组。
pub fn extract_similar_questions(text: &str) -> Option<Vec<SimilarQuestion>> {
    let re = Regex::new(
        r"(?im)^\s*(?:\d+\.\s*)?Soru\s*[:：]\s*(.+)\r?\n\s*Konu\s*[:：]\s*(.+)\r?\n\s*Zorluk\s*[:：]\s*(.+)$",
    )
    .ok()?;

    let questions: Vec<SimilarQuestion> = re
        .captures_iter(text)
        .take(3)
        .map(|c| SimilarQuestion {
            question: c[1].trim().to_string(),
            topic: c[2].trim().to_string(),
            difficulty: c[3].trim().to_string(),
        })
        .collect();

    if questions.is_empty() {
        None
    } else {
        Some(questions)
    }
}

/// 提取知识点复习
///
/// "Ana Konu:" 行是必需的锚点；子话题与资源从对应标题下的
/// 列表行收集，收集不到就留空列表。
pub fn extract_topic_review(text: &str) -> Option<TopicReview> {
    let main_re = Regex::new(r"(?im)^\s*Ana\s+Konu\s*[:：]\s*(.+)$").ok()?;
    let main_topic = main_re.captures(text)?.get(1)?.as_str().trim().to_string();

    let subtopics = collect_list_items(text, "Alt Konular");
    let recommended_resources = collect_list_items(text, "Kaynaklar");

    let advice_re = Regex::new(r"(?im)^\s*Çalışma\s+Öneri(?:si|leri)\s*[:：]\s*(.+)$").ok()?;
    let practice_advice = advice_re
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(TopicReview {
        main_topic,
        subtopics,
        recommended_resources,
        practice_advice,
    })
}

/// 收集指定标题下的列表项（`-` 或 `1.` 开头的行），遇到空行或
/// 新标题即停止
fn collect_list_items(text: &str, heading: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_section {
            if trimmed
                .trim_start_matches(['*', '#', ' '])
                .starts_with(heading)
            {
                in_section = true;
            }
            continue;
        }

        if let Some(item) = trimmed.strip_prefix('-') {
            items.push(item.trim().to_string());
        } else if let Some(rest) = trimmed.split_once('.').and_then(|(num, rest)| {
            num.trim().parse::<u32>().ok().map(|_| rest)
        }) {
            items.push(rest.trim().to_string());
        } else {
            break;
        }
    }

    items
}
