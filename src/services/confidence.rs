//! 解答置信度打分 - 业务能力层
//!
//! 启发式打分，不是语义评估：衡量"看起来像一份完整的
//! 结构化解答"，不衡量正确性。

/// 低于此字符数直接判 0 分
const MIN_SOLUTION_CHARS: usize = 100;
/// 长解答加分阈值
const LONG_SOLUTION_CHARS: usize = 500;
/// 每个信号的加分幅度
const SIGNAL_BONUS: f64 = 0.1;

/// 给解答文本打分，结果始终落在 [0, 1]
///
/// 空文本或过短为 0；否则从 0.5 起步，对以下信号各加 0.1：
/// 分步语言、结论语言、结构强调标记、超长文本、公式语言。
pub fn score(solution: &str) -> f64 {
    let char_count = solution.chars().count();
    if char_count < MIN_SOLUTION_CHARS {
        return 0.0;
    }

    let mut score = 0.5;

    if solution.contains("Adım") || solution.contains("adım") {
        score += SIGNAL_BONUS;
    }
    if solution.contains("Sonuç") || solution.contains("sonuç") {
        score += SIGNAL_BONUS;
    }
    if solution.contains("**") || solution.contains("##") {
        score += SIGNAL_BONUS;
    }
    if char_count > LONG_SOLUTION_CHARS {
        score += SIGNAL_BONUS;
    }
    if solution.contains("Formül") || solution.contains("formül") {
        score += SIGNAL_BONUS;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_short_score_zero() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("kısa cevap"), 0.0);
        assert_eq!(score(&"a".repeat(MIN_SOLUTION_CHARS - 1)), 0.0);
    }

    #[test]
    fn test_baseline_without_signals() {
        let plain = "q".repeat(200);
        assert_eq!(score(&plain), 0.5);
    }

    #[test]
    fn test_monotone_in_signals() {
        // 信号逐个叠加，得分单调不减
        let filler = "q".repeat(200);
        let mut solution = filler.clone();
        let mut last = score(&solution);

        for signal in ["Adım", "Sonuç", "**", "Formül"] {
            solution.push_str(signal);
            let current = score(&solution);
            assert!(current >= last, "sinyal {signal} puanı düşürdü");
            last = current;
        }

        // 超长信号
        solution.push_str(&"q".repeat(600));
        assert!(score(&solution) >= last);
    }

    #[test]
    fn test_score_is_clamped_to_one() {
        let solution = format!(
            "## Adım adım çözüm **kalın** Sonuç: 42, Formül: E=mc^2 {}",
            "detay ".repeat(200)
        );
        let value = score(&solution);
        assert!(value <= 1.0);
        assert!(value >= 0.9);
    }

    #[test]
    fn test_all_scores_in_range() {
        for text in ["", "orta", &"Adım Sonuç ** Formül ".repeat(100)] {
            let value = score(text);
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
