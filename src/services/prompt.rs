//! 提示词构建 - 业务能力层
//!
//! 纯函数，无状态。两种请求形态：
//! - 自动解题：识别考点、推断考试层级与难度、分步求解、讲解，
//!   固定六段输出模板（考点 / 层级 / 难度 / 步骤 / 结果 / 提示）
//! - 聊天追问：嵌入用户追问 + 最近三轮历史的有界摘要，
//!   既保持连续性又不让上下文无限增长
//!
//! 附加指令块（难度评估 / 相似题 / 知识点复习）互相独立，
//! 只在请求且后端支持时追加；后端风格后缀最后追加。

use crate::models::provider::{Provider, ProviderCapabilities};
use crate::models::request::{ChatRole, SolveRequest};
use crate::models::subject::ExamTier;
use crate::utils::truncate_text;

/// 聊天摘要保留的历史轮数
const CHAT_CONTEXT_TURNS: usize = 3;
/// 每轮历史截断的字符预算
const CHAT_TURN_BUDGET: usize = 120;

/// 构建完整提示词
pub fn build_prompt(
    request: &SolveRequest,
    provider: Provider,
    capabilities: &ProviderCapabilities,
) -> String {
    let mut prompt = if request.is_chat_mode() {
        chat_prompt(request)
    } else {
        auto_solve_prompt(request)
    };

    if request.require_difficulty && capabilities.difficulty_estimation {
        prompt.push_str(DIFFICULTY_BLOCK);
    }
    // 相似题与知识点复习只对首次解题有意义，追问时不生成
    if !request.is_chat_mode() {
        if request.require_similar && capabilities.similar_questions {
            prompt.push_str(SIMILAR_BLOCK);
        }
        if request.require_topic_review && capabilities.topic_review {
            prompt.push_str(TOPIC_REVIEW_BLOCK);
        }
    }

    prompt.push_str(style_suffix(provider));
    prompt
}

/// 自动解题提示词
///
/// 有科目/层级元数据时以专科教师口吻开场，否则让模型自行识别。
fn auto_solve_prompt(request: &SolveRequest) -> String {
    let role_line = match (request.subject, request.exam_tier) {
        (Some(subject), Some(tier)) => format!(
            "Sen uzman bir {tier} {subject} öğretmenisin. Görseldeki {tier} {subject} sorusunu çöz.",
            tier = tier.name(),
            subject = subject.name(),
        ),
        (Some(subject), None) => format!(
            "Sen uzman bir {subject} öğretmenisin. Görseldeki {subject} sorusunu çöz.",
            subject = subject.name(),
        ),
        _ => "Sen uzman bir öğretmensin. Görseldeki sınav sorusunu çöz.".to_string(),
    };

    let guidance = match request.exam_tier {
        Some(ExamTier::Ayt) => {
            "Çözümde şunlara dikkat et:\n\
             1. AYT seviyesine uygun ileri düzey analiz yap\n\
             2. Detaylı ve kapsamlı açıkla\n\
             3. Farklı çözüm yöntemlerini göster\n\
             4. Konunun diğer konularla ilişkisini kur\n\
             5. Üniversite sınavı odaklı stratejiler sun"
        }
        _ => {
            "Çözümde şunlara dikkat et:\n\
             1. Sorunun seviyesine uygun temel kavramları kullan\n\
             2. Adım adım, anlaşılır şekilde açıkla\n\
             3. Gereksiz detaylara girme\n\
             4. Pratik çözüm yöntemlerini göster\n\
             5. Benzer soru tipleri için ipuçları ver"
        }
    };

    format!(
        "{role_line}\n\n\
         Önce sorunun konusunu belirle, sınav türünü (TYT/AYT) ve zorluk seviyesini tahmin et, \
         sonra soruyu adım adım çöz ve açıkla.\n\n\
         {guidance}\n\n\
         Çözümü şu formatta sun:\n\
         📚 **Konu**\n\
         🎯 **Sınav Türü**\n\
         📊 **Zorluk**\n\
         🔄 **Çözüm Adımları**\n\
         ✅ **Sonuç**\n\
         💡 **İpuçları**\n\n\
         Türkçe olarak cevap ver ve açıklamalarını mümkün olduğunca detaylı yap."
    )
}

/// 聊天追问提示词
///
/// 只嵌入最近 [`CHAT_CONTEXT_TURNS`] 轮历史，每轮截断到
/// [`CHAT_TURN_BUDGET`] 字符。
fn chat_prompt(request: &SolveRequest) -> String {
    let message = request.user_message.as_deref().unwrap_or_default();

    let recent_start = request.chat_context.len().saturating_sub(CHAT_CONTEXT_TURNS);
    let summary: Vec<String> = request.chat_context[recent_start..]
        .iter()
        .map(|turn| {
            let role = match turn.role {
                ChatRole::User => "Öğrenci",
                ChatRole::Assistant => "Öğretmen",
            };
            format!("- {}: {}", role, truncate_text(&turn.text, CHAT_TURN_BUDGET))
        })
        .collect();

    format!(
        "Görseldeki soru hakkında bir öğrenciyle konuşuyorsun.\n\n\
         Önceki konuşmanın özeti:\n{summary}\n\n\
         Öğrencinin takip sorusu: {message}\n\n\
         Önceki çözümün bağlamını koruyarak soruyu yanıtla. Türkçe cevap ver.",
        summary = summary.join("\n"),
    )
}

/// 难度评估指令块
const DIFFICULTY_BLOCK: &str = "\n\n📊 **Zorluk Seviyesi** bölümü ekle: \
    Kolay, Orta, Zor veya Çok Zor etiketlerinden birini seç. \
    Gereken bilgi derinliği, çözüm adımı sayısı ve öğrencilerin bu tür sorulardaki \
    tarihsel başarı oranı açısından gerekçelendir. \
    \"Zorluk: <etiket>\" satırını mutlaka yaz.";

/// 相似题指令块
const SIMILAR_BLOCK: &str = "\n\n🔄 **Benzer Sorular** bölümü ekle: \
    tam üç örnek soru yaz. Her biri için ayrı satırlarda \
    \"Soru:\", \"Konu:\" ve \"Zorluk:\" bilgilerini ver.";

/// 知识点复习指令块
const TOPIC_REVIEW_BLOCK: &str = "\n\n📖 **Konu Tekrarı** bölümü ekle: \
    \"Ana Konu:\" satırı, \"Alt Konular:\" başlığı altında madde listesi, \
    \"Kaynaklar:\" başlığı altında önerilen kaynaklar ve \
    \"Çalışma Önerisi:\" satırı ile pratik tavsiyesi ver.";

/// 各后端的风格后缀
///
/// 未知/自动选择时为空串。
fn style_suffix(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => "\n\nGörsel analiz ve hızlı çözüm odaklı yaklaş.",
        Provider::Claude => "\n\nDetaylı mantıksal açıklamalar ve adım adım analiz yap.",
        Provider::Gpt => "\n\nYaratıcı çözüm yöntemleri ve alternatif yaklaşımlar sun.",
        Provider::Ollama => "\n\nTemel kavramlara odaklan ve basit açıklamalar kullan.",
        Provider::Auto => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::provider::ProviderConfig;
    use crate::models::request::ChatTurn;
    use crate::models::subject::Subject;

    fn caps(provider: Provider) -> ProviderCapabilities {
        ProviderConfig::for_provider(provider).capabilities
    }

    fn base_request() -> SolveRequest {
        SolveRequest::new(vec![0u8; 16], "image/jpeg")
    }

    #[test]
    fn test_auto_solve_prompt_with_metadata() {
        let mut request = base_request();
        request.subject = Some(Subject::Matematik);
        request.exam_tier = Some(ExamTier::Tyt);

        let prompt = build_prompt(&request, Provider::Gemini, &caps(Provider::Gemini));
        assert!(prompt.contains("TYT Matematik"));
        assert!(prompt.contains("Çözüm Adımları"));
        assert!(prompt.contains("Sonuç"));
        // 风格后缀在最后
        assert!(prompt.ends_with("Görsel analiz ve hızlı çözüm odaklı yaklaş."));
    }

    #[test]
    fn test_auto_solve_prompt_without_metadata_asks_identification() {
        let prompt = build_prompt(&base_request(), Provider::Auto, &caps(Provider::Gemini));
        assert!(prompt.contains("konusunu belirle"));
        assert!(prompt.contains("zorluk seviyesini tahmin et"));
        // Auto 没有风格后缀
        assert!(prompt.ends_with("detaylı yap."));
    }

    #[test]
    fn test_extras_are_independent_blocks() {
        let mut request = base_request();
        let capabilities = caps(Provider::Claude);

        let plain = build_prompt(&request, Provider::Claude, &capabilities);
        assert!(!plain.contains("Zorluk Seviyesi"));
        assert!(!plain.contains("Benzer Sorular"));
        assert!(!plain.contains("Konu Tekrarı"));

        request.require_difficulty = true;
        let with_difficulty = build_prompt(&request, Provider::Claude, &capabilities);
        assert!(with_difficulty.contains("Zorluk Seviyesi"));
        assert!(!with_difficulty.contains("Benzer Sorular"));

        request.require_similar = true;
        request.require_topic_review = true;
        let with_all = build_prompt(&request, Provider::Claude, &capabilities);
        assert!(with_all.contains("Benzer Sorular"));
        assert!(with_all.contains("Konu Tekrarı"));
    }

    #[test]
    fn test_capabilities_gate_extras() {
        let mut request = base_request();
        request.require_similar = true;
        request.require_topic_review = true;

        // Ollama 不支持相似题与知识点复习
        let prompt = build_prompt(&request, Provider::Ollama, &caps(Provider::Ollama));
        assert!(!prompt.contains("Benzer Sorular"));
        assert!(!prompt.contains("Konu Tekrarı"));
    }

    #[test]
    fn test_chat_prompt_keeps_last_three_turns_truncated() {
        let mut request = base_request();
        request.user_message = Some("Peki ikinci adım neden doğru?".to_string());
        for i in 0..5 {
            request.chat_context.push(ChatTurn {
                role: ChatRole::User,
                text: format!("tur-{i} {}", "x".repeat(300)),
            });
        }

        let prompt = build_prompt(&request, Provider::Gemini, &caps(Provider::Gemini));
        // 只保留最近三轮
        assert!(!prompt.contains("tur-0"));
        assert!(!prompt.contains("tur-1"));
        assert!(prompt.contains("tur-2"));
        assert!(prompt.contains("tur-4"));
        // 每轮被截断
        assert!(!prompt.contains(&"x".repeat(300)));
        assert!(prompt.contains("..."));
        assert!(prompt.contains("Peki ikinci adım neden doğru?"));
    }

    #[test]
    fn test_chat_mode_skips_similar_and_review_blocks() {
        let mut request = base_request();
        request.user_message = Some("Neden?".to_string());
        request.chat_context.push(ChatTurn {
            role: ChatRole::Assistant,
            text: "Çözüm şöyle".to_string(),
        });
        request.require_similar = true;
        request.require_topic_review = true;
        request.require_difficulty = true;

        let prompt = build_prompt(&request, Provider::Claude, &caps(Provider::Claude));
        assert!(!prompt.contains("Benzer Sorular"));
        assert!(!prompt.contains("Konu Tekrarı"));
        // 难度评估在追问时仍然有意义
        assert!(prompt.contains("Zorluk Seviyesi"));
    }
}
