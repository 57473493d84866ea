//! 命令行入口
//!
//! 读取一张题目图片并调用编排服务解题。没有任何已启用后端时
//! 降级为演示模式，输出带明确标注的占位解答而不是直接失败。

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use exam_photo_solver::utils::logging;
use exam_photo_solver::{Config, McpService, Provider, SolveRequest};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let service = McpService::new(config);
    logging::log_startup(&service.enabled_providers());

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();
    let Some(image_path) = args.get(1) else {
        bail!("kullanım: exam_photo_solver <görsel-dosyası>");
    };

    let request = build_request(image_path)?;

    // 零后端时走演示模式（调用方责任，编排服务只提供检测）
    if let Err(e) = service.ensure_configured() {
        warn!("{}", e);
        println!("{}", demo_solution(&request));
        return Ok(());
    }

    let responses = service.solve(&request).await;

    if responses.is_empty() {
        warn!("没有任何后端给出结果");
        println!("Hiçbir sağlayıcıdan çözüm alınamadı. Lütfen tekrar deneyin.");
        return Ok(());
    }

    for response in &responses {
        println!("\n{}", "=".repeat(60));
        println!(
            "📌 {} (güven: {:.2}, süre: {} ms)",
            response.provider.display_name(),
            response.confidence,
            response.processing_time.as_millis()
        );
        println!("{}", "=".repeat(60));
        match &response.error {
            Some(error) => println!("❌ {error}"),
            None => println!("{}", response.solution),
        }
        if let Some(difficulty) = response.difficulty {
            println!("\n📊 Zorluk: {difficulty}");
        }
    }

    let stats = service.cache_stats();
    info!(
        "缓存状态: {}/{} 条目, 累计命中 {}",
        stats.size, stats.capacity, stats.total_hits
    );

    Ok(())
}

/// 从命令行参数和环境变量组装请求
fn build_request(image_path: &str) -> Result<SolveRequest> {
    let image = std::fs::read(image_path)
        .with_context(|| format!("görsel okunamadı: {image_path}"))?;

    let mime_type = guess_mime_type(image_path);
    let mut request = SolveRequest::new(image, mime_type);

    if let Ok(subject) = std::env::var("SUBJECT") {
        request.subject = subject.parse().ok();
    }
    if let Ok(tier) = std::env::var("EXAM_TIER") {
        request.exam_tier = tier.parse().ok();
    }
    if let Ok(provider) = std::env::var("PREFERRED_MODEL") {
        request.preferred_provider = provider.parse().ok();
    }
    request.require_multiple = std::env::var("MULTI_MODEL").map(|v| v == "true").unwrap_or(false);
    request.require_difficulty = std::env::var("DIFFICULTY").map(|v| v == "true").unwrap_or(false);
    request.require_similar = std::env::var("SIMILAR").map(|v| v == "true").unwrap_or(false);
    request.require_topic_review = std::env::var("TOPIC_REVIEW").map(|v| v == "true").unwrap_or(false);

    Ok(request)
}

/// 根据扩展名推断媒体类型
fn guess_mime_type(path: &str) -> &'static str {
    match Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// 演示模式的占位解答
///
/// 跟踪请求的聊天状态和附加项开关：聊天模式下回显用户问题，
/// 其余开关各追加一段占位区块（benzer sorular 与 konu tekrarı
/// 在聊天模式下不生成，与真实求解路径一致）。
fn demo_solution(request: &SolveRequest) -> String {
    let model_name = request
        .preferred_provider
        .unwrap_or(Provider::Auto)
        .display_name();
    let chat_mode = request.is_chat_mode();

    let mut solution = if chat_mode {
        let user_message = request.user_message.as_deref().unwrap_or_default();
        format!(
            "**💬 DEMO CHAT MODU**\n\n\
             📝 **Kullanıcı Sorusu:** {user_message}\n\n\
             🤖 **AI Yanıtı ({model_name}):**\n\
             Bu demo modda çalışıyor. Gerçek chat deneyimi için API anahtarı gerekli.\n\n\
             Sorunuzla ilgili demo yanıt: \"{user_message}\" sorusuna yönelik detaylı açıklama burada olacak.\n\n\
             **🔧 Kurulum:**\n\
             1. Bir API anahtarı alın (ör. Google AI Studio'dan ücretsiz Gemini anahtarı)\n\
             2. Ortam değişkeni olarak ekleyin: GEMINI_API_KEY=your_api_key_here"
        )
    } else {
        format!(
            "**🎯 DEMO MODU - OTOMATİK SORU ÇÖZÜMÜ**\n\n\
             ⚠️ **API Anahtarı Gerekli**\n\
             Gerçek çözümler için en az bir AI sağlayıcısının anahtarını ekleyin.\n\n\
             📚 **Model: {model_name}**\n\n\
             **🔧 Kurulum:**\n\
             1. Bir API anahtarı alın (ör. Google AI Studio'dan ücretsiz Gemini anahtarı)\n\
             2. Ortam değişkeni olarak ekleyin: GEMINI_API_KEY=your_api_key_here\n\n\
             **✨ Özellikler:**\n\
             - Çoklu model karşılaştırması\n\
             - Cache sistemi ile hızlı yanıt\n\
             - Fallback mekanizması\n\
             - Zorluk tahmini, benzer sorular ve konu tekrarı"
        )
    };

    if request.require_difficulty {
        solution.push_str(
            "\n\n**📊 Zorluk Seviyesi: Orta**\n\
             - Çözüm için temel bilgi yeterli\n\
             - 2-3 adımda çözülebilir\n\
             - Ortalama çözüm süresi: 3-5 dakika\n\
             - Başarı oranı: %65",
        );
    }

    if request.require_similar && !chat_mode {
        solution.push_str(
            "\n\n**🔄 Benzer Sorular:**\n\
             1. Soru: Demo benzer soru 1\n   \
             Konu: Otomatik algılanacak - Temel Kavramlar\n   \
             Zorluk: Kolay\n\n\
             2. Soru: Demo benzer soru 2\n   \
             Konu: Otomatik algılanacak - Orta Seviye\n   \
             Zorluk: Orta\n\n\
             3. Soru: Demo benzer soru 3\n   \
             Konu: Otomatik algılanacak - İleri Seviye\n   \
             Zorluk: Zor",
        );
    }

    if request.require_topic_review && !chat_mode {
        solution.push_str(
            "\n\n**📖 Konu Tekrarı:**\n\
             Ana Konu: Otomatik algılanacak\n\n\
             Alt Konular:\n\
             - Temel Tanımlar\n\
             - Formüller\n\
             - Uygulama Yöntemleri\n\n\
             Kaynaklar:\n\
             - MEB Ders Kitabı\n\
             - Online Video Dersler\n\
             - Soru Bankaları\n\n\
             Çalışma Önerileri:\n\
             1. Temel kavramları tekrar edin\n\
             2. Örnek soruları çözün\n\
             3. Konuyu pekiştirin",
        );
    }

    solution
}
