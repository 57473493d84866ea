//! 日志工具模块
//!
//! 提供日志初始化和输出格式化的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::models::provider::Provider;

/// 初始化日志
///
/// 默认 info 级别，可通过 `RUST_LOG` 环境变量覆盖。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `enabled`: 已启用的后端列表
pub fn log_startup(enabled: &[Provider]) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 拍照解题编排服务");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if enabled.is_empty() {
        info!("⚠️ 没有任何已启用的 AI 后端，将以演示模式运行");
    } else {
        info!("📊 已启用后端 ({} 个):", enabled.len());
        for provider in enabled {
            info!("  ✓ {}", provider.display_name());
        }
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志和提示词摘要
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("kısa", 10), "kısa");
        assert_eq!(truncate_text("abcdefgh", 5), "abcde...");
        // 按字符截断，不能切坏多字节字符
        assert_eq!(truncate_text("çözüm adımı", 5), "çözüm...");
    }
}
