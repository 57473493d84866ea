//! AI 后端适配器 - 业务能力层
//!
//! 每个后端一个模块，统一的能力是
//! `solve(图片, 媒体类型, 提示词) -> 解答文本`：
//!
//! - `gemini` - Google REST API，图片以 `inline_data` 内联
//! - `claude` - Anthropic Messages API，图片以 base64 source 块内联
//! - `gpt` - OpenAI 兼容端点（`async-openai`），图片以 data URI 传递
//! - `ollama` - 本地 HTTP 服务，先查询已安装模型再生成
//!
//! 适配器只报告错误（[`ProviderError`]），不掩盖错误；
//! 超时控制在编排层统一施加。

pub mod claude;
pub mod gemini;
pub mod gpt;
pub mod ollama;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// 后端生成不出内容时的统一占位文本
pub(crate) const EMPTY_SOLUTION_FALLBACK: &str = "Çözüm oluşturulamadı.";

/// 图片字节转 base64
pub(crate) fn encode_image(image: &[u8]) -> String {
    BASE64.encode(image)
}
