//! Google Gemini 适配器
//!
//! REST `generateContent` 调用，图片以 `inline_data` 字段内联。

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::provider::Provider;
use crate::services::providers::{encode_image, EMPTY_SOLUTION_FALLBACK};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// 调用 Gemini 解题
pub async fn solve(
    http: &reqwest::Client,
    api_key: &str,
    model: &str,
    image: &[u8],
    mime_type: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    debug!("调用 Gemini API，模型: {}", model);

    let url = format!("{API_BASE}/{model}:generateContent?key={api_key}");
    let body = json!({
        "contents": [{
            "parts": [
                { "text": prompt },
                {
                    "inline_data": {
                        "mime_type": mime_type,
                        "data": encode_image(image),
                    }
                }
            ]
        }]
    });

    let response = http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| ProviderError::backend(Provider::Gemini, e))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        warn!("Gemini API 返回错误状态: {}", status);
        return Err(ProviderError::Backend {
            provider: Provider::Gemini,
            message: format!("HTTP {status}: {detail}"),
        });
    }

    let payload: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::backend(Provider::Gemini, e))?;

    let text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or(EMPTY_SOLUTION_FALLBACK)
        .to_string();

    debug!("Gemini API 调用成功，响应 {} 字符", text.chars().count());
    Ok(text)
}
