//! Anthropic Claude 适配器
//!
//! Messages API，鉴权用 `x-api-key` 头，图片以 base64 source 块内联。

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::provider::Provider;
use crate::services::providers::{encode_image, EMPTY_SOLUTION_FALLBACK};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 4096;

/// 调用 Claude 解题
pub async fn solve(
    http: &reqwest::Client,
    api_key: &str,
    model: &str,
    image: &[u8],
    mime_type: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    debug!("调用 Claude API，模型: {}", model);

    let body = json!({
        "model": model,
        "max_tokens": MAX_TOKENS,
        "messages": [{
            "role": "user",
            "content": [
                { "type": "text", "text": prompt },
                {
                    "type": "image",
                    "source": {
                        "type": "base64",
                        "media_type": mime_type,
                        "data": encode_image(image),
                    }
                }
            ]
        }]
    });

    let response = http
        .post(API_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", API_VERSION)
        .json(&body)
        .send()
        .await
        .map_err(|e| ProviderError::backend(Provider::Claude, e))?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        warn!("Claude API 返回错误状态: {}", status);
        return Err(ProviderError::Backend {
            provider: Provider::Claude,
            message: format!("HTTP {status}: {detail}"),
        });
    }

    let payload: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::backend(Provider::Claude, e))?;

    // content 数组的第一个块应当是 text 类型
    let text = payload["content"][0]["text"]
        .as_str()
        .unwrap_or(EMPTY_SOLUTION_FALLBACK)
        .to_string();

    debug!("Claude API 调用成功，响应 {} 字符", text.chars().count());
    Ok(text)
}
