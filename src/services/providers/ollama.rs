//! Ollama 本地后端适配器
//!
//! 与云端后端不同，本地安装了什么模型事先不可知：
//! 先查询 `/api/tags` 拿到已安装模型列表，优先选视觉模型
//! （llava 系列）；没有视觉模型时退化为纯文本作答，并在
//! 提示词里声明无法解读图片内容。

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::provider::Provider;
use crate::services::providers::{encode_image, EMPTY_SOLUTION_FALLBACK};

/// 纯文本模型的提示词补充声明
const NO_VISION_DISCLAIMER: &str = "\n\nNot: Bu bir görsel soru çözümü isteğidir. \
    Görsel içeriği analiz edemediğim için genel bir yaklaşım sunacağım.";

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<InstalledModel>,
}

#[derive(Debug, Deserialize)]
struct InstalledModel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// 调用本地 Ollama 解题
pub async fn solve(
    http: &reqwest::Client,
    host: &str,
    fallback_model: &str,
    image: &[u8],
    prompt: &str,
) -> Result<String, ProviderError> {
    let installed = list_installed_models(http, host).await?;
    let (model, is_vision) = choose_model(&installed, fallback_model);
    debug!("Ollama 选用模型: {} (视觉: {})", model, is_vision);

    let mut body = json!({
        "model": model,
        "prompt": prompt,
        "stream": false,
    });

    if is_vision {
        body["images"] = json!([encode_image(image)]);
    } else {
        let augmented = format!("{prompt}{NO_VISION_DISCLAIMER}");
        body["prompt"] = json!(augmented);
    }

    let response = http
        .post(format!("{host}/api/generate"))
        .json(&body)
        .send()
        .await
        .map_err(|e| ProviderError::backend(Provider::Ollama, e))?;

    let status = response.status();
    if !status.is_success() {
        warn!("Ollama API 返回错误状态: {}", status);
        return Err(ProviderError::Backend {
            provider: Provider::Ollama,
            message: format!("Ollama API hatası: HTTP {status}"),
        });
    }

    let payload: GenerateResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::backend(Provider::Ollama, e))?;

    if payload.response.is_empty() {
        return Ok(EMPTY_SOLUTION_FALLBACK.to_string());
    }
    Ok(payload.response)
}

/// 查询本地已安装的模型列表
async fn list_installed_models(
    http: &reqwest::Client,
    host: &str,
) -> Result<Vec<String>, ProviderError> {
    let response = http
        .get(format!("{host}/api/tags"))
        .send()
        .await
        .map_err(|e| ProviderError::Backend {
            provider: Provider::Ollama,
            message: format!("Ollama bağlantısı başarısız: {e}"),
        })?;

    if !response.status().is_success() {
        return Err(ProviderError::Backend {
            provider: Provider::Ollama,
            message: format!("Ollama bağlantısı başarısız: HTTP {}", response.status()),
        });
    }

    let tags: TagsResponse = response
        .json()
        .await
        .map_err(|e| ProviderError::backend(Provider::Ollama, e))?;

    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

/// 选择要使用的模型
///
/// 优先级：`llava:latest` > `llava` > 任何已安装模型 > 兜底名称。
/// 返回 (模型名, 是否视觉模型)。
fn choose_model(installed: &[String], fallback: &str) -> (String, bool) {
    let name = if installed.iter().any(|m| m == "llava:latest") {
        "llava:latest".to_string()
    } else if installed.iter().any(|m| m == "llava") {
        "llava".to_string()
    } else if let Some(first) = installed.first() {
        first.clone()
    } else {
        fallback.to_string()
    };

    let is_vision = name.contains("llava");
    (name, is_vision)
}
