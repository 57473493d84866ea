//! OpenAI GPT 适配器
//!
//! 使用 `async-openai` crate 走 Vision API，图片以 data URI 形式
//! 作为消息的一个内容片段传入。兼容任何 OpenAI API 形式的端点。

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::models::provider::Provider;
use crate::services::providers::{encode_image, EMPTY_SOLUTION_FALLBACK};

const MAX_TOKENS: u32 = 4096;

/// 调用 GPT Vision 解题
pub async fn solve(
    client: &Client<OpenAIConfig>,
    model: &str,
    image: &[u8],
    mime_type: &str,
    prompt: &str,
) -> Result<String, ProviderError> {
    debug!("调用 GPT API，模型: {}", model);

    let data_uri = format!("data:{mime_type};base64,{}", encode_image(image));

    // 文本 + 图片两个内容片段
    let content_parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
        ChatCompletionRequestUserMessageContentPart::Text(
            ChatCompletionRequestMessageContentPartText {
                text: prompt.to_string(),
            },
        ),
        ChatCompletionRequestUserMessageContentPart::ImageUrl(
            ChatCompletionRequestMessageContentPartImage {
                image_url: ImageUrl {
                    url: data_uri,
                    detail: Some(ImageDetail::Auto),
                },
            },
        ),
    ];

    let user_message = ChatCompletionRequestUserMessageArgs::default()
        .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
        .build()
        .map_err(|e| ProviderError::backend(Provider::Gpt, e))?;

    let request = CreateChatCompletionRequestArgs::default()
        .model(model)
        .messages(vec![ChatCompletionRequestMessage::User(user_message)])
        .max_tokens(MAX_TOKENS)
        .build()
        .map_err(|e| ProviderError::backend(Provider::Gpt, e))?;

    let response = client.chat().create(request).await.map_err(|e| {
        warn!("GPT API 调用失败: {}", e);
        ProviderError::backend(Provider::Gpt, e)
    })?;

    let text = response
        .choices
        .first()
        .and_then(|choice| choice.message.content.clone())
        .unwrap_or_else(|| EMPTY_SOLUTION_FALLBACK.to_string());

    debug!("GPT API 调用成功，响应 {} 字符", text.chars().count());
    Ok(text.trim().to_string())
}
