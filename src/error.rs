//! 错误类型定义
//!
//! 适配器层的错误分类：
//! - `Unavailable` - 后端凭证/配置缺失
//! - `Timeout` - 调用超过该后端配置的时限
//! - `Backend` - 传输失败或后端返回了不可用的载荷
//! - `NoneConfigured` - 启动时没有任何可用后端
//!
//! 注意：这些错误从不越过编排层边界。编排层将其转写为
//! `ModelResponse.error` 字段返回给调用方，调用方自行决定
//! 如何向用户呈现（例如降级为演示模式）。

use std::time::Duration;

use thiserror::Error;

use crate::models::provider::Provider;

/// 适配器调用错误
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 后端凭证缺失，调用前即可判定
    #[error("{provider} API yapılandırılmamış")]
    Unavailable { provider: Provider },

    /// 调用超过该后端配置的时限
    #[error("{provider} isteği zaman aşımına uğradı ({timeout:?})")]
    Timeout { provider: Provider, timeout: Duration },

    /// 传输失败、HTTP 错误或后端返回了不可用的载荷
    #[error("{provider} API hatası: {message}")]
    Backend { provider: Provider, message: String },

    /// 没有任何已启用的后端
    #[error("yapılandırılmış AI sağlayıcısı yok")]
    NoneConfigured,
}

impl ProviderError {
    /// 包装后端传输错误
    pub fn backend(provider: Provider, source: impl std::fmt::Display) -> Self {
        ProviderError::Backend {
            provider,
            message: source.to_string(),
        }
    }
}
