//! 多后端解题编排服务
//!
//! 每次 `solve` 调用走固定的五个阶段：
//! 缓存检查 → 分发策略 → 结果聚合 → 缓存写回 → 返回
//!
//! 分发策略三选一：
//! 1. **指定单后端**：请求点名且未要求多后端比较，只调那一个，
//!    结果不论置信度直接返回
//! 2. **全后端并发**：要求多后端比较时，所有已启用后端同时调用
//! 3. **自动选择**：其余情况，按优先级串行尝试，必要时并发兜底
//!
//! 适配器的一切失败都落在 `ModelResponse.error` 里返回，
//! 本服务从不因"所有后端都失败"而报错——空列表/全失败列表
//! 如何呈现是调用方的责任。

use std::time::{Duration, Instant};

use async_openai::{config::OpenAIConfig, Client};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::provider::{ModelResponse, Provider, ProviderConfig};
use crate::models::request::SolveRequest;
use crate::orchestrator::dispatch;
use crate::services::cache::{self, CacheStats, ResponseCache};
use crate::services::providers::{claude, gemini, gpt, ollama};
use crate::services::{confidence, enrichment, prompt};

/// 缓存命中时合成响应的置信度
const CACHE_HIT_CONFIDENCE: f64 = 0.95;
/// 缓存命中时合成响应的耗时标记
const CACHE_HIT_LATENCY: Duration = Duration::from_millis(10);

/// 多后端解题编排服务
pub struct McpService {
    config: Config,
    /// 已启用后端的静态描述，按优先级升序
    providers: Vec<ProviderConfig>,
    cache: ResponseCache,
    http: reqwest::Client,
    openai: Option<Client<OpenAIConfig>>,
}

impl McpService {
    /// 从显式配置构造
    ///
    /// 只为凭证/开关齐备的后端建立 `ProviderConfig`；
    /// 缺配置的后端静默禁用，不会导致构造失败。
    pub fn new(config: Config) -> Self {
        let mut providers = Vec::new();

        if config.gemini_api_key.is_some() {
            providers.push(ProviderConfig::for_provider(Provider::Gemini));
        }
        if config.anthropic_api_key.is_some() {
            providers.push(ProviderConfig::for_provider(Provider::Claude));
        }
        if config.openai_api_key.is_some() {
            providers.push(ProviderConfig::for_provider(Provider::Gpt));
        }
        if config.ollama_enabled {
            providers.push(ProviderConfig::for_provider(Provider::Ollama));
        }
        providers.sort_by_key(|c| c.priority);

        for cfg in &providers {
            debug!(
                "后端已启用: {} (优先级 {}, 超时 {:?}, 重试预算 {})",
                cfg.provider, cfg.priority, cfg.timeout, cfg.max_retries
            );
        }

        let openai = config.openai_api_key.as_ref().map(|key| {
            let mut openai_config = OpenAIConfig::new().with_api_key(key);
            if let Some(base) = &config.openai_api_base {
                openai_config = openai_config.with_api_base(base);
            }
            Client::with_config(openai_config)
        });

        let cache = ResponseCache::new(
            config.cache_capacity,
            Duration::from_secs(config.cache_ttl_hours * 3600),
        );

        Self {
            config,
            providers,
            cache,
            http: reqwest::Client::new(),
            openai,
        }
    }

    /// 解题主入口
    pub async fn solve(&self, request: &SolveRequest) -> Vec<ModelResponse> {
        let cache_key = self.cache_key(request);

        // 阶段一：缓存检查（多后端比较模式不走缓存）
        if !request.require_multiple && self.config.cache_enabled {
            if let Some(solution) = self.cache.get(&cache_key) {
                info!("✓ 缓存命中，跳过所有后端调用");
                let provider = request.forced_provider().unwrap_or(Provider::Gemini);
                return vec![ModelResponse::success(
                    provider,
                    solution,
                    CACHE_HIT_CONFIDENCE,
                    CACHE_HIT_LATENCY,
                )];
            }
        }

        // 阶段二：分发
        let invoke = |provider| self.solve_with_provider(provider, request);
        let mut responses = match request.forced_provider() {
            Some(provider) if !request.require_multiple => {
                info!("指定后端模式: {}", provider);
                vec![self.solve_with_provider(provider, request).await]
            }
            _ if request.require_multiple => {
                info!("多后端比较模式 ({} 个后端)", self.providers.len());
                dispatch::fan_out_all(&self.providers, &invoke).await
            }
            _ => {
                info!("自动选择模式");
                dispatch::auto_select(&self.providers, &invoke).await
            }
        };

        // 阶段三：附加信息提取（尽力而为，失败即缺省）
        self.enrich_responses(request, &mut responses);

        // 阶段四：缓存写回（只回写最优的可用结果）
        if let Some(top) = responses.first() {
            if top.is_usable() && self.config.cache_enabled {
                self.cache.put(&cache_key, &top.solution, top.provider);
            }
        } else {
            warn!("所有后端均未给出结果");
        }

        responses
    }

    /// 调用单个后端并把一切失败转写为数据
    async fn solve_with_provider(
        &self,
        provider: Provider,
        request: &SolveRequest,
    ) -> ModelResponse {
        let start = Instant::now();

        match self.invoke_adapter(provider, request).await {
            Ok(solution) => {
                let score = confidence::score(&solution);
                ModelResponse::success(provider, solution, score, start.elapsed())
            }
            Err(e) => {
                warn!("后端 {} 调用失败: {}", provider, e);
                ModelResponse::failure(provider, e.to_string(), start.elapsed())
            }
        }
    }

    /// 按后端分发到对应适配器，统一施加超时
    async fn invoke_adapter(
        &self,
        provider: Provider,
        request: &SolveRequest,
    ) -> Result<String, ProviderError> {
        let cfg = self
            .provider_config(provider)
            .ok_or(ProviderError::Unavailable { provider })?;

        let prompt_text = prompt::build_prompt(request, provider, &cfg.capabilities);

        let call = async {
            match provider {
                Provider::Gemini => {
                    let api_key = self
                        .config
                        .gemini_api_key
                        .as_deref()
                        .ok_or(ProviderError::Unavailable { provider })?;
                    gemini::solve(
                        &self.http,
                        api_key,
                        &self.config.gemini_model,
                        &request.image,
                        &request.mime_type,
                        &prompt_text,
                    )
                    .await
                }
                Provider::Claude => {
                    let api_key = self
                        .config
                        .anthropic_api_key
                        .as_deref()
                        .ok_or(ProviderError::Unavailable { provider })?;
                    claude::solve(
                        &self.http,
                        api_key,
                        &self.config.claude_model,
                        &request.image,
                        &request.mime_type,
                        &prompt_text,
                    )
                    .await
                }
                Provider::Gpt => {
                    let client = self
                        .openai
                        .as_ref()
                        .ok_or(ProviderError::Unavailable { provider })?;
                    gpt::solve(
                        client,
                        &self.config.gpt_model,
                        &request.image,
                        &request.mime_type,
                        &prompt_text,
                    )
                    .await
                }
                Provider::Ollama => {
                    ollama::solve(
                        &self.http,
                        &self.config.ollama_host,
                        &self.config.ollama_fallback_model,
                        &request.image,
                        &prompt_text,
                    )
                    .await
                }
                Provider::Auto => Err(ProviderError::Backend {
                    provider,
                    message: "desteklenmeyen sağlayıcı: auto".to_string(),
                }),
            }
        };

        with_deadline(provider, cfg.timeout, call).await
    }

    /// 请求了附加信息时，从成功解答中尽力提取对应字段
    fn enrich_responses(&self, request: &SolveRequest, responses: &mut [ModelResponse]) {
        for response in responses.iter_mut() {
            if !response.is_usable() {
                continue;
            }
            if request.require_difficulty {
                response.difficulty = enrichment::extract_difficulty(&response.solution);
            }
            if request.require_similar {
                response.similar_questions =
                    enrichment::extract_similar_questions(&response.solution);
            }
            if request.require_topic_review {
                response.topic_review = enrichment::extract_topic_review(&response.solution);
            }
        }
    }

    /// 计算本次请求的缓存指纹
    ///
    /// 判别串：聊天/自动解题模式标签 + 科目 + 考试层级。
    fn cache_key(&self, request: &SolveRequest) -> String {
        let mode = if request.is_chat_mode() {
            "chat"
        } else {
            "auto-solve"
        };
        let subject = request.subject.map(|s| s.name()).unwrap_or("genel");
        let tier = request.exam_tier.map(|t| t.name()).unwrap_or("bilinmiyor");
        cache::fingerprint(&request.image, &[mode, subject, tier])
    }

    fn provider_config(&self, provider: Provider) -> Option<&ProviderConfig> {
        self.providers.iter().find(|c| c.provider == provider)
    }

    /// 各后端当前是否可用（只读查询，供调用方置灰不可选项）
    pub fn model_status(&self) -> Vec<(Provider, bool)> {
        let mut status: Vec<(Provider, bool)> = Provider::BACKENDS
            .iter()
            .map(|p| (*p, self.provider_config(*p).is_some()))
            .collect();
        status.push((Provider::Auto, true));
        status
    }

    /// 已启用的后端列表（按优先级升序）
    pub fn enabled_providers(&self) -> Vec<Provider> {
        self.providers.iter().map(|c| c.provider).collect()
    }

    /// 确认至少有一个可用后端
    ///
    /// 零后端时返回 [`ProviderError::NoneConfigured`]，调用方
    /// 据此降级为演示模式。
    pub fn ensure_configured(&self) -> Result<(), ProviderError> {
        if self.providers.is_empty() {
            return Err(ProviderError::NoneConfigured);
        }
        Ok(())
    }

    /// 缓存统计快照
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// 清理过期缓存条目，返回删除数量（周期性维护用）
    pub fn purge_expired_cache(&self) -> usize {
        self.cache.purge_expired()
    }

    #[cfg(test)]
    pub(crate) fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

/// 给适配器调用套上截止时间
///
/// 超时被折算成 [`ProviderError::Timeout`]，让它和其他适配器错误
/// 走同一条"错误即数据"处理链。
async fn with_deadline<F>(
    provider: Provider,
    deadline: Duration,
    call: F,
) -> Result<String, ProviderError>
where
    F: std::future::Future<Output = Result<String, ProviderError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout {
            provider,
            timeout: deadline,
        }),
    }
}
