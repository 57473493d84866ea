//! 分发策略
//!
//! 策略函数对"如何调用一个后端"保持泛型（传入一个返回
//! [`ModelResponse`] 的异步闭包），编排服务注入真实适配器，
//! 测试注入假后端。传入的后端列表必须已按优先级升序排好。
//!
//! - 全后端并发：所有后端同时调用，等全部结束（成功失败都收），
//!   一个失败不取消兄弟调用；过滤低置信度结果；输出顺序跟随
//!   优先级而不是完成顺序
//! - 自动选择：按优先级逐个串行尝试，第一个高置信且无错误的
//!   结果立即返回；全部不合格时退回全后端并发，只取其最优一条

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, info};

use crate::models::provider::{ModelResponse, Provider, ProviderConfig};

/// 自动选择模式的采纳阈值
pub const HIGH_CONFIDENCE: f64 = 0.7;
/// 并发模式的过滤阈值
pub const LOW_CONFIDENCE: f64 = 0.3;

/// 全后端并发
pub async fn fan_out_all<F, Fut>(providers: &[ProviderConfig], invoke: &F) -> Vec<ModelResponse>
where
    F: Fn(Provider) -> Fut,
    Fut: Future<Output = ModelResponse>,
{
    debug!("并发调用 {} 个后端", providers.len());

    let calls: Vec<Fut> = providers.iter().map(|cfg| invoke(cfg.provider)).collect();
    // join_all 保持输入顺序，即优先级顺序
    let mut responses = join_all(calls).await;

    responses.retain(|r| r.confidence > LOW_CONFIDENCE);
    responses
}

/// 自动选择 + 兜底
pub async fn auto_select<F, Fut>(providers: &[ProviderConfig], invoke: &F) -> Vec<ModelResponse>
where
    F: Fn(Provider) -> Fut,
    Fut: Future<Output = ModelResponse>,
{
    for cfg in providers {
        debug!("自动选择尝试后端: {}", cfg.provider);
        let response = invoke(cfg.provider).await;

        if response.confidence > HIGH_CONFIDENCE && response.error.is_none() {
            info!(
                "✓ {} 给出高置信解答 ({:.2})",
                cfg.provider, response.confidence
            );
            return vec![response];
        }
        debug!(
            "后端 {} 不合格 (置信 {:.2}, 错误: {:?})，尝试下一个",
            cfg.provider, response.confidence, response.error
        );
    }

    // 全部不合格：退回并发模式，只取最优一条
    info!("自动选择全部不合格，退回并发兜底");
    let mut responses = fan_out_all(providers, invoke).await;
    responses.truncate(1);
    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn priority_sorted(providers: &[Provider]) -> Vec<ProviderConfig> {
        let mut configs: Vec<ProviderConfig> = providers
            .iter()
            .map(|p| ProviderConfig::for_provider(*p))
            .collect();
        configs.sort_by_key(|c| c.priority);
        configs
    }

    fn ok_response(provider: Provider, confidence: f64) -> ModelResponse {
        ModelResponse::success(
            provider,
            format!("{provider} çözümü"),
            confidence,
            Duration::from_millis(1),
        )
    }

    #[test]
    fn test_fan_out_filters_and_orders_by_priority() {
        // 三个后端：两个高于阈值，一个失败——失败者不出现，
        // 其余按优先级排序
        let providers = priority_sorted(&[Provider::Gpt, Provider::Gemini, Provider::Claude]);

        let responses = tokio_test::block_on(fan_out_all(&providers, &|p| async move {
            match p {
                Provider::Claude => {
                    ModelResponse::failure(p, "çöktü", Duration::from_millis(1))
                }
                _ => ok_response(p, 0.8),
            }
        }));

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].provider, Provider::Gemini);
        assert_eq!(responses[1].provider, Provider::Gpt);
    }

    #[test]
    fn test_fan_out_drops_low_confidence() {
        let providers = priority_sorted(&[Provider::Gemini, Provider::Claude]);

        let responses = tokio_test::block_on(fan_out_all(&providers, &|p| async move {
            ok_response(p, if p == Provider::Gemini { 0.3 } else { 0.31 })
        }));

        // 阈值是严格大于
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].provider, Provider::Claude);
    }

    #[test]
    fn test_auto_select_stops_at_first_qualified() {
        // 优先级 [1,2,3]：gemini 0.4，claude 0.8 → 返回 claude，
        // gpt 根本不被调用
        let providers = priority_sorted(&[Provider::Gemini, Provider::Claude, Provider::Gpt]);
        let invoked = Mutex::new(Vec::new());

        let responses = tokio_test::block_on(auto_select(&providers, &|p| {
            invoked.lock().unwrap().push(p);
            async move {
                match p {
                    Provider::Gemini => ok_response(p, 0.4),
                    Provider::Claude => ok_response(p, 0.8),
                    _ => panic!("gpt çağrılmamalıydı"),
                }
            }
        }));

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].provider, Provider::Claude);
        assert_eq!(
            *invoked.lock().unwrap(),
            vec![Provider::Gemini, Provider::Claude]
        );
    }

    #[test]
    fn test_auto_select_skips_errored_even_if_confident() {
        let providers = priority_sorted(&[Provider::Gemini, Provider::Claude]);

        let responses = tokio_test::block_on(auto_select(&providers, &|p| async move {
            match p {
                Provider::Gemini => ModelResponse {
                    error: Some("kota doldu".to_string()),
                    ..ok_response(p, 0.9)
                },
                _ => ok_response(p, 0.8),
            }
        }));

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].provider, Provider::Claude);
    }

    #[test]
    fn test_auto_select_falls_back_to_single_fan_out_result() {
        // 全部低于高置信阈值但高于过滤阈值：兜底只返回优先级最高的一条
        let providers = priority_sorted(&[Provider::Claude, Provider::Gemini]);

        let responses = tokio_test::block_on(auto_select(&providers, &|p| async move {
            ok_response(p, 0.5)
        }));

        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].provider, Provider::Gemini);
    }

    #[test]
    fn test_empty_provider_list_returns_empty() {
        let invoked = Mutex::new(0usize);
        let invoke = |p: Provider| {
            *invoked.lock().unwrap() += 1;
            async move { ok_response(p, 0.9) }
        };

        let responses = tokio_test::block_on(auto_select(&[], &invoke));
        assert!(responses.is_empty());
        assert_eq!(*invoked.lock().unwrap(), 0);
    }
}
