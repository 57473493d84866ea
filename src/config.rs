//! 程序配置
//!
//! 每个 AI 后端的凭证/开关从环境变量读入，缺失即视为该后端未启用，
//! 不会导致构造失败。所有配置显式传入 `McpService::new`，无全局状态。

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    // --- AI 后端凭证 ---
    /// Google Gemini API Key（`GEMINI_API_KEY`）
    pub gemini_api_key: Option<String>,
    /// Anthropic Claude API Key（`ANTHROPIC_API_KEY`）
    pub anthropic_api_key: Option<String>,
    /// OpenAI API Key（`OPENAI_API_KEY`）
    pub openai_api_key: Option<String>,
    /// OpenAI 兼容端点（`OPENAI_API_BASE`，可选）
    pub openai_api_base: Option<String>,
    /// 是否启用本地 Ollama 后端（`OLLAMA_ENABLED=true`）
    pub ollama_enabled: bool,
    /// Ollama 服务地址
    pub ollama_host: String,
    // --- 模型名称 ---
    pub gemini_model: String,
    pub claude_model: String,
    pub gpt_model: String,
    /// Ollama 本地没有任何已安装模型时的兜底名称
    pub ollama_fallback_model: String,
    // --- 缓存配置 ---
    /// 缓存开关（`CACHE_ENABLED=false` 可关闭）
    pub cache_enabled: bool,
    /// 缓存最大条目数
    pub cache_capacity: usize,
    /// 缓存条目存活时长（小时）
    pub cache_ttl_hours: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            anthropic_api_key: None,
            openai_api_key: None,
            openai_api_base: None,
            ollama_enabled: false,
            ollama_host: "http://127.0.0.1:11434".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            claude_model: "claude-3-5-sonnet-20241022".to_string(),
            gpt_model: "gpt-4-vision-preview".to_string(),
            ollama_fallback_model: "phi4-mini:latest".to_string(),
            cache_enabled: true,
            cache_capacity: 500,
            cache_ttl_hours: 12,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            gemini_api_key: read_credential("GEMINI_API_KEY"),
            anthropic_api_key: read_credential("ANTHROPIC_API_KEY"),
            openai_api_key: read_credential("OPENAI_API_KEY"),
            openai_api_base: read_credential("OPENAI_API_BASE"),
            ollama_enabled: std::env::var("OLLAMA_ENABLED").map(|v| v == "true").unwrap_or(default.ollama_enabled),
            ollama_host: std::env::var("OLLAMA_HOST").unwrap_or(default.ollama_host),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(default.gemini_model),
            claude_model: std::env::var("CLAUDE_MODEL").unwrap_or(default.claude_model),
            gpt_model: std::env::var("GPT_MODEL").unwrap_or(default.gpt_model),
            ollama_fallback_model: std::env::var("OLLAMA_FALLBACK_MODEL").unwrap_or(default.ollama_fallback_model),
            cache_enabled: std::env::var("CACHE_ENABLED").map(|v| v != "false").unwrap_or(default.cache_enabled),
            cache_capacity: std::env::var("CACHE_CAPACITY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cache_capacity),
            cache_ttl_hours: std::env::var("CACHE_TTL_HOURS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cache_ttl_hours),
        }
    }
}

/// 读取凭证类环境变量
///
/// 空字符串和模板占位符（`your_..._here`）都视为未配置。
fn read_credential(var_name: &str) -> Option<String> {
    std::env::var(var_name)
        .ok()
        .filter(|v| !v.is_empty() && !v.starts_with("your_"))
}
