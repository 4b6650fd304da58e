use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// LLM provider configuration for AI-ranked search
    pub llm: LlmConfig,
    /// Timeout for a single ranking call, seconds (capped at 30)
    pub rank_timeout_secs: u64,
    /// Bearer token required on mutating routes. When unset, those routes
    /// reject every request.
    pub api_token: Option<String>,
    /// Skip demo-data seeding at startup
    pub skip_seed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "ollama" or "openai"
    pub provider: String,
    /// Base URL for the LLM API
    pub base_url: String,
    /// Model name used for ranking
    pub chat_model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9100".to_string(),
            llm: LlmConfig::default(),
            rank_timeout_secs: 20,
            api_token: None,
            skip_seed: false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
            chat_model: "llama3.2".to_string(),
            api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("TOOL_CATALOG_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(provider) = std::env::var("LLM_PROVIDER") {
            config.llm.provider = provider;
        }
        if let Ok(url) = std::env::var("LLM_BASE_URL") {
            config.llm.base_url = url;
        }
        if let Ok(model) = std::env::var("LLM_CHAT_MODEL") {
            config.llm.chat_model = model;
        }
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            config.llm.api_key = Some(key);
        }
        if let Ok(val) = std::env::var("TOOL_CATALOG_RANK_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.rank_timeout_secs = v.min(30); // Cap at 30s
            }
        }
        if let Ok(token) = std::env::var("TOOL_CATALOG_API_TOKEN") {
            config.api_token = Some(token);
        }
        if let Ok(val) = std::env::var("TOOL_CATALOG_SKIP_SEED") {
            config.skip_seed = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }
}
