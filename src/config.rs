use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EVALUATION_MODEL: &str = "gpt-4o-2024-08-06";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub evaluation_model: String,
    pub chat_model: String,
    pub timeout: Duration,
    pub http_referer: Option<String>,
    pub app_title: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);
        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0".to_string());

        Self {
            bind_address,
            port,
            llm: LlmConfig::from_env(),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let timeout_secs = env::var("OPENAI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);

        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            base_url: non_empty_var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            evaluation_model: non_empty_var("OPENAI_EVALUATION_MODEL")
                .unwrap_or_else(|| DEFAULT_EVALUATION_MODEL.to_string()),
            chat_model: non_empty_var("OPENAI_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
            http_referer: non_empty_var("OPENAI_HTTP_REFERER"),
            app_title: non_empty_var("OPENAI_APP_TITLE"),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            evaluation_model: DEFAULT_EVALUATION_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            http_referer: None,
            app_title: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
