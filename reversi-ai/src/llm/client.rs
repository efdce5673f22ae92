//! OpenAI 兼容 REST API 客户端
//!
//! 向 `{base_url}/chat/completions` 发送对话并取回第一条回复。

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[cfg(feature = "llm")]
use anyhow::Context;
#[cfg(feature = "llm")]
use tracing::{debug, info, warn};

/// API Key 环境变量
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// 服务地址环境变量
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// 模型名称环境变量
pub const MODEL_ENV: &str = "REVERSI_MODEL";

/// LLM 客户端配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// 服务地址，默认 https://api.openai.com/v1
    pub base_url: String,
    /// API Key，不写入配置文件
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// 模型名称
    pub model: String,
    /// 生成温度，0.0-1.0
    pub temperature: f32,
    /// nucleus 采样阈值
    pub top_p: f32,
    /// 最大生成 token 数
    pub max_tokens: u32,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 每次落子最多请求几次（请求失败或回复中没有走法时重试）
    pub max_attempts: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "claude-3-5-sonnet-20241022".to_string(),
            temperature: 0.5,
            top_p: 0.7,
            max_tokens: 512,
            timeout_secs: 60,
            max_attempts: 1,
        }
    }
}

impl LlmConfig {
    /// 用环境变量覆盖配置
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(key) = var(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = var(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = var(MODEL_ENV).filter(|v| !v.is_empty()) {
            self.model = model;
        }
    }
}

/// 对话消息
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat Completions 请求体
#[cfg(feature = "llm")]
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// Chat Completions 响应体
#[cfg(feature = "llm")]
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[cfg(feature = "llm")]
#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[cfg(feature = "llm")]
#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(feature = "llm")]
#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: u32,
}

/// LLM 客户端
#[cfg(feature = "llm")]
pub struct ChatClient {
    config: LlmConfig,
    client: reqwest::Client,
}

#[cfg(feature = "llm")]
impl ChatClient {
    /// 创建新的客户端
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    /// 发送对话请求，返回第一条回复的文本
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        debug!(
            "Sending chat request: model={}, messages={}",
            self.config.model,
            messages.len()
        );

        let mut builder = self.client.post(&url).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .context("Failed to send chat request")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        // 安全截取（避免切到多字节字符中间）
        let preview: String = response_text.chars().take(500).collect();
        debug!("Raw chat response: {}", preview);

        if !status.is_success() {
            anyhow::bail!("Chat endpoint returned {}: {}", status, preview);
        }

        let resp: ChatResponse =
            serde_json::from_str(&response_text).context("Failed to parse chat response")?;

        if let Some(usage) = &resp.usage {
            info!("Chat response: tokens={}", usage.total_tokens);
        }

        let output = resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if output.is_empty() {
            warn!("LLM returned empty response!");
        }

        Ok(output)
    }

    /// 获取当前配置
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

/// 非 LLM feature 时的占位实现
#[cfg(not(feature = "llm"))]
pub struct ChatClient {
    config: LlmConfig,
}

#[cfg(not(feature = "llm"))]
impl ChatClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        anyhow::bail!("LLM feature not enabled. Compile with --features llm")
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.max_tokens, 512);
        assert!(config.api_key.is_none());
        assert!(config.temperature >= 0.0 && config.temperature <= 1.0);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (API_KEY_ENV, "sk-test"),
            (BASE_URL_ENV, "http://localhost:8080/v1/"),
            (MODEL_ENV, ""),
        ]
        .into_iter()
        .collect();

        let mut config = LlmConfig::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        // 空值不覆盖
        assert_eq!(config.model, LlmConfig::default().model);
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = LlmConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));

        let parsed: LlmConfig = serde_json::from_str(r#"{"model": "gpt-4o-mini"}"#).unwrap();
        assert_eq!(parsed.model, "gpt-4o-mini");
        assert_eq!(parsed.max_tokens, 512);
        assert_eq!(parsed.max_attempts, 1);
    }

    #[test]
    fn test_client_creation() {
        let config = LlmConfig {
            model: "local".to_string(),
            ..Default::default()
        };
        let client = ChatClient::new(config).unwrap();
        assert_eq!(client.config().model, "local");
    }
}
