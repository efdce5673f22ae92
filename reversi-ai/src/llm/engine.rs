//! LLM 顾问
//!
//! 组合客户端、提示模板与解析器，实现 [`Advisor`]。

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::advisor::{Advisor, AdvisorRequest, Recommendation};

use super::{ChatClient, LlmConfig, MoveParser, PromptTemplate};

/// LLM 顾问
pub struct LlmAdvisor {
    client: ChatClient,
    /// 最大尝试次数，至少 1 次
    max_attempts: u32,
}

impl LlmAdvisor {
    /// 创建新的 LLM 顾问
    pub fn new(config: LlmConfig) -> Result<Self> {
        let max_attempts = config.max_attempts.max(1);
        let client = ChatClient::new(config)?;
        Ok(Self {
            client,
            max_attempts,
        })
    }
}

#[async_trait]
impl Advisor for LlmAdvisor {
    fn name(&self) -> &str {
        "llm"
    }

    async fn recommend(&self, request: &AdvisorRequest<'_>) -> Result<Recommendation> {
        let messages = PromptTemplate::move_request(request);
        debug!("LLM prompt length: {} chars", messages[0].content.len());

        let mut last_reasoning = None;

        for attempt in 1..=self.max_attempts {
            info!(
                "LLM move request attempt {}/{} (model {})",
                attempt,
                self.max_attempts,
                self.client.config().model
            );

            let response = match self.client.complete(&messages).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("LLM request failed (attempt {}): {}", attempt, e);
                    continue;
                }
            };

            let mut reply = MoveParser::parse(&response);
            let Some((row, col)) = reply.suggested else {
                let preview: String = response.chars().take(500).collect();
                warn!("No usable move in LLM reply (attempt {}): {}", attempt, preview);
                last_reasoning = Some(reply.reasoning);
                continue;
            };

            if request.accepts(row, col).is_none() {
                reply.reasoning.push_str(&format!(
                    "\nWarning: AI suggested invalid move {},{}.",
                    row, col
                ));
            }

            return Ok(Recommendation::new(reply.suggested, reply.reasoning));
        }

        match last_reasoning {
            // 回复可达但没有走法：仍把推理交给调用方
            Some(reasoning) => Ok(Recommendation::new(None, reasoning)),
            None => bail!("LLM request failed after {} attempts", self.max_attempts),
        }
    }
}
