//! LLM 集成模块
//!
//! 通过 OpenAI 兼容的 Chat Completions 接口请求白方落子建议。

mod client;
mod engine;
mod parser;
mod prompt;

pub use client::{ChatClient, ChatMessage, LlmConfig};
pub use engine::LlmAdvisor;
pub use parser::{MoveParser, ParsedReply};
pub use prompt::PromptTemplate;
