//! 黑白棋 AI 顾问
//!
//! 包含:
//! - 顾问接口（回合控制器注入的外部能力）
//! - 随机顾问
//! - LLM 顾问（OpenAI 兼容接口，需开启 `llm` feature 才会真正发请求）

mod advisor;
mod random;

pub mod llm;

pub use advisor::{Advisor, AdvisorRequest, AiBackend, Recommendation};
pub use random::RandomAdvisor;
