//! AI 顾问接口
//!
//! 回合控制器通过该接口向外部服务请求白方落子建议。
//! 建议仅供参考：控制器会用合法落子列表重新校验，不合法时随机兜底。

use anyhow::Result;
use async_trait::async_trait;
use protocol::{Difficulty, MoveRecord, Position, Side};
use serde::{Deserialize, Serialize};

/// 落子请求
#[derive(Debug, Clone)]
pub struct AdvisorRequest<'a> {
    /// 当前棋盘字符串（64 字符，行优先）
    pub layout: String,
    /// 待走方
    pub side: Side,
    /// 难度标签
    pub difficulty: &'a Difficulty,
    /// 历史走法
    pub history: &'a [MoveRecord],
    /// 当前合法落子（行优先，非空）
    pub legal_moves: &'a [Position],
}

impl AdvisorRequest<'_> {
    /// 建议是否在本次请求的合法落子列表中
    pub fn accepts(&self, row: i64, col: i64) -> Option<Position> {
        let pos = Position::from_coords(row, col)?;
        self.legal_moves.contains(&pos).then_some(pos)
    }
}

/// 顾问给出的建议
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 建议的 (row, col)，可能越界或不合法
    pub suggested: Option<(i64, i64)>,
    /// 推理说明，包含解析过程中的警告
    pub reasoning: String,
}

impl Recommendation {
    pub fn new(suggested: Option<(i64, i64)>, reasoning: impl Into<String>) -> Self {
        Self {
            suggested,
            reasoning: reasoning.into(),
        }
    }
}

/// AI 顾问
#[async_trait]
pub trait Advisor: Send + Sync {
    /// 顾问名称（用于日志）
    fn name(&self) -> &str;

    /// 请求落子建议
    ///
    /// 返回 Err 表示服务不可用，调用方会走兜底逻辑。
    async fn recommend(&self, request: &AdvisorRequest<'_>) -> Result<Recommendation>;
}

/// AI 后端类型
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBackend {
    /// 在合法落子中随机选择
    #[default]
    Random,
    /// LLM（OpenAI 兼容接口）
    Llm,
}

impl std::str::FromStr for AiBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AiBackend::Random),
            "llm" => Ok(AiBackend::Llm),
            other => anyhow::bail!("Unknown AI backend: {}", other),
        }
    }
}
