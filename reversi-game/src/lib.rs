//! 黑白棋对局端
//!
//! 包含:
//! - 回合控制（人类执黑，AI 顾问执白，随机兜底）
//! - 配置加载与顾问构建

pub mod config;
pub mod game;

pub use config::GameConfig;
pub use game::{
    AdvisorMove, Game, GameStatus, MoveSource, RoundEvent, RoundReport, AI_SIDE, HUMAN_SIDE,
};
