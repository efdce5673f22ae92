//! 终局比分与结果

use serde::{Deserialize, Serialize};

use crate::piece::Side;

/// 双方棋子数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// 棋子严格多者胜，相等为和棋
    pub fn result(&self) -> GameResult {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => GameResult::Win(Side::Black),
            std::cmp::Ordering::Less => GameResult::Win(Side::White),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Black {} - {} White", self.black, self.white)
    }
}

/// 游戏结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// 一方获胜
    Win(Side),
    /// 和棋
    Draw,
}
