//! 错误类型定义

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 落子被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRejection {
    /// 坐标超出棋盘
    OutOfBounds,
    /// 目标格已有棋子
    Occupied,
    /// 任何方向都无法夹住对方棋子
    NoFlips,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MoveRejection::OutOfBounds => "coordinates out of range",
            MoveRejection::Occupied => "cell is occupied",
            MoveRejection::NoFlips => "no discs would be flipped",
        };
        f.write_str(text)
    }
}

/// 黑白棋规则错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReversiError {
    /// 无效的落子
    #[error("Invalid move at ({row}, {col}): {reason}")]
    InvalidMove {
        row: i64,
        col: i64,
        reason: MoveRejection,
    },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 还有合法落子，不能弃权
    #[error("Cannot pass while a legal move exists")]
    PassNotAllowed,

    /// 无效的棋盘字符串
    #[error("Invalid board layout: {reason}")]
    InvalidLayout { reason: String },

    /// 无法识别的坐标输入
    #[error("Invalid notation: {input:?}")]
    InvalidNotation { input: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ReversiError>;
