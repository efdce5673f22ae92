//! 走法记录
//!
//! 每次成功落子后追加一条，只作为只读上下文交给 AI 顾问。

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::layout::Layout;
use crate::piece::{Position, Side};

/// 走法记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 落子方
    pub side: Side,
    /// 落子位置 [row, col]
    pub position: [u8; 2],
    /// 落子后的棋盘字符串
    pub board: String,
    /// 落子时的 Unix 时间戳（毫秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl MoveRecord {
    /// 创建新的走法记录
    pub fn new(side: Side, pos: Position, board_after: &Board) -> Self {
        Self {
            side,
            position: pos.to_array(),
            board: Layout::to_string(board_after),
            timestamp: None,
        }
    }

    /// 带当前时间戳创建
    pub fn now(side: Side, pos: Position, board_after: &Board) -> Self {
        let mut record = Self::new(side, pos, board_after);
        record.timestamp = u64::try_from(Utc::now().timestamp_millis()).ok();
        record
    }
}
