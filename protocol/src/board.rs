//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::CELL_COUNT;
use crate::error::ReversiError;
use crate::layout::Layout;
use crate::outcome::Score;
use crate::piece::{Position, Side};

/// 棋盘
///
/// 8x8 固定大小，索引为 row * 8 + col。序列化形式为 64 字符的棋盘字符串，
/// 反序列化时会重新校验长度与字符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    squares: [Option<Side>; CELL_COUNT],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [None; CELL_COUNT],
        }
    }

    /// 创建初始棋盘：中央 2x2 对角摆放
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(Position::new_unchecked(3, 3), Some(Side::White));
        board.set(Position::new_unchecked(3, 4), Some(Side::Black));
        board.set(Position::new_unchecked(4, 3), Some(Side::Black));
        board.set(Position::new_unchecked(4, 4), Some(Side::White));
        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Side> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, cell: Option<Side>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = cell;
        }
    }

    /// 指定位置是否为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        pos.is_valid() && self.squares[pos.to_index()].is_none()
    }

    /// 统计某一方的棋子数
    pub fn count(&self, side: Side) -> u32 {
        self.squares.iter().filter(|cell| **cell == Some(side)).count() as u32
    }

    /// 逐格计数得到比分
    pub fn score(&self) -> Score {
        Score {
            black: self.count(Side::Black),
            white: self.count(Side::White),
        }
    }

    /// 按行优先顺序获取所有格子
    pub fn cells(&self) -> &[Option<Side>; CELL_COUNT] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl TryFrom<String> for Board {
    type Error = ReversiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Layout::parse(&value)
    }
}

impl From<Board> for String {
    fn from(board: Board) -> Self {
        Layout::to_string(&board)
    }
}
