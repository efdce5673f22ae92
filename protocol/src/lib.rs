//! 黑白棋共享规则库
//!
//! 包含:
//! - 阵营、位置、棋盘等核心数据结构
//! - 合法落子判断、生成与执行（翻转）
//! - 棋盘字符串编解码与坐标表示法
//! - 走法记录、难度标签、比分

mod board;
mod constants;
mod difficulty;
mod error;
mod layout;
mod moves;
mod notation;
mod outcome;
mod piece;
mod record;

pub use board::Board;
pub use constants::*;
pub use difficulty::{Difficulty, DEFAULT_DIFFICULTY};
pub use error::{MoveRejection, ReversiError, Result};
pub use layout::{Layout, INITIAL_LAYOUT};
pub use moves::MoveGenerator;
pub use notation::Notation;
pub use outcome::{GameResult, Score};
pub use piece::{Position, Side};
pub use record::MoveRecord;
