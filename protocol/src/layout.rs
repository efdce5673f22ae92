//! 棋盘字符串格式
//!
//! 每格一个字符，行优先：`B` 黑方，`W` 白方，`.` 空格。
//! 单行形式共 64 个字符；多行形式在每行之间插入换行，用于提示词展示。
//! 解析时忽略所有空白字符，两种形式都能读回。

use crate::board::Board;
use crate::constants::{BOARD_SIZE, CELL_COUNT, EMPTY_CHAR};
use crate::error::ReversiError;
use crate::piece::{Position, Side};

/// 初始局面
pub const INITIAL_LAYOUT: &str = concat!(
    "........",
    "........",
    "........",
    "...WB...",
    "...BW...",
    "........",
    "........",
    "........",
);

/// 棋盘字符串编解码
pub struct Layout;

impl Layout {
    /// 转换为 64 字符的单行字符串
    pub fn to_string(board: &Board) -> String {
        board.cells().iter().map(|cell| Self::cell_char(*cell)).collect()
    }

    /// 转换为 8 行字符串（行间以换行分隔）
    pub fn to_rows(board: &Board) -> String {
        board
            .cells()
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|cell| Self::cell_char(*cell)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 解析棋盘字符串
    pub fn parse(text: &str) -> Result<Board, ReversiError> {
        let mut board = Board::empty();
        let mut index = 0usize;

        for c in text.chars().filter(|c| !c.is_whitespace()) {
            if index >= CELL_COUNT {
                return Err(ReversiError::InvalidLayout {
                    reason: format!("more than {} cells", CELL_COUNT),
                });
            }

            let cell = if c == EMPTY_CHAR {
                None
            } else if let Some(side) = Side::from_char(c) {
                Some(side)
            } else {
                return Err(ReversiError::InvalidLayout {
                    reason: format!("invalid cell character {:?} at index {}", c, index),
                });
            };

            if let Some(pos) = Position::from_index(index) {
                board.set(pos, cell);
            }
            index += 1;
        }

        if index != CELL_COUNT {
            return Err(ReversiError::InvalidLayout {
                reason: format!("expected {} cells, got {}", CELL_COUNT, index),
            });
        }

        Ok(board)
    }

    fn cell_char(cell: Option<Side>) -> char {
        match cell {
            Some(side) => side.to_char(),
            None => EMPTY_CHAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout_matches_board() {
        assert_eq!(INITIAL_LAYOUT.len(), 64);
        assert_eq!(Layout::to_string(&Board::initial()), INITIAL_LAYOUT);
        assert_eq!(Layout::parse(INITIAL_LAYOUT).unwrap(), Board::initial());
    }

    #[test]
    fn test_layout_roundtrip() {
        let mut board = Board::initial();
        board.set(Position::new_unchecked(0, 0), Some(Side::Black));
        board.set(Position::new_unchecked(7, 7), Some(Side::White));
        board.set(Position::new_unchecked(5, 2), Some(Side::White));

        let text = Layout::to_string(&board);
        assert_eq!(Layout::parse(&text).unwrap(), board);

        let rows = Layout::to_rows(&board);
        assert_eq!(Layout::parse(&rows).unwrap(), board);
    }

    #[test]
    fn test_rows_format() {
        let rows = Layout::to_rows(&Board::initial());
        let lines: Vec<&str> = rows.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3], "...WB...");
        assert_eq!(lines[4], "...BW...");
        assert!(!rows.ends_with('\n'));
    }

    #[test]
    fn test_invalid_layout() {
        // 长度不足
        assert!(Layout::parse("BW..").is_err());

        // 长度过长
        let too_long = format!("{}.", INITIAL_LAYOUT);
        assert!(Layout::parse(&too_long).is_err());

        // 无效字符
        let bad = INITIAL_LAYOUT.replacen('.', "x", 1);
        assert!(matches!(
            Layout::parse(&bad),
            Err(ReversiError::InvalidLayout { .. })
        ));
    }
}
