//! 棋盘常量定义

/// 棋盘边长（行数与列数相同）
pub const BOARD_SIZE: usize = 8;

/// 格子总数
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 黑方棋子字符
pub const BLACK_CHAR: char = 'B';

/// 白方棋子字符
pub const WHITE_CHAR: char = 'W';

/// 空格字符
pub const EMPTY_CHAR: char = '.';

/// 八个方向（行偏移, 列偏移）
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];
