//! 落子合法性判断、合法落子生成与落子执行

use crate::board::Board;
use crate::constants::DIRECTIONS;
use crate::error::MoveRejection;
use crate::piece::{Position, Side};

/// 落子生成器
///
/// 无状态，所有操作只读取传入的棋盘，不会保留引用。
pub struct MoveGenerator;

impl MoveGenerator {
    /// 判断 `side` 在 (row, col) 落子是否合法
    pub fn is_legal(board: &Board, row: i64, col: i64, side: Side) -> bool {
        Self::check(board, row, col, side).is_ok()
    }

    /// 与 `is_legal` 相同的判断，但给出拒绝原因
    pub fn check(board: &Board, row: i64, col: i64, side: Side) -> Result<Position, MoveRejection> {
        let pos = Position::from_coords(row, col).ok_or(MoveRejection::OutOfBounds)?;
        if !board.is_empty_at(pos) {
            return Err(MoveRejection::Occupied);
        }
        let brackets = DIRECTIONS
            .iter()
            .any(|&(dr, dc)| Self::bracketed_run(board, pos, side, dr, dc) > 0);
        if brackets {
            Ok(pos)
        } else {
            Err(MoveRejection::NoFlips)
        }
    }

    /// 行优先列出 `side` 的所有合法落子
    pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
        Position::all()
            .filter(|pos| Self::is_legal_at(board, *pos, side))
            .collect()
    }

    /// 是否存在至少一个合法落子
    pub fn has_legal_move(board: &Board, side: Side) -> bool {
        Position::all().any(|pos| Self::is_legal_at(board, pos, side))
    }

    /// 双方都无子可下即为终局
    pub fn is_terminal(board: &Board) -> bool {
        !Self::has_legal_move(board, Side::Black) && !Self::has_legal_move(board, Side::White)
    }

    /// 执行落子
    ///
    /// 非法时返回 `(false, 原棋盘)`；合法时返回新棋盘，且 `flipped` 必为 true。
    pub fn apply_move(board: &Board, row: i64, col: i64, side: Side) -> (bool, Board) {
        let Ok(pos) = Self::check(board, row, col, side) else {
            return (false, *board);
        };

        let flips = Self::flips(board, pos, side);
        let mut new_board = *board;
        new_board.set(pos, Some(side));
        for flip in &flips {
            new_board.set(*flip, Some(side));
        }

        (!flips.is_empty(), new_board)
    }

    /// 在 `pos` 落子会翻转的所有棋子（按方向顺序）
    ///
    /// 目标格必须为空，否则返回空列表。
    pub fn flips(board: &Board, pos: Position, side: Side) -> Vec<Position> {
        let mut result = Vec::new();
        if !board.is_empty_at(pos) {
            return result;
        }

        for &(dr, dc) in &DIRECTIONS {
            let run = Self::bracketed_run(board, pos, side, dr, dc);
            let mut current = pos;
            for _ in 0..run {
                match current.offset(dr, dc) {
                    Some(next) => {
                        result.push(next);
                        current = next;
                    }
                    None => break,
                }
            }
        }

        result
    }

    fn is_legal_at(board: &Board, pos: Position, side: Side) -> bool {
        Self::check(board, pos.row as i64, pos.col as i64, side).is_ok()
    }

    /// 沿一个方向行走：返回被 `side` 夹住的连续对方棋子数
    ///
    /// 遇到空格或越界则该方向不成立，返回 0。
    fn bracketed_run(board: &Board, pos: Position, side: Side, dr: i8, dc: i8) -> usize {
        let opponent = side.opponent();
        let mut count = 0;
        let mut current = pos;

        loop {
            let Some(next) = current.offset(dr, dc) else {
                return 0;
            };
            match board.get(next) {
                Some(cell) if cell == opponent => {
                    count += 1;
                    current = next;
                }
                Some(_) => return count,
                None => return 0,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    /// 构造若干特殊局面，覆盖边角、长线与多方向翻转
    fn sample_boards() -> Vec<Board> {
        let mut boards = vec![Board::initial(), Board::empty()];

        // 开局后走几步得到的局面
        let mut board = Board::initial();
        for (row, col, side) in [(2, 3, Side::Black), (2, 2, Side::White), (3, 2, Side::Black)] {
            let (flipped, next) = MoveGenerator::apply_move(&board, row, col, side);
            assert!(flipped);
            board = next;
            boards.push(board);
        }

        boards.push(
            Layout::parse(concat!(
                "W.......",
                ".B......",
                "..B.....",
                "...BBBW.",
                "..B.....",
                ".W...B..",
                "......B.",
                ".......W",
            ))
            .unwrap(),
        );
        boards.push(
            Layout::parse(concat!(
                ".WWWWWWB",
                "BBBBBBBW",
                "WBWBWBWB",
                "BWBWBWBW",
                "WWWW.BBB",
                "BBBBBBBB",
                "WWWWWWWW",
                "........",
            ))
            .unwrap(),
        );
        boards
    }

    #[test]
    fn test_initial_legal_moves() {
        let board = Board::initial();

        let black = MoveGenerator::legal_moves(&board, Side::Black);
        assert_eq!(black, vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]);

        let white = MoveGenerator::legal_moves(&board, Side::White);
        assert_eq!(white, vec![pos(2, 4), pos(3, 5), pos(4, 2), pos(5, 3)]);
    }

    #[test]
    fn test_illegal_reasons() {
        let board = Board::initial();

        assert_eq!(
            MoveGenerator::check(&board, 8, 0, Side::Black),
            Err(MoveRejection::OutOfBounds)
        );
        assert_eq!(
            MoveGenerator::check(&board, -1, 3, Side::Black),
            Err(MoveRejection::OutOfBounds)
        );
        assert_eq!(
            MoveGenerator::check(&board, 3, 3, Side::Black),
            Err(MoveRejection::Occupied)
        );
        assert_eq!(
            MoveGenerator::check(&board, 0, 0, Side::Black),
            Err(MoveRejection::NoFlips)
        );
        // 与己方相邻但没有对方棋子夹在中间
        assert_eq!(
            MoveGenerator::check(&board, 2, 4, Side::Black),
            Err(MoveRejection::NoFlips)
        );
    }

    #[test]
    fn test_apply_move_flips() {
        let board = Board::initial();
        let (flipped, new_board) = MoveGenerator::apply_move(&board, 2, 3, Side::Black);

        assert!(flipped);
        assert_eq!(new_board.get(pos(2, 3)), Some(Side::Black));
        assert_eq!(new_board.get(pos(3, 3)), Some(Side::Black));
        assert_eq!(new_board.count(Side::Black), 4);
        assert_eq!(new_board.count(Side::White), 1);
    }

    #[test]
    fn test_apply_illegal_move_is_noop() {
        let board = Board::initial();
        for (row, col) in [(0, 0), (3, 3), (9, 9), (-2, 5)] {
            let (flipped, new_board) = MoveGenerator::apply_move(&board, row, col, Side::Black);
            assert!(!flipped);
            assert_eq!(new_board, board);
        }
    }

    #[test]
    fn test_multi_direction_flip() {
        // 黑方在中心落子，同时夹住三个方向
        let board = Layout::parse(concat!(
            "........",
            ".B.B.B..",
            "..WWW...",
            ".BW.WB..",
            "..WWW...",
            ".B...B..",
            "........",
            "........",
        ))
        .unwrap();

        let (flipped, new_board) = MoveGenerator::apply_move(&board, 3, 3, Side::Black);
        assert!(flipped);
        // 八个方向中除正下方外都被夹住
        for p in [pos(2, 2), pos(2, 3), pos(2, 4), pos(3, 2), pos(3, 4), pos(4, 2), pos(4, 4)] {
            assert_eq!(new_board.get(p), Some(Side::Black), "{} should flip", p);
        }
        assert_eq!(new_board.get(pos(4, 3)), Some(Side::White));
    }

    #[test]
    fn test_long_line_flip_and_unbracketed_line() {
        let board = Layout::parse(concat!(
            "BWWWWWW.",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            ".WWWWWWW",
        ))
        .unwrap();

        // 第 0 行：六个白子被夹住
        let (flipped, new_board) = MoveGenerator::apply_move(&board, 0, 7, Side::Black);
        assert!(flipped);
        assert_eq!(new_board.count(Side::Black), 8);

        // 第 7 行：走到边界都没有黑子，不能落子
        assert!(!MoveGenerator::is_legal(&board, 7, 0, Side::Black));
    }

    #[test]
    fn test_corner_is_valid_target() {
        let board = Layout::parse(concat!(
            ".W......",
            "WW......",
            "B.B.....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ))
        .unwrap();

        let flips = MoveGenerator::flips(&board, pos(0, 0), Side::Black);
        assert_eq!(flips, vec![pos(1, 0), pos(1, 1)]);

        let (flipped, new_board) = MoveGenerator::apply_move(&board, 0, 0, Side::Black);
        assert!(flipped);
        assert_eq!(new_board.get(pos(0, 1)), Some(Side::White));
    }

    #[test]
    fn test_legal_iff_flipped() {
        for board in sample_boards() {
            for side in [Side::Black, Side::White] {
                for row in -1..=8 {
                    for col in -1..=8 {
                        let legal = MoveGenerator::is_legal(&board, row, col, side);
                        let (flipped, new_board) = MoveGenerator::apply_move(&board, row, col, side);
                        assert_eq!(legal, flipped, "mismatch at ({}, {}) for {}", row, col, side);
                        if !legal {
                            assert_eq!(new_board, board);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_apply_move_disc_accounting() {
        for board in sample_boards() {
            for side in [Side::Black, Side::White] {
                for mv in MoveGenerator::legal_moves(&board, side) {
                    let (flipped, new_board) =
                        MoveGenerator::apply_move(&board, mv.row as i64, mv.col as i64, side);
                    assert!(flipped);

                    let before = board.count(Side::Black) + board.count(Side::White);
                    let after = new_board.count(Side::Black) + new_board.count(Side::White);
                    assert_eq!(after, before + 1);

                    for p in Position::all() {
                        if p == mv {
                            continue;
                        }
                        match (board.get(p), new_board.get(p)) {
                            (old, new) if old == new => {}
                            (Some(old), Some(new)) => {
                                assert_eq!(old, side.opponent());
                                assert_eq!(new, side);
                            }
                            (old, new) => panic!("cell {} went from {:?} to {:?}", p, old, new),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_legal_moves_consistent() {
        for board in sample_boards() {
            for side in [Side::Black, Side::White] {
                let moves = MoveGenerator::legal_moves(&board, side);
                assert!(moves.windows(2).all(|w| w[0] < w[1]), "not strictly row-major");
                for mv in &moves {
                    assert!(MoveGenerator::is_legal(&board, mv.row as i64, mv.col as i64, side));
                }
                let expected = Position::all()
                    .filter(|p| MoveGenerator::is_legal(&board, p.row as i64, p.col as i64, side))
                    .count();
                assert_eq!(moves.len(), expected);
                assert_eq!(MoveGenerator::has_legal_move(&board, side), !moves.is_empty());
            }
        }
    }

    fn random_board(rng: &mut ChaCha8Rng) -> Board {
        let mut board = Board::empty();
        for p in Position::all() {
            let cell = match rng.gen_range(0..10) {
                0..=3 => None,
                4..=6 => Some(Side::Black),
                _ => Some(Side::White),
            };
            board.set(p, cell);
        }
        board
    }

    #[test]
    fn test_legal_iff_flipped_random_boards() {
        let mut rng = ChaCha8Rng::seed_from_u64(20240607);

        for _ in 0..500 {
            let board = random_board(&mut rng);
            for side in [Side::Black, Side::White] {
                for row in -1..=8 {
                    for col in -1..=8 {
                        let legal = MoveGenerator::is_legal(&board, row, col, side);
                        let (flipped, new_board) = MoveGenerator::apply_move(&board, row, col, side);
                        assert_eq!(legal, flipped, "mismatch at ({}, {}) for {}", row, col, side);

                        if !legal {
                            assert_eq!(new_board, board);
                            continue;
                        }

                        let target = Position::new_unchecked(row as u8, col as u8);
                        let flips = MoveGenerator::flips(&board, target, side);
                        assert!(!flips.is_empty());
                        assert_eq!(new_board.count(side), board.count(side) + 1 + flips.len() as u32);
                        assert_eq!(
                            new_board.count(side.opponent()),
                            board.count(side.opponent()) - flips.len() as u32
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_playouts_reach_terminal() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..100 {
            let mut board = Board::initial();
            let mut side = Side::Black;

            // 最多 60 次落子，两次落子之间最多一次弃权
            for _ in 0..121 {
                if MoveGenerator::is_terminal(&board) {
                    break;
                }
                let moves = MoveGenerator::legal_moves(&board, side);
                let Some(mv) = moves.choose(&mut rng) else {
                    side = side.opponent();
                    continue;
                };
                let (flipped, next) =
                    MoveGenerator::apply_move(&board, mv.row as i64, mv.col as i64, side);
                assert!(flipped);
                board = next;
                side = side.opponent();
            }

            assert!(MoveGenerator::is_terminal(&board));
            let score = board.score();
            assert_eq!(score.black, board.count(Side::Black));
            assert_eq!(score.white, board.count(Side::White));
        }
    }

    #[test]
    fn test_terminal() {
        assert!(!MoveGenerator::is_terminal(&Board::initial()));
        assert!(MoveGenerator::is_terminal(&Board::empty()));

        let full = Layout::parse(&"BW".repeat(32)).unwrap();
        assert!(MoveGenerator::is_terminal(&full));
    }
}
