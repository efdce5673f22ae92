//! 坐标表示法
//!
//! 列用字母 A-H，行用数字 1-8，例如 `E3` 表示 row=2, col=4。
//! 输入同时接受从 0 开始的数字坐标 `2,4` 或 `2 4`。

use crate::error::ReversiError;
use crate::piece::Position;

/// 坐标表示法
pub struct Notation;

impl Notation {
    /// 转换为字母数字形式，如 `E3`
    pub fn to_algebraic(pos: Position) -> String {
        format!("{}{}", Self::column_letter(pos.col), pos.row + 1)
    }

    /// 转换为提示词中使用的形式，如 `(E, 3)`
    pub fn to_readable(pos: Position) -> String {
        format!("({}, {})", Self::column_letter(pos.col), pos.row + 1)
    }

    /// 解析玩家输入，返回 (row, col)
    ///
    /// 数字形式不做范围检查，越界由落子校验统一报告。
    pub fn parse(input: &str) -> Result<(i64, i64), ReversiError> {
        let trimmed = input
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        let invalid = || ReversiError::InvalidNotation {
            input: input.to_string(),
        };

        if let Some(coords) = Self::parse_numeric(trimmed) {
            return Ok(coords);
        }

        let mut chars = trimmed.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let rest: String = chars.collect();
        if !letter.is_ascii_alphabetic() {
            return Err(invalid());
        }

        let col = letter.to_ascii_uppercase() as i64 - 'A' as i64;
        let row: i64 = rest.trim().parse().map_err(|_| invalid())?;
        if !(0..8).contains(&col) || !(1..=8).contains(&row) {
            return Err(invalid());
        }

        Ok((row - 1, col))
    }

    fn parse_numeric(text: &str) -> Option<(i64, i64)> {
        let parts: Vec<&str> = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 2 {
            return None;
        }
        let row = parts[0].parse().ok()?;
        let col = parts[1].parse().ok()?;
        Some((row, col))
    }

    fn column_letter(col: u8) -> char {
        (b'A' + col) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_algebraic() {
        assert_eq!(Notation::to_algebraic(Position::new_unchecked(2, 4)), "E3");
        assert_eq!(Notation::to_algebraic(Position::new_unchecked(0, 0)), "A1");
        assert_eq!(Notation::to_algebraic(Position::new_unchecked(7, 7)), "H8");
        assert_eq!(Notation::to_readable(Position::new_unchecked(5, 2)), "(C, 6)");
    }

    #[test]
    fn test_parse_algebraic() {
        assert_eq!(Notation::parse("E3").unwrap(), (2, 4));
        assert_eq!(Notation::parse("e3").unwrap(), (2, 4));
        assert_eq!(Notation::parse(" h8 ").unwrap(), (7, 7));
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(Notation::parse("2,4").unwrap(), (2, 4));
        assert_eq!(Notation::parse("2 4").unwrap(), (2, 4));
        assert_eq!(Notation::parse("(5, 3)").unwrap(), (5, 3));
        // 越界的数字坐标原样返回
        assert_eq!(Notation::parse("9,-1").unwrap(), (9, -1));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Notation::parse("").is_err());
        assert!(Notation::parse("Z3").is_err());
        assert!(Notation::parse("A9").is_err());
        assert!(Notation::parse("A0").is_err());
        assert!(Notation::parse("hello").is_err());
        assert!(Notation::parse("1,2,3").is_err());
    }
}
