//! LLM 回复解析器
//!
//! 期望格式：
//! `<reasoning>...</reasoning>` + `<move>R,C</move>`
//!
//! 也接受 JSON 形式 `{"row": R, "col": C}`。解析失败不报错，
//! 而是把警告追加到推理说明里，建议留空交给调用方兜底。

use serde::Deserialize;
use tracing::debug;

const REASONING_OPEN: &str = "<reasoning>";
const REASONING_CLOSE: &str = "</reasoning>";
const MOVE_OPEN: &str = "<move>";
const MOVE_CLOSE: &str = "</move>";

/// 缺少推理标签时的占位文本
pub const NO_REASONING: &str = "No reasoning found.";

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    /// 推理说明（含警告）
    pub reasoning: String,
    /// 建议的 (row, col)，未做合法性检查
    pub suggested: Option<(i64, i64)>,
}

/// JSON 形式的走法
#[derive(Debug, Deserialize)]
struct JsonMove {
    row: i64,
    col: i64,
}

/// LLM 回复解析器
pub struct MoveParser;

impl MoveParser {
    /// 解析 LLM 回复
    pub fn parse(response: &str) -> ParsedReply {
        let fixed = Self::try_fix_response(response);

        let mut reasoning = Self::between(&fixed, REASONING_OPEN, REASONING_CLOSE)
            .map(|text| text.trim().to_string())
            .unwrap_or_else(|| NO_REASONING.to_string());

        let suggested = match Self::between(&fixed, MOVE_OPEN, MOVE_CLOSE) {
            Some(move_str) => {
                let move_str = move_str.trim();
                let parsed = Self::parse_pair(move_str);
                if parsed.is_none() {
                    reasoning.push_str(&format!(
                        "\nWarning: AI suggested malformed move '{}'.",
                        move_str
                    ));
                }
                parsed
            }
            None => {
                let parsed = Self::parse_json(&fixed);
                if parsed.is_none() {
                    reasoning.push_str("\nWarning: AI response contained no move.");
                }
                parsed
            }
        };

        debug!("Parsed LLM reply: suggested={:?}", suggested);

        ParsedReply {
            reasoning,
            suggested,
        }
    }

    /// 尝试修复常见的 LLM 输出问题
    pub fn try_fix_response(response: &str) -> String {
        let mut fixed = response.to_string();

        // 1. 移除 <think>...</think> 思考过程
        if let Some(think_end) = fixed.find("</think>") {
            fixed = fixed[think_end + "</think>".len()..].to_string();
        }

        // 2. 移除 markdown 代码块标记
        fixed = fixed.replace("```json", "").replace("```xml", "").replace("```", "");

        fixed.trim().to_string()
    }

    /// 解析 `R,C`，允许括号与空白
    pub fn parse_pair(text: &str) -> Option<(i64, i64)> {
        let inner = text.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = inner.split(',');
        let row = parts.next()?.trim().parse().ok()?;
        let col = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((row, col))
    }

    /// 从文本中提取第一个 `{...}` 并按 JSON 走法解析
    fn parse_json(text: &str) -> Option<(i64, i64)> {
        let start = text.find('{')?;
        let end = start + text[start..].find('}')?;
        let mv: JsonMove = serde_json::from_str(&text[start..=end]).ok()?;
        Some((mv.row, mv.col))
    }

    fn between<'a>(text: &'a str, open: &str, close: &str) -> Option<&'a str> {
        let start = text.find(open)? + open.len();
        let end = start + text[start..].find(close)?;
        Some(&text[start..end])
    }
}
