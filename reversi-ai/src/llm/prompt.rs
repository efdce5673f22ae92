//! LLM 提示模板
//!
//! 系统提示中包含：
//! - 当前棋盘（8 行字符）
//! - 历史走法（JSON）
//! - 当前合法落子
//! - 难度标签与输出格式要求

use protocol::{Layout, Notation, Side, BOARD_SIZE};

use crate::advisor::AdvisorRequest;

use super::client::ChatMessage;

/// LLM 提示模板
pub struct PromptTemplate;

impl PromptTemplate {
    /// 系统提示
    pub fn system_prompt(request: &AdvisorRequest<'_>) -> String {
        let side = request.side;
        let side_char = side.to_char();

        let board_rows = Layout::parse(&request.layout)
            .map(|board| Layout::to_rows(&board))
            .unwrap_or_else(|_| request.layout.clone());

        let history = serde_json::to_string(request.history).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"You are an expert Reversi (Othello) AI Grandmaster.
Your goal is to choose the best move for the {side} player ({side_char}) on an {size}x{size} board.

Current Board State (B=Black, W=White, .=Empty):
{board_rows}

Previous Moves History (Player, Move, Board State After Move):
{history}

Available Valid Moves for {side}: {moves}

Difficulty Level: {difficulty}

Think step-by-step about the best strategic move for {side}, considering:
1. Maximizing your disc count.
2. Minimizing opponent's disc count.
3. Controlling corners and edges.
4. Avoiding moves that give opponent access to corners.
5. Creating stable discs.

Output your reasoning and then the chosen move in the format:
<reasoning>Your detailed reasoning here.</reasoning>
<move>R,C</move> (where R is row 0-7, C is column 0-7)"#,
            side = side,
            side_char = side_char,
            size = BOARD_SIZE,
            board_rows = board_rows,
            history = history,
            moves = Self::format_legal_moves(request),
            difficulty = request.difficulty,
        )
    }

    /// 用户提示
    pub fn user_prompt(side: Side) -> String {
        format!("What is the best next move for {}?", side)
    }

    /// 组装完整的对话消息
    pub fn move_request(request: &AdvisorRequest<'_>) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(Self::system_prompt(request)),
            ChatMessage::user(Self::user_prompt(request.side)),
        ]
    }

    /// 合法落子，同时给出字母坐标与行列坐标
    fn format_legal_moves(request: &AdvisorRequest<'_>) -> String {
        request
            .legal_moves
            .iter()
            .map(|pos| format!("{} = {},{}", Notation::to_readable(*pos), pos.row, pos.col))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
