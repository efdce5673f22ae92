//! 回合控制
//!
//! 一个回合：黑方（人类）落子 → 白方（AI 顾问）应对，期间处理弃权与终局。
//! 棋盘、走子方与历史记录都归 [`Game`] 独占，规则判断全部委托给 [`MoveGenerator`]。

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use protocol::{
    Board, Difficulty, GameResult, Layout, MoveGenerator, MoveRecord, Notation, Position,
    ReversiError, Result, Score, Side,
};
use reversi_ai::{Advisor, AdvisorRequest};

use crate::config::GameConfig;

/// 人类执黑
pub const HUMAN_SIDE: Side = Side::Black;

/// AI 执白
pub const AI_SIDE: Side = Side::White;

/// 白方落子的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// 采纳了顾问的建议
    Advisor,
    /// 顾问失败或建议不合法，随机选择
    Fallback,
}

/// 白方的一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorMove {
    pub position: Position,
    pub source: MoveSource,
    /// 顾问的推理说明（顾问不可用时为空）
    pub reasoning: String,
    /// 兜底原因
    pub diagnostic: Option<String>,
}

/// 对局状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// 进行中，轮到黑方
    InProgress,
    /// 双方都无子可下
    Over { score: Score, result: GameResult },
}

/// 黑方落子之后发生的事
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// 该方无子可下，弃权
    Pass(Side),
    /// 白方落子
    Move(AdvisorMove),
}

/// 一个回合的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// 黑方落子（黑方弃权时为 None）
    pub human_move: Option<Position>,
    /// 按发生顺序排列的弃权与白方落子（黑方被迫弃权时白方可能连走多步）
    pub events: Vec<RoundEvent>,
    /// 回合结束后的棋盘
    pub board: Board,
    /// 回合结束后的状态
    pub status: GameStatus,
}

impl RoundReport {
    /// 本回合白方的所有落子
    pub fn advisor_moves(&self) -> Vec<&AdvisorMove> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RoundEvent::Move(mv) => Some(mv),
                RoundEvent::Pass(_) => None,
            })
            .collect()
    }

    /// 本回合的弃权方
    pub fn passes(&self) -> Vec<Side> {
        self.events
            .iter()
            .filter_map(|event| match event {
                RoundEvent::Pass(side) => Some(*side),
                RoundEvent::Move(_) => None,
            })
            .collect()
    }
}

/// 回合控制器
pub struct Game {
    board: Board,
    current_turn: Side,
    history: Vec<MoveRecord>,
    difficulty: Difficulty,
    advisor: Box<dyn Advisor>,
    rng: ChaCha8Rng,
    advisor_timeout: Duration,
}

impl Game {
    /// 从初始局面开始新对局
    pub fn new(advisor: Box<dyn Advisor>, config: &GameConfig) -> Self {
        Self::from_board(Board::initial(), advisor, config)
    }

    /// 从指定局面开始，轮到黑方
    pub fn from_board(board: Board, advisor: Box<dyn Advisor>, config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            board,
            current_turn: HUMAN_SIDE,
            history: Vec::new(),
            difficulty: config.difficulty.clone(),
            advisor,
            rng,
            advisor_timeout: config.advisor_timeout(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// 更换难度标签，从下一次向顾问请求起生效
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!("Difficulty changed: {} -> {}", self.difficulty, difficulty);
        self.difficulty = difficulty;
    }

    /// 黑方当前的合法落子
    pub fn legal_moves(&self) -> Vec<Position> {
        MoveGenerator::legal_moves(&self.board, HUMAN_SIDE)
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    pub fn is_over(&self) -> bool {
        MoveGenerator::is_terminal(&self.board)
    }

    /// 黑方无子可下但对局未结束（只会出现在自定义初始局面）
    pub fn must_pass(&self) -> bool {
        !self.is_over() && !MoveGenerator::has_legal_move(&self.board, HUMAN_SIDE)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_over() {
            let score = self.score();
            GameStatus::Over {
                score,
                result: score.result(),
            }
        } else {
            GameStatus::InProgress
        }
    }

    /// 进行一个回合：黑方在 (row, col) 落子，随后白方应对
    ///
    /// 落子非法时返回 `InvalidMove`，状态不变；终局后返回 `GameOver`。
    pub async fn play_round(&mut self, row: i64, col: i64) -> Result<RoundReport> {
        if self.is_over() {
            return Err(ReversiError::GameOver);
        }

        let pos = MoveGenerator::check(&self.board, row, col, HUMAN_SIDE)
            .map_err(|reason| ReversiError::InvalidMove { row, col, reason })?;

        let (flipped, new_board) = MoveGenerator::apply_move(&self.board, row, col, HUMAN_SIDE);
        if !flipped {
            return Err(ReversiError::InvalidMove {
                row,
                col,
                reason: protocol::MoveRejection::NoFlips,
            });
        }

        self.commit(HUMAN_SIDE, pos, new_board);

        let mut report = self.new_report(Some(pos));
        self.run_ai_turns(&mut report).await;
        Ok(self.finish_report(report))
    }

    /// 黑方无子可下时弃权，由白方继续
    pub async fn skip_turn(&mut self) -> Result<RoundReport> {
        if self.is_over() {
            return Err(ReversiError::GameOver);
        }
        if MoveGenerator::has_legal_move(&self.board, HUMAN_SIDE) {
            return Err(ReversiError::PassNotAllowed);
        }

        info!("{} has no legal move, passing", HUMAN_SIDE);
        let mut report = self.new_report(None);
        report.events.push(RoundEvent::Pass(HUMAN_SIDE));
        self.current_turn = AI_SIDE;
        self.run_ai_turns(&mut report).await;
        Ok(self.finish_report(report))
    }

    /// 白方连续行棋，直到黑方有子可下或终局
    async fn run_ai_turns(&mut self, report: &mut RoundReport) {
        loop {
            let legal = MoveGenerator::legal_moves(&self.board, AI_SIDE);
            if legal.is_empty() {
                info!("{} has no legal move, passing", AI_SIDE);
                report.events.push(RoundEvent::Pass(AI_SIDE));
                self.current_turn = HUMAN_SIDE;
                return;
            }

            let Some(ai_move) = self.resolve_ai_move(&legal).await else {
                self.current_turn = HUMAN_SIDE;
                return;
            };

            let pos = ai_move.position;
            let (flipped, new_board) =
                MoveGenerator::apply_move(&self.board, pos.row as i64, pos.col as i64, AI_SIDE);
            if !flipped {
                // legal_moves 与 apply_move 共用同一套方向行走，不应出现
                error!("Move {} from the legal list did not flip anything", pos);
                self.current_turn = HUMAN_SIDE;
                return;
            }

            self.commit(AI_SIDE, pos, new_board);
            report.events.push(RoundEvent::Move(ai_move));

            if MoveGenerator::has_legal_move(&self.board, HUMAN_SIDE) {
                return;
            }
            if !MoveGenerator::has_legal_move(&self.board, AI_SIDE) {
                info!("Neither side can move, game over");
                return;
            }

            info!("{} has no legal move, {} moves again", HUMAN_SIDE, AI_SIDE);
            report.events.push(RoundEvent::Pass(HUMAN_SIDE));
            self.current_turn = AI_SIDE;
        }
    }

    /// 向顾问请求白方落子，不可用或不合法时在本次合法列表中随机选择
    async fn resolve_ai_move(&mut self, legal: &[Position]) -> Option<AdvisorMove> {
        let request = AdvisorRequest {
            layout: Layout::to_string(&self.board),
            side: AI_SIDE,
            difficulty: &self.difficulty,
            history: &self.history,
            legal_moves: legal,
        };

        debug!(
            "Requesting move from {} advisor, {} legal moves",
            self.advisor.name(),
            legal.len()
        );

        let outcome = tokio::time::timeout(self.advisor_timeout, self.advisor.recommend(&request)).await;

        let (accepted, reasoning, diagnostic) = match outcome {
            Ok(Ok(rec)) => match rec.suggested {
                Some((row, col)) => match request.accepts(row, col) {
                    Some(pos) => (Some(pos), rec.reasoning, None),
                    None => (
                        None,
                        rec.reasoning,
                        Some(format!("advisor suggested ({}, {}), which is not a legal move", row, col)),
                    ),
                },
                None => (
                    None,
                    rec.reasoning,
                    Some("advisor returned no usable move".to_string()),
                ),
            },
            Ok(Err(e)) => (None, String::new(), Some(format!("advisor unavailable: {:#}", e))),
            Err(_) => (
                None,
                String::new(),
                Some(format!("advisor timed out after {:?}", self.advisor_timeout)),
            ),
        };

        if let Some(pos) = accepted {
            return Some(AdvisorMove {
                position: pos,
                source: MoveSource::Advisor,
                reasoning,
                diagnostic: None,
            });
        }

        let pos = *legal.choose(&mut self.rng)?;
        let diagnostic = diagnostic.unwrap_or_default();
        warn!("Falling back to random move {}: {}", Notation::to_algebraic(pos), diagnostic);

        Some(AdvisorMove {
            position: pos,
            source: MoveSource::Fallback,
            reasoning,
            diagnostic: Some(diagnostic),
        })
    }

    /// 提交落子：更新棋盘、追加记录、切换走子方
    fn commit(&mut self, side: Side, pos: Position, new_board: Board) {
        self.board = new_board;
        self.history.push(MoveRecord::now(side, pos, &self.board));
        self.current_turn = side.opponent();

        let score = self.board.score();
        info!(
            "{} played {} ({}), score {}",
            side,
            Notation::to_algebraic(pos),
            pos,
            score
        );
    }

    fn new_report(&self, human_move: Option<Position>) -> RoundReport {
        RoundReport {
            human_move,
            events: Vec::new(),
            board: self.board,
            status: GameStatus::InProgress,
        }
    }

    fn finish_report(&self, mut report: RoundReport) -> RoundReport {
        report.board = self.board;
        report.status = self.status();
        if let GameStatus::Over { score, result } = report.status {
            info!("Game over: {}, result {:?}", score, result);
        }
        report
    }
}
