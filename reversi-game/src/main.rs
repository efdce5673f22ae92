use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protocol::{Difficulty, GameResult, Layout, Notation, ReversiError};
use reversi_game::{Game, GameConfig, GameStatus, MoveSource, RoundEvent, RoundReport};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志，输出到 stderr，避免和棋盘混在一起
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("reversi_game=info".parse()?))
        .init();

    let config = GameConfig::load();
    info!(
        "Starting reversi, backend {:?}, difficulty {}",
        config.backend, config.difficulty
    );

    let advisor = config.build_advisor();
    let mut game = Game::new(advisor, &config);

    println!("You play Black (B). Enter moves as E3, \"2,4\" or \"2 4\"; \"quit\" to exit.");
    println!("\"level <name>\" changes the AI difficulty (now {}).", game.difficulty());
    print_board(&game);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !game.is_over() {
        if game.must_pass() {
            println!("Black has no legal move and passes.");
            let report = game.skip_turn().await?;
            print_report(&report);
            print_board(&game);
            continue;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        if let Some(label) = input.strip_prefix("level ") {
            let label = label.trim();
            if !label.is_empty() {
                game.set_difficulty(Difficulty::new(label));
                println!("Difficulty set to {}.", game.difficulty());
            }
            continue;
        }

        let (row, col) = match Notation::parse(input) {
            Ok(coords) => coords,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match game.play_round(row, col).await {
            Ok(report) => {
                print_report(&report);
                print_board(&game);
            }
            Err(ReversiError::GameOver) => break,
            Err(e) => {
                warn!("Rejected move {}: {}", input, e);
                println!("{}", e);
            }
        }
    }

    if let GameStatus::Over { score, result } = game.status() {
        let verdict = match result {
            GameResult::Win(side) => format!("{} wins", side),
            GameResult::Draw => "Draw".to_string(),
        };
        println!("Game over: {} ({})", score, verdict);
    }

    Ok(())
}

fn print_board(game: &Game) {
    println!("{}", Layout::to_rows(game.board()));
    println!("Score: {}", game.score());
    let moves: Vec<String> = game
        .legal_moves()
        .into_iter()
        .map(Notation::to_algebraic)
        .collect();
    if !moves.is_empty() {
        println!("Your moves: {}", moves.join(" "));
    }
}

fn print_report(report: &RoundReport) {
    for event in &report.events {
        match event {
            RoundEvent::Pass(side) => println!("{} passes.", side),
            RoundEvent::Move(mv) => match mv.source {
                MoveSource::Advisor => println!(
                    "White plays {}: {}",
                    Notation::to_algebraic(mv.position),
                    mv.reasoning
                ),
                MoveSource::Fallback => println!(
                    "White plays {} (random, {})",
                    Notation::to_algebraic(mv.position),
                    mv.diagnostic.as_deref().unwrap_or("advisor unavailable")
                ),
            },
        }
    }
}
