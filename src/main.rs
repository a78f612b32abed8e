//! Interactive two-player terminal chess.
//!
//! Both sides share the keyboard: type a move as two squares ("e2 e4" or
//! "e2e4"), ask for highlights with "moves e2", and "reset" or "quit" at any
//! point. The game ends when a king is captured, never by mate detection.
//!
//! Usage:
//!   cargo run --release
//!   cargo run --release -- --fen "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
//!   cargo run --release -- --random-black

use std::io::{self, BufRead, Write};

use clap::Parser;
use rand::prelude::*;

use casual_chess::board::STARTING_POSITION_FEN;
use casual_chess::game::{Game, MoveOutcome, SelectionResult};
use casual_chess::types::{Color, GameStatus, Square};

#[derive(Parser, Debug)]
#[command(name = "casual_chess")]
#[command(about = "Two-player terminal chess where capturing the king wins")]
struct Args {
    /// Starting position as FEN (placement, side to move and castling
    /// fields are honored)
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    /// Draw the board with piece letters instead of Unicode symbols
    #[arg(long)]
    ascii: bool,

    /// Answer every white move with a uniformly random legal black move
    #[arg(long)]
    random_black: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut game = Game::from_fen(&args.fen);
    println!(
        "game started {} - type `help` for commands",
        game.started_at().format("%Y-%m-%d %H:%M")
    );
    draw(&game, args.ascii);

    let stdin = io::stdin();
    let mut rng = thread_rng();
    let mut lines = stdin.lock().lines();

    loop {
        prompt(&game)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["help"] => print_help(),
            ["reset"] => {
                game.reset();
                println!("new game, white to move");
                draw(&game, args.ascii);
            }
            ["moves", square] => show_moves(&mut game, *square),
            [from, to] => {
                let (from, to) = (*from, *to);
                if play(&mut game, from, to, args.ascii) {
                    maybe_random_reply(&mut game, &mut rng, args.random_black, args.ascii);
                }
            }
            [word] if word.len() == 4 => {
                let (from, to) = word.split_at(2);
                if play(&mut game, from, to, args.ascii) {
                    maybe_random_reply(&mut game, &mut rng, args.random_black, args.ascii);
                }
            }
            _ => println!("unrecognized input, type `help` for commands"),
        }
    }
    Ok(())
}

fn prompt(game: &Game) -> io::Result<()> {
    match game.status() {
        GameStatus::InProgress => print!("{}> ", game.side_to_move().to_human()),
        GameStatus::GameOver { winner } => print!("{} won, `reset` or `quit`> ", winner.to_human()),
    }
    io::stdout().flush()
}

fn print_help() {
    println!("  e2 e4 (or e2e4)  move the piece on e2 to e4");
    println!("  moves e2         show every square the piece on e2 may go to");
    println!("  reset            start over from the standard position");
    println!("  quit             leave");
}

fn draw(game: &Game, ascii: bool) {
    let board = game.board();
    if ascii {
        println!("{}", board.draw_board_ascii());
    } else {
        println!("{}", board.draw_board());
    }
}

fn show_moves(game: &mut Game, square: &str) {
    let Some(from) = Square::from_algebraic(square) else {
        println!("`{square}` is not a square, use file+rank like e2");
        return;
    };
    match game.select_square(from.row, from.col) {
        SelectionResult::Selected {
            piece,
            destinations,
            ..
        } => {
            if destinations.is_empty() {
                println!("the {} on {} has nowhere to go", piece.kind.to_human(), square);
            } else {
                let listed: Vec<String> = destinations
                    .iter()
                    .map(|d| {
                        let mut s = d.square.to_algebraic();
                        if d.unsafe_for_king {
                            s.push('!');
                        } else if d.capture {
                            s.push('x');
                        }
                        s
                    })
                    .collect();
                println!(
                    "{} {}: {}  (x capture, ! unsafe for the king)",
                    piece.kind.to_human(),
                    square,
                    listed.join(" ")
                );
            }
            // highlighting only; free the selection for the actual move
            game.clear_selection();
        }
        SelectionResult::Ignored => {
            println!("no {} piece on {square}", game.side_to_move().to_human())
        }
    }
}

/// Run one select-then-attempt round. Returns true when a move was applied.
fn play(game: &mut Game, from: &str, to: &str, ascii: bool) -> bool {
    let (Some(from_sq), Some(to_sq)) = (Square::from_algebraic(from), Square::from_algebraic(to))
    else {
        println!("squares are file+rank like e2");
        return false;
    };
    if game.status() != GameStatus::InProgress {
        println!("the game is over, `reset` to play again");
        return false;
    }
    if let SelectionResult::Ignored = game.select_square(from_sq.row, from_sq.col) {
        println!("no {} piece on {from}", game.side_to_move().to_human());
        return false;
    }
    let outcome = game.attempt_move(to_sq.row, to_sq.col);
    report_outcome(game, outcome, ascii)
}

fn report_outcome(game: &Game, outcome: MoveOutcome, ascii: bool) -> bool {
    match outcome {
        MoveOutcome::Rejected => {
            println!("illegal move");
            false
        }
        MoveOutcome::KingCaptured { winner } => {
            draw(game, ascii);
            println!("{} wins, the king is captured!", winner.to_human());
            false
        }
        MoveOutcome::Applied(applied) => {
            println!("{}", applied.to_human());
            draw(game, ascii);
            if let Some(side) = applied.checked {
                println!("{} king is in check!", side.to_human());
            }
            true
        }
    }
}

/// When `--random-black` is on and it is black's turn, answer with a
/// uniformly random legal move.
fn maybe_random_reply(game: &mut Game, rng: &mut ThreadRng, enabled: bool, ascii: bool) {
    if !enabled || game.status() != GameStatus::InProgress || game.side_to_move() != Color::Black {
        return;
    }
    let moves = random_candidates(game);
    let Some(&(from, to)) = moves.choose(rng) else {
        println!("black has no legal move to play");
        return;
    };
    game.select_square(from.row, from.col);
    let outcome = game.attempt_move(to.row, to.col);
    println!("black replies {} {}", from.to_algebraic(), to.to_algebraic());
    report_outcome(game, outcome, ascii);
}

/// Every (from, to) the side to move could play right now.
fn random_candidates(game: &Game) -> Vec<(Square, Square)> {
    let board = game.board();
    let mut moves = Vec::new();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let from = Square { row, col };
            if board
                .piece_at(from)
                .is_some_and(|p| p.color == board.active_color())
            {
                for destination in board.legal_destinations(from) {
                    if !destination.unsafe_for_king {
                        moves.push((from, destination.square));
                    }
                }
            }
        }
    }
    moves
}
