use chrono::prelude::*;

use crate::board::Board;
use crate::types::{AppliedMove, Color, Destination, GameStatus, Piece, PieceKind, Square};

/// Answer to a selection attempt.
#[derive(Debug, PartialEq, Clone)]
pub enum SelectionResult {
    /// The square held a piece of the side to move; it is now selected and
    /// these are its highlightable destinations.
    Selected {
        piece: Piece,
        from: Square,
        destinations: Vec<Destination>,
    },
    /// Nothing happened: empty square, opponent's piece, coordinates off
    /// the board, a selection already pending, or the game is over.
    Ignored,
}

/// Answer to a move attempt.
#[derive(Debug, PartialEq, Clone)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    /// The destination held the opposing king: the game ends on the spot,
    /// the board is left as it stands and the turn does not flip.
    KingCaptured { winner: Color },
    Rejected,
}

/// One session of play: the board plus the transient selection and the
/// terminal status. The presentation layer talks to this and nothing else.
pub struct Game {
    board: Board,
    selection: Option<(Piece, Square)>,
    status: GameStatus,
    started_at: DateTime<Local>,
}

impl Game {
    pub fn new() -> Self {
        Game::with_board(Board::new())
    }

    pub fn from_fen(fen: &str) -> Self {
        Game::with_board(Board::from_fen(fen))
    }

    fn with_board(board: Board) -> Self {
        Self {
            board,
            selection: None,
            status: GameStatus::InProgress,
            started_at: Local::now(),
        }
    }

    /// Read access for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.board.active_color()
    }

    pub fn selection(&self) -> Option<(Piece, Square)> {
        self.selection
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Select the piece on (`row`, `col`) if it belongs to the side to move
    /// and nothing is selected yet; otherwise a no-op.
    pub fn select_square(&mut self, row: u8, col: u8) -> SelectionResult {
        if self.status != GameStatus::InProgress || self.selection.is_some() {
            return SelectionResult::Ignored;
        }
        let Some(square) = Square::new(row, col) else {
            return SelectionResult::Ignored;
        };
        match self.board.piece_at(square) {
            Some(piece) if piece.color == self.board.active_color() => {
                self.selection = Some((piece, square));
                SelectionResult::Selected {
                    piece,
                    from: square,
                    destinations: self.board.legal_destinations(square),
                }
            }
            _ => SelectionResult::Ignored,
        }
    }

    /// Try to play the selected piece to (`row`, `col`). The selection is
    /// consumed whatever happens, legal or not.
    pub fn attempt_move(&mut self, row: u8, col: u8) -> MoveOutcome {
        let selection = self.selection.take();
        if self.status != GameStatus::InProgress {
            return MoveOutcome::Rejected;
        }
        let Some((_, from)) = selection else {
            return MoveOutcome::Rejected;
        };
        let Some(to) = Square::new(row, col) else {
            return MoveOutcome::Rejected;
        };
        if !self.board.is_legal(from, to) {
            return MoveOutcome::Rejected;
        }
        if self
            .board
            .piece_at(to)
            .is_some_and(|p| p.kind == PieceKind::King)
        {
            // capturing the king ends the game in place of mate detection
            let winner = self.board.active_color();
            self.status = GameStatus::GameOver { winner };
            return MoveOutcome::KingCaptured { winner };
        }
        MoveOutcome::Applied(self.board.apply_move(from, to))
    }

    /// Drop any pending selection, for callers that let the player change
    /// their mind before naming a destination.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Back to the standard starting position: fresh board, flags cleared,
    /// white to move, no selection, new start time.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.selection = None;
        self.status = GameStatus::InProgress;
        self.started_at = Local::now();
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
