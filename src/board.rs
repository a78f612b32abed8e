use itertools::iproduct;
use once_cell::sync::Lazy;

use crate::types::{AppliedMove, CastleSide, Color, Piece, PieceKind, Square};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

static INITIAL_BOARD: Lazy<Board> = Lazy::new(|| Board::from_fen(STARTING_POSITION_FEN));

/// The authoritative game state: square occupants, side to move, and the
/// historical moved-flags that gate castling. Mutated only by `apply_move`;
/// every hypothetical evaluation runs on a copy.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    active_color: Color,
    // Monotonic once the game is running; only a full reset clears them.
    king_moved_white: bool,
    king_moved_black: bool,
    rook_moved_kingside_white: bool,
    rook_moved_queenside_white: bool,
    rook_moved_kingside_black: bool,
    rook_moved_queenside_black: bool,
}

impl Board {
    /// Standard starting position, white to move, nothing moved yet.
    pub fn new() -> Board {
        INITIAL_BOARD.clone()
    }

    /// Build a board from a FEN string. The placement, side-to-move and
    /// castling fields are honored; the en-passant and clock fields are
    /// accepted and ignored since neither is tracked here.
    ///
    /// Panics on malformed input: this is for position literals in code,
    /// benches and the `--fen` option, not for arbitrary user input.
    pub fn from_fen(fen_string: &str) -> Board {
        if fen_string.chars().filter(|c| *c == ' ').count() != 5 {
            panic!("Fen string must have 6 fields, space delimited")
        };
        let parts: Vec<&str> = fen_string.splitn(6, ' ').collect();

        let piece_data = parts[0];
        let mut grid: [[Option<Piece>; 8]; 8] = [[None; 8]; 8];
        let mut row: usize = 0;
        let mut col: usize = 0;
        for piece_char in piece_data.chars() {
            if piece_char.is_alphabetic() {
                if row > 7 || col > 7 {
                    panic!("Piece placement runs off the board.");
                }
                grid[row][col] = Some(Piece::from_char(piece_char));
                col += 1;
            } else if piece_char.is_numeric() {
                col += (piece_char as u8 - b'0') as usize;
            } else if piece_char == '/' {
                row += 1;
                col = 0;
            } else {
                panic!("Unexpected char {piece_char} in position string.");
            }
        }

        let active_color = Color::from_char(parts[1].chars().next().unwrap());

        // FEN only records remaining castle rights, so reconstruct the moved
        // flags from them: a missing right marks that rook as moved, and a
        // side with no rights at all gets its king marked as moved.
        let castling = parts[2];
        let rook_moved_kingside_white = !castling.contains('K');
        let rook_moved_queenside_white = !castling.contains('Q');
        let rook_moved_kingside_black = !castling.contains('k');
        let rook_moved_queenside_black = !castling.contains('q');

        Board {
            grid,
            active_color,
            king_moved_white: rook_moved_kingside_white && rook_moved_queenside_white,
            king_moved_black: rook_moved_kingside_black && rook_moved_queenside_black,
            rook_moved_kingside_white,
            rook_moved_queenside_white,
            rook_moved_kingside_black,
            rook_moved_queenside_black,
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row as usize][square.col as usize]
    }

    /// Get the color of the side to move
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.king_moved_white,
            Color::Black => self.king_moved_black,
        }
    }

    pub fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.rook_moved_kingside_white,
            (Color::White, CastleSide::Queenside) => self.rook_moved_queenside_white,
            (Color::Black, CastleSide::Kingside) => self.rook_moved_kingside_black,
            (Color::Black, CastleSide::Queenside) => self.rook_moved_queenside_black,
        }
    }

    fn set_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.king_moved_white = true,
            Color::Black => self.king_moved_black = true,
        }
    }

    fn set_rook_moved(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => self.rook_moved_kingside_white = true,
            (Color::White, CastleSide::Queenside) => self.rook_moved_queenside_white = true,
            (Color::Black, CastleSide::Kingside) => self.rook_moved_kingside_black = true,
            (Color::Black, CastleSide::Queenside) => self.rook_moved_queenside_black = true,
        }
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        iproduct!(0..8u8, 0..8u8)
            .map(|(row, col)| Square { row, col })
            .find(|sq| {
                self.piece_at(*sq)
                    .is_some_and(|p| p.color == color && p.kind == PieceKind::King)
            })
    }

    /// A copy of this board with the occupant of `from` placed on `to`,
    /// flags and turn untouched. The what-if board for king-safety tests:
    /// the live board never changes, so there is no restore path to get
    /// wrong, whatever the attack query does.
    pub(crate) fn with_piece_moved(&self, from: Square, to: Square) -> Board {
        let mut probe = self.clone();
        let piece = probe.grid[from.row as usize][from.col as usize].take();
        probe.grid[to.row as usize][to.col as usize] = piece;
        probe
    }

    /// Commit a move that was already confirmed legal; no legality re-check
    /// happens here. Handles the castle rook, the moved flags, queen
    /// promotion and the turn flip, then reports whether the side now to
    /// move is in check.
    pub fn apply_move(&mut self, from: Square, to: Square) -> AppliedMove {
        let mut piece = self.grid[from.row as usize][from.col as usize]
            .take()
            .expect("apply_move called with an empty origin square");
        let mover = piece.color;

        let mut castled = None;
        if piece.kind == PieceKind::King && from.row == to.row && from.col.abs_diff(to.col) == 2 {
            let side = if to.col > from.col {
                CastleSide::Kingside
            } else {
                CastleSide::Queenside
            };
            let rook_home = side.rook_home(mover);
            let rook_to = side.rook_destination(mover);
            let rook = self.grid[rook_home.row as usize][rook_home.col as usize].take();
            self.grid[rook_to.row as usize][rook_to.col as usize] = rook;
            self.set_rook_moved(mover, side);
            self.set_king_moved(mover);
            castled = Some(side);
        } else {
            match piece.kind {
                PieceKind::King => self.set_king_moved(mover),
                PieceKind::Rook if from.row == mover.home_row() => {
                    if from.col == 0 {
                        self.set_rook_moved(mover, CastleSide::Queenside);
                    } else if from.col == 7 {
                        self.set_rook_moved(mover, CastleSide::Kingside);
                    }
                }
                _ => {}
            }
        }

        let mut promoted = false;
        if piece.kind == PieceKind::Pawn && to.row == mover.promotion_row() {
            piece = Piece {
                color: mover,
                kind: PieceKind::Queen,
            };
            promoted = true;
        }

        let captured = self.grid[to.row as usize][to.col as usize].replace(piece);

        self.active_color = mover.other_color();
        let checked = if self.is_king_in_check(self.active_color) {
            Some(self.active_color)
        } else {
            None
        };

        AppliedMove {
            piece,
            from,
            to,
            captured,
            castled,
            promoted,
            checked,
        }
    }

    pub fn draw_board(&self) -> String {
        self.render(|p| p.to_symbol().to_string())
    }

    pub fn draw_board_ascii(&self) -> String {
        self.render(|p| p.to_char().to_string())
    }

    fn render(&self, show: impl Fn(&Piece) -> String) -> String {
        let mut string = String::new();
        for row in 0..8u8 {
            string.push_str(&format!("{} ", 8 - row));
            for col in 0..8u8 {
                let square = Square { row, col };
                match self.piece_at(square) {
                    Some(p) => string.push_str(&format!(" {}", show(&p))),
                    None => string.push_str(" ."),
                }
            }
            string.push('\n');
        }
        string.push_str("   a b c d e f g h\n");
        string
    }

    pub fn draw_to_terminal(&self) {
        println!("{}", self.draw_board());
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
