//! Move legality, attack detection and destination enumeration.
//!
//! Everything here reads the board; the only mutation is the king-safety
//! what-if, which runs on a throwaway copy of the board.

use itertools::iproduct;

use crate::board::Board;
use crate::types::{CastleSide, Color, Destination, Piece, PieceKind, Square};

impl Board {
    /// May the side to move play `from` → `to`?
    ///
    /// The precondition of the applier: `apply_move` trusts this verdict and
    /// re-checks nothing.
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        match self.piece_at(from) {
            Some(piece) if piece.color == self.active_color() => {
                self.move_allowed(piece, from, to, piece.color)
            }
            _ => false,
        }
    }

    /// The per-piece movement rule, parameterised on the acting side so the
    /// attack scan can reuse it for either color regardless of whose turn it
    /// is. The friendly-capture rejection runs first for every piece kind;
    /// it also disposes of `from == to`, since the mover itself occupies
    /// that square.
    fn move_allowed(&self, piece: Piece, from: Square, to: Square, acting: Color) -> bool {
        if self.piece_at(to).is_some_and(|t| t.color == acting) {
            return false;
        }
        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        match piece.kind {
            PieceKind::Pawn => self.pawn_move_allowed(piece, from, to, dr, dc),
            PieceKind::Rook => (dr == 0 || dc == 0) && self.path_clear(from, to),
            PieceKind::Knight => {
                (dr.abs() == 2 && dc.abs() == 1) || (dr.abs() == 1 && dc.abs() == 2)
            }
            PieceKind::Bishop => dr.abs() == dc.abs() && self.path_clear(from, to),
            PieceKind::Queen => {
                (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && self.path_clear(from, to)
            }
            PieceKind::King => self.king_move_allowed(piece, from, to, dr, dc),
        }
    }

    fn pawn_move_allowed(&self, piece: Piece, from: Square, to: Square, dr: i8, dc: i8) -> bool {
        let dir = piece.color.pawn_direction();
        let target = self.piece_at(to);
        if dc == 0 && dr == dir {
            return target.is_none();
        }
        if dc == 0 && dr == 2 * dir && from.row == piece.color.pawn_start_row() {
            let mid = Square {
                row: (from.row as i8 + dir) as u8,
                col: from.col,
            };
            return target.is_none() && self.piece_at(mid).is_none();
        }
        if dc.abs() == 1 && dr == dir {
            // diagonal steps are captures only; an empty diagonal is illegal
            return target.is_some_and(|t| t.color != piece.color);
        }
        false
    }

    /// One step in any direction, provided the destination is not attacked
    /// once the king stands there; failing that, a two-square castle.
    fn king_move_allowed(&self, piece: Piece, from: Square, to: Square, dr: i8, dc: i8) -> bool {
        if dr.abs() <= 1 && dc.abs() <= 1 {
            return self.king_step_safe(piece, from, to);
        }
        self.castle_allowed(piece, from, dr, dc)
    }

    /// Would the king be safe standing on `to`? Evaluated on a copy of the
    /// board with the king already relocated, so a capture on `to` is part
    /// of the hypothesis and the live board is never touched.
    fn king_step_safe(&self, king: Piece, from: Square, to: Square) -> bool {
        let probe = self.with_piece_moved(from, to);
        !probe.is_attacked(to, king.color.other_color())
    }

    fn castle_allowed(&self, king: Piece, from: Square, dr: i8, dc: i8) -> bool {
        if dr != 0 || dc.abs() != 2 {
            return false;
        }
        let color = king.color;
        if self.king_moved(color) || from != color.king_home() {
            return false;
        }
        let side = if dc > 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        if self.rook_moved(color, side) {
            return false;
        }
        let rook_home = side.rook_home(color);
        if !self
            .piece_at(rook_home)
            .is_some_and(|p| p.color == color && p.kind == PieceKind::Rook)
        {
            return false;
        }
        if !side.between_cols().iter().all(|&col| {
            self.piece_at(Square { row: from.row, col }).is_none()
        }) {
            return false;
        }
        let enemy = color.other_color();
        side.king_path_cols()
            .iter()
            .all(|&col| !self.is_attacked(Square { row: from.row, col }, enemy))
    }

    /// Every square strictly between `from` and `to` is empty. The two
    /// squares must share a rank, file or diagonal; the destination itself
    /// is the capture rule's business, not ours.
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.row as i8 - from.row as i8).signum();
        let dc = (to.col as i8 - from.col as i8).signum();
        let steps = (to.row as i8 - from.row as i8)
            .abs()
            .max((to.col as i8 - from.col as i8).abs());
        (1..steps).all(|i| {
            let between = Square {
                row: (from.row as i8 + dr * i) as u8,
                col: (from.col as i8 + dc * i) as u8,
            };
            self.piece_at(between).is_none()
        })
    }

    /// Could any piece of `by` move onto `square` right now?
    ///
    /// Non-king pieces answer through the shared movement rule, acting as
    /// `by` whatever the stored turn says. The king contributes through a
    /// plain adjacency test instead: routing it through the king rule would
    /// re-enter the safety simulation, and a king only ever threatens its
    /// eight neighbours anyway.
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        iproduct!(0..8u8, 0..8u8).any(|(row, col)| {
            let from = Square { row, col };
            match self.piece_at(from) {
                Some(piece) if piece.color == by => {
                    if piece.kind == PieceKind::King {
                        let dr = (square.row as i8 - from.row as i8).abs();
                        let dc = (square.col as i8 - from.col as i8).abs();
                        dr.max(dc) == 1
                    } else {
                        self.move_allowed(piece, from, square, by)
                    }
                }
                _ => false,
            }
        })
    }

    /// Is `side`'s king attacked by the opponent?
    pub fn is_king_in_check(&self, side: Color) -> bool {
        match self.find_king(side) {
            Some(square) => self.is_attacked(square, side.other_color()),
            None => false,
        }
    }

    /// All destinations worth highlighting for the piece on `from`, when it
    /// belongs to the side to move. Playable squares come back with
    /// `unsafe_for_king: false`; a selected king additionally reports the
    /// one-step squares that only fail its safety test, flagged, so the
    /// caller can colour them as threatened.
    pub fn legal_destinations(&self, from: Square) -> Vec<Destination> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        if piece.color != self.active_color() {
            return Vec::new();
        }

        let mut destinations = Vec::new();
        for (row, col) in iproduct!(0..8u8, 0..8u8) {
            let to = Square { row, col };
            if self.move_allowed(piece, from, to, piece.color) {
                destinations.push(Destination {
                    square: to,
                    capture: self.piece_at(to).is_some(),
                    unsafe_for_king: false,
                });
            } else if piece.kind == PieceKind::King {
                let dr = to.row as i8 - from.row as i8;
                let dc = to.col as i8 - from.col as i8;
                let one_step = dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0);
                let own_target = self.piece_at(to).is_some_and(|t| t.color == piece.color);
                if one_step && !own_target {
                    // geometry passed, so only the safety test failed
                    destinations.push(Destination {
                        square: to,
                        capture: self.piece_at(to).is_some(),
                        unsafe_for_king: true,
                    });
                }
            }
        }
        destinations
    }
}
