#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn from_char(c: char) -> Color {
        if c == 'w' {
            Color::White
        } else if c == 'b' {
            Color::Black
        } else {
            panic!("Color string must be either `b` or `w`.")
        }
    }

    pub fn other_color(&self) -> Color {
        if *self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row holding this side's back rank at the start of the game.
    pub fn home_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row this side's pawns start on.
    pub fn pawn_start_row(&self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row delta of a single pawn push for this side.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row where this side's pawns promote.
    pub fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Square this side's king starts the game on.
    pub fn king_home(&self) -> Square {
        Square {
            row: self.home_row(),
            col: 4,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub fn from_char(c: char) -> PieceKind {
        match c.to_lowercase().next().unwrap() {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            other => panic!("Unrecognized piece kind {other}."),
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}

/// A board coordinate. Row 0 is black's back rank, row 7 is white's,
/// col 0 is the queenside edge.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Checked constructor; `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn offset(&self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Parse "e2"-style coordinates. Lenient: user input flows through here,
    /// so malformed strings come back as `None` rather than panicking.
    pub fn from_algebraic(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
            return None;
        }
        let col = file_char as u8 - b'a';
        let rank = rank_char as u8 - b'0';
        Some(Square { row: 8 - rank, col })
    }

    pub fn to_algebraic(&self) -> String {
        format!("{}{}", (self.col + b'a') as char, 8 - self.row)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn from_char(c: char) -> Piece {
        let color = if c.is_uppercase() {
            Color::White
        } else if c.is_lowercase() {
            Color::Black
        } else {
            panic!("Piece char must be either upper or lowercase.")
        };
        Piece {
            color,
            kind: PieceKind::from_char(c),
        }
    }

    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.to_char(),
            Color::Black => self.kind.to_char().to_ascii_lowercase(),
        }
    }

    pub fn to_symbol(&self) -> &str {
        let is_white = self.color == Color::White;
        match self.kind {
            PieceKind::Pawn => {
                if is_white {
                    "♙"
                } else {
                    "♟︎"
                }
            }
            PieceKind::Rook => {
                if is_white {
                    "♖"
                } else {
                    "♜"
                }
            }
            PieceKind::Knight => {
                if is_white {
                    "♘"
                } else {
                    "♞"
                }
            }
            PieceKind::Bishop => {
                if is_white {
                    "♗"
                } else {
                    "♝"
                }
            }
            PieceKind::Queen => {
                if is_white {
                    "♕"
                } else {
                    "♛"
                }
            }
            PieceKind::King => {
                if is_white {
                    "♔"
                } else {
                    "♚"
                }
            }
        }
    }
}

/// Which rook a castle goes toward.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// The rook's starting corner for this wing.
    pub fn rook_home(&self, color: Color) -> Square {
        Square {
            row: color.home_row(),
            col: match self {
                CastleSide::Kingside => 7,
                CastleSide::Queenside => 0,
            },
        }
    }

    /// Where the rook lands after the castle.
    pub fn rook_destination(&self, color: Color) -> Square {
        Square {
            row: color.home_row(),
            col: match self {
                CastleSide::Kingside => 5,
                CastleSide::Queenside => 3,
            },
        }
    }

    /// Columns strictly between king and rook; all must be empty to castle.
    pub fn between_cols(&self) -> &'static [u8] {
        match self {
            CastleSide::Kingside => &[5, 6],
            CastleSide::Queenside => &[1, 2, 3],
        }
    }

    /// Columns the king occupies or crosses: origin, intermediate, destination.
    /// None may be attacked.
    pub fn king_path_cols(&self) -> [u8; 3] {
        match self {
            CastleSide::Kingside => [4, 5, 6],
            CastleSide::Queenside => [4, 3, 2],
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::Kingside => "kingside",
            Self::Queenside => "queenside",
        }
    }
}

/// A highlightable destination for the currently selected piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Destination {
    pub square: Square,
    /// An opposing piece sits on the square.
    pub capture: bool,
    /// Set only for king one-step squares that pass the geometry but would
    /// leave the king attacked; shown to the player, never playable.
    pub unsafe_for_king: bool,
}

/// Record of a committed move, as reported back to the caller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct AppliedMove {
    /// The piece now standing on `to` (the queen, after a promotion).
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub castled: Option<CastleSide>,
    pub promoted: bool,
    /// The side whose king is attacked now that the move is on the board;
    /// always the side that moves next.
    pub checked: Option<Color>,
}

impl AppliedMove {
    pub fn to_human(&self) -> String {
        if let Some(side) = self.castled {
            return format!("{} castles {}", self.piece.color.to_human(), side.to_human());
        }
        let maybe_capture_str = match self.captured {
            Some(p) => format!(" capturing {} {}", p.color.to_human(), p.kind.to_human()),
            None => "".to_string(),
        };
        let maybe_promotion_str = if self.promoted {
            " promoting to queen".to_string()
        } else {
            "".to_string()
        };
        format!(
            "{} moves {} from {} to {}{}{}",
            self.piece.color.to_human(),
            if self.promoted {
                "pawn"
            } else {
                self.piece.kind.to_human()
            },
            self.from.to_algebraic(),
            self.to.to_algebraic(),
            maybe_capture_str,
            maybe_promotion_str,
        )
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameStatus {
    InProgress,
    /// A legal move landed on the opposing king. No moves are accepted in
    /// this state until an explicit reset.
    GameOver { winner: Color },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_char() {
        assert_eq!(Color::from_char('w'), Color::White);
        assert_eq!(Color::from_char('b'), Color::Black);
    }

    #[test]
    #[should_panic]
    fn test_color_from_char_fail() {
        Color::from_char('g');
    }

    #[test]
    fn test_other_color() {
        assert_eq!(Color::White, Color::Black.other_color());
        assert_eq!(Color::Black, Color::White.other_color());
    }

    #[test]
    fn test_color_rows() {
        assert_eq!(Color::White.home_row(), 7);
        assert_eq!(Color::Black.home_row(), 0);
        assert_eq!(Color::White.pawn_start_row(), 6);
        assert_eq!(Color::Black.pawn_start_row(), 1);
        assert_eq!(Color::White.promotion_row(), 0);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert_eq!(Color::White.pawn_direction(), -1);
        assert_eq!(Color::Black.pawn_direction(), 1);
    }

    #[test]
    fn test_piece_kind_from_char() {
        assert_eq!(PieceKind::from_char('p'), PieceKind::Pawn);
        assert_eq!(PieceKind::from_char('R'), PieceKind::Rook);
        assert_eq!(PieceKind::from_char('n'), PieceKind::Knight);
        assert_eq!(PieceKind::from_char('B'), PieceKind::Bishop);
        assert_eq!(PieceKind::from_char('Q'), PieceKind::Queen);
        assert_eq!(PieceKind::from_char('k'), PieceKind::King);
    }

    #[test]
    #[should_panic]
    fn test_piece_kind_from_char_fail() {
        PieceKind::from_char('x');
    }

    #[test]
    fn test_piece_char_round_trip() {
        for c in ['P', 'n', 'k', 'Q', 'r', 'b'] {
            assert_eq!(Piece::from_char(c).to_char(), c);
        }
    }

    #[test]
    fn test_square_new_bounds() {
        assert_eq!(Square::new(0, 0), Some(Square { row: 0, col: 0 }));
        assert_eq!(Square::new(7, 7), Some(Square { row: 7, col: 7 }));
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
    }

    #[test]
    fn test_square_offset() {
        let sq = Square { row: 6, col: 4 };
        assert_eq!(sq.offset(-1, 0), Some(Square { row: 5, col: 4 }));
        assert_eq!(sq.offset(1, 3), Some(Square { row: 7, col: 7 }));
        assert_eq!(sq.offset(2, 0), None);
        assert_eq!(Square { row: 0, col: 0 }.offset(-1, 0), None);
    }

    #[test]
    fn test_square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square { row: 7, col: 0 }));
        assert_eq!(Square::from_algebraic("h8"), Some(Square { row: 0, col: 7 }));
        assert_eq!(Square::from_algebraic("e2"), Some(Square { row: 6, col: 4 }));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a"), None);
        assert_eq!(Square::from_algebraic("a1b"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn test_square_algebraic_round_trip() {
        for row in 0..8 {
            for col in 0..8 {
                let sq = Square { row, col };
                assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
            }
        }
    }

    #[test]
    fn test_castle_side_geometry() {
        let kingside = CastleSide::Kingside;
        let queenside = CastleSide::Queenside;
        assert_eq!(kingside.rook_home(Color::White), Square { row: 7, col: 7 });
        assert_eq!(
            kingside.rook_destination(Color::White),
            Square { row: 7, col: 5 }
        );
        assert_eq!(queenside.rook_home(Color::Black), Square { row: 0, col: 0 });
        assert_eq!(
            queenside.rook_destination(Color::Black),
            Square { row: 0, col: 3 }
        );
        assert_eq!(kingside.between_cols(), &[5, 6]);
        assert_eq!(queenside.between_cols(), &[1, 2, 3]);
    }

    #[test]
    fn test_applied_move_to_human() {
        let applied = AppliedMove {
            piece: Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            },
            from: Square::from_algebraic("e2").unwrap(),
            to: Square::from_algebraic("e4").unwrap(),
            captured: None,
            castled: None,
            promoted: false,
            checked: None,
        };
        assert_eq!(applied.to_human(), "white moves pawn from e2 to e4");

        let castle = AppliedMove {
            piece: Piece {
                color: Color::Black,
                kind: PieceKind::King,
            },
            from: Square::from_algebraic("e8").unwrap(),
            to: Square::from_algebraic("g8").unwrap(),
            captured: None,
            castled: Some(CastleSide::Kingside),
            promoted: false,
            checked: None,
        };
        assert_eq!(castle.to_human(), "black castles kingside");
    }
}
