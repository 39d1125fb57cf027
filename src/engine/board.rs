//! Mailbox chess position as read from and written to FEN.
//!
//! `Position` stores piece placement as a 64-slot array of optional pieces
//! (indexed by [`Square`], a8 = 0), side to move, castling flags, en-passant
//! square, move counters, and a cache of both king squares.

use crate::engine::fen;
use crate::engine::types::{CastlingRights, Color, FenError, Piece, PieceType, Square};

/// A complete chess position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// Piece on each square, `None` for empty squares.
    pub placement: [Option<Piece>; Square::NUM],

    /// Whose turn it is.
    pub turn: Color,

    /// Castling availability (K/Q/k/q).
    pub castling: CastlingRights,

    /// En-passant target square (the square *behind* the double-pushed pawn).
    pub en_passant: Option<Square>,

    /// Half-move clock for the 50-move rule.
    pub halfmove_clock: u32,

    /// Full-move number (starts at 1, incremented after Black moves).
    pub fullmove_number: u32,

    /// Cached white king square, derived from `placement`.
    pub white_king: Option<Square>,

    /// Cached black king square, derived from `placement`.
    pub black_king: Option<Square>,
}

// ---------------------------------------------------------------------------
// Construction helpers
// ---------------------------------------------------------------------------

impl Position {
    /// Create an empty board with no pieces.
    pub fn empty() -> Self {
        Position {
            placement: [None; Square::NUM],
            turn: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            white_king: None,
            black_king: None,
        }
    }

    /// Standard starting position.
    pub fn starting() -> Self {
        Self::from_fen(fen::STARTING_FEN).expect("starting FEN is always valid")
    }

    /// Parse a FEN string into a `Position`. See [`fen::parse`].
    pub fn from_fen(text: &str) -> Result<Self, FenError> {
        fen::parse(text)
    }

    /// Export the position as a FEN string. See [`fen::serialize`].
    pub fn to_fen(&self) -> Result<String, FenError> {
        fen::serialize(self)
    }

    // -----------------------------------------------------------------------
    // Piece manipulation
    // -----------------------------------------------------------------------

    /// Place a piece on the square given by its own coordinates, replacing
    /// whatever stood there. Returns the replaced piece.
    ///
    /// # Panics
    /// If the piece's row or column is outside the board.
    pub fn put_piece(&mut self, piece: Piece) -> Option<Piece> {
        let sq = piece
            .square()
            .unwrap_or_else(|| panic!("piece off the board: {piece:?}"));
        let previous = self.remove_piece(sq);
        self.placement[sq.index()] = Some(piece);
        if piece.kind == PieceType::King {
            match piece.color {
                Color::White => self.white_king = Some(sq),
                Color::Black => self.black_king = Some(sq),
            }
        }
        previous
    }

    /// Clear a square, returning the piece that stood there.
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let previous = self.placement[sq.index()].take();
        if self.white_king == Some(sq) {
            self.white_king = None;
        }
        if self.black_king == Some(sq) {
            self.black_king = None;
        }
        previous
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square?
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.placement[sq.index()]
    }

    /// Occupied squares with their pieces, in FEN reading order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.placement.iter().flatten().count()
    }

    /// Cached king square for the given colour.
    #[inline]
    pub fn king_sq(&self, color: Color) -> Option<Square> {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    // -----------------------------------------------------------------------
    // Board display (8×8 text grid)
    // -----------------------------------------------------------------------

    /// Render the board as an 8-line string (rank 8 at top), useful for debugging.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for row in 0..8u8 {
            s.push((b'8' - row) as char);
            s.push(' ');
            for col in 0..8u8 {
                let ch = match self.piece_at(Square::from_row_col(row, col)) {
                    Some(piece) => piece.to_char(),
                    None => '.',
                };
                s.push(ch);
                if col < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  a b c d e f g h");
        s
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
