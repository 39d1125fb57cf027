use std::fmt;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// FEN side-to-move letter.
    pub fn to_fen(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Parse a FEN side-to-move field ("w" or "b").
    pub fn from_fen(s: &str) -> Option<Self> {
        match s {
            "w" => Some(Color::White),
            "b" => Some(Color::Black),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceType
// ---------------------------------------------------------------------------

/// The six piece kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Knight,
    Bishop,
    Pawn,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Pawn,
    ];

    /// Canonical uppercase code (K, Q, R, N, B, P).
    pub fn code(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Pawn => 'P',
        }
    }

    /// Single uppercase letter for white, lowercase for black.
    pub fn to_char(self, color: Color) -> char {
        match color {
            Color::White => self.code(),
            Color::Black => self.code().to_ascii_lowercase(),
        }
    }

    /// Parse a piece letter; case decides the colour.
    pub fn from_char(c: char) -> Option<(Color, PieceType)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let piece = match c.to_ascii_uppercase() {
            'K' => PieceType::King,
            'Q' => PieceType::Queen,
            'R' => PieceType::Rook,
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'P' => PieceType::Pawn,
            _ => return None,
        };
        Some((color, piece))
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::King => write!(f, "king"),
            PieceType::Queen => write!(f, "queen"),
            PieceType::Rook => write!(f, "rook"),
            PieceType::Knight => write!(f, "knight"),
            PieceType::Bishop => write!(f, "bishop"),
            PieceType::Pawn => write!(f, "pawn"),
        }
    }
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// A square on the board, 0..63 in FEN reading order: a8 = 0, h8 = 7,
/// a1 = 56, h1 = 63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(pub u8);

impl Square {
    pub const NUM: usize = 64;

    /// Row in reading order (0 = rank 8, 7 = rank 1).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 >> 3
    }

    /// Column (0 = file a, 7 = file h).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 & 7
    }

    /// Alias for [`Square::col`].
    #[inline]
    pub fn file(self) -> u8 {
        self.col()
    }

    /// Chess rank index (0 = rank 1, 7 = rank 8).
    #[inline]
    pub fn rank(self) -> u8 {
        7 - self.row()
    }

    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Square(row * 8 + col)
    }

    #[inline]
    pub fn from_file_rank(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Square::from_row_col(7 - rank, file)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// All 64 squares in FEN reading order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// Parse algebraic notation like "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square::from_file_rank(file, rank))
        } else {
            None
        }
    }

    /// Convert to algebraic notation like "e4".
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// A piece standing on the board. `row`/`col` follow [`Square`] orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub row: u8,
    pub col: u8,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType, row: u8, col: u8) -> Self {
        Piece {
            color,
            kind,
            row,
            col,
        }
    }

    /// Piece placed on `sq`, with row/col taken from the square.
    pub fn on(sq: Square, color: Color, kind: PieceType) -> Self {
        Piece::new(color, kind, sq.row(), sq.col())
    }

    /// The square this piece claims to stand on, if its coordinates are on the board.
    pub fn square(self) -> Option<Square> {
        (self.row < 8 && self.col < 8).then(|| Square::from_row_col(self.row, self.col))
    }

    pub fn to_char(self) -> char {
        self.kind.to_char(self.color)
    }
}

// ---------------------------------------------------------------------------
// CastlingRights
// ---------------------------------------------------------------------------

/// Castling availability as four independent flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    /// Parse a FEN castling field: "-" or a non-empty subsequence of "KQkq"
    /// in that order.
    pub fn from_fen(s: &str) -> Option<Self> {
        if s == "-" {
            return Some(CastlingRights::NONE);
        }
        if s.is_empty() {
            return None;
        }
        let mut rest = s;
        let mut take = |flag: char| match rest.strip_prefix(flag) {
            Some(tail) => {
                rest = tail;
                true
            }
            None => false,
        };
        let rights = CastlingRights {
            white_kingside: take('K'),
            white_queenside: take('Q'),
            black_kingside: take('k'),
            black_queenside: take('q'),
        };
        rest.is_empty().then_some(rights)
    }

    /// Convert to FEN castling string, always in K, Q, k, q order.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }
        let mut s = String::with_capacity(4);
        for (present, flag) in [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ] {
            if present {
                s.push(flag);
            }
        }
        s
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

// ---------------------------------------------------------------------------
// FenError
// ---------------------------------------------------------------------------

/// Which numeric trailer of a FEN record failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockField {
    Halfmove,
    Fullmove,
}

impl fmt::Display for ClockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockField::Halfmove => write!(f, "halfmove clock"),
            ClockField::Fullmove => write!(f, "fullmove number"),
        }
    }
}

/// Shape problems detected before any chess-specific check.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarFault {
    #[error("expected 4 or 6 space-separated fields, got {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} is empty")]
    EmptyRank { rank: u8 },

    #[error("invalid character '{character}' at rank {rank}")]
    InvalidCharacter { character: char, rank: u8 },

    #[error("invalid side to move: '{0}'")]
    SideToMove(String),

    #[error("invalid castling field: '{0}'")]
    Castling(String),

    #[error("invalid en passant square: '{0}'")]
    EnPassant(String),

    #[error("piece stored on {square} claims row {row}, column {col}")]
    MisplacedPiece { square: Square, row: u8, col: u8 },
}

/// Domain errors for FEN validation, parsing and serialization.
///
/// Ranks are reported 1-indexed in chess convention (8 = top rank).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("invalid FEN: {0}")]
    Grammar(#[from] GrammarFault),

    #[error("must have exactly one king per side (found {white} white, {black} black)")]
    KingCount { white: usize, black: usize },

    #[error("rank {rank} does not sum to 8 squares")]
    RankSum { rank: u8 },

    #[error("pawn at rank {rank}")]
    PawnPlacement { rank: u8 },

    #[error("invalid {field}: '{value}'")]
    NumericField { field: ClockField, value: String },
}

impl FenError {
    /// Stable machine-readable code for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FenError::Grammar(_) => "GRAMMAR",
            FenError::KingCount { .. } => "KING_COUNT",
            FenError::RankSum { .. } => "RANK_SUM",
            FenError::PawnPlacement { .. } => "PAWN_PLACEMENT",
            FenError::NumericField { .. } => "NUMERIC_FIELD",
        }
    }

    /// The 1-indexed rank the error points at, where there is one.
    pub fn rank(&self) -> Option<u8> {
        match self {
            FenError::RankSum { rank } | FenError::PawnPlacement { rank } => Some(*rank),
            FenError::Grammar(GrammarFault::EmptyRank { rank })
            | FenError::Grammar(GrammarFault::InvalidCharacter { rank, .. }) => Some(*rank),
            _ => None,
        }
    }

    /// The offending character, for invalid-character errors.
    pub fn character(&self) -> Option<char> {
        match self {
            FenError::Grammar(GrammarFault::InvalidCharacter { character, .. }) => {
                Some(*character)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
