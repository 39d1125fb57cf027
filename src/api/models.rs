use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::types::{CastlingRights, Color, FenError, Piece, PieceType, Square};
use crate::engine::{LegalMoves, Position, fen};

use super::errors::ApiError;

// ---------------------------------------------------------------------------
// Request models
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FenRequest {
    pub fen: String,
}

/// An evaluation as sent by an engine: a bare number or text such as "-M3".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EvaluationInput {
    Number(f64),
    Text(String),
}

impl EvaluationInput {
    pub fn to_text(&self) -> String {
        match self {
            EvaluationInput::Number(n) => n.to_string(),
            EvaluationInput::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalRequest {
    pub evaluation: Option<EvaluationInput>,
}

/// Board data submitted for serialization. `fen`, `whiteKing`, `blackKing`
/// and `legalMoves` may be present but are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRequest {
    pub turn: String,
    #[serde(default)]
    pub en_passant: Option<String>,
    #[serde(default)]
    pub half_move: u32,
    #[serde(default = "default_full_move")]
    pub full_move: u32,
    #[serde(default)]
    pub white_short_castle: bool,
    #[serde(default)]
    pub white_long_castle: bool,
    #[serde(default)]
    pub black_short_castle: bool,
    #[serde(default)]
    pub black_long_castle: bool,
    #[serde(default)]
    pub pieces: BTreeMap<String, PieceInfo>,
}

fn default_full_move() -> u32 {
    1
}

impl BoardRequest {
    /// Build a position from submitted board data. Pieces are stored under
    /// the square they are keyed by, with their own row/col kept as sent.
    pub fn into_position(self) -> Result<Position, ApiError> {
        let mut pos = Position::empty();
        pos.turn = Color::from_fen(&self.turn)
            .ok_or_else(|| ApiError::InvalidRequest(format!("invalid turn: {}", self.turn)))?;
        pos.castling = CastlingRights {
            white_kingside: self.white_short_castle,
            white_queenside: self.white_long_castle,
            black_kingside: self.black_short_castle,
            black_queenside: self.black_long_castle,
        };
        pos.en_passant = match self.en_passant.as_deref() {
            None | Some("-") => None,
            Some(name) => Some(parse_square(name)?),
        };
        pos.halfmove_clock = self.half_move;
        pos.fullmove_number = self.full_move;

        for (name, info) in self.pieces {
            let sq = parse_square(&name)?;
            let piece = info.to_piece()?;
            if piece.kind == PieceType::King {
                match piece.color {
                    Color::White => pos.white_king = Some(sq),
                    Color::Black => pos.black_king = Some(sq),
                }
            }
            pos.placement[sq.index()] = Some(piece);
        }
        Ok(pos)
    }
}

fn parse_square(name: &str) -> Result<Square, ApiError> {
    Square::from_algebraic(name)
        .ok_or_else(|| ApiError::InvalidRequest(format!("invalid square: {name}")))
}

// ---------------------------------------------------------------------------
// Response models
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub engine: String,
    pub uptime: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PieceInfo {
    /// "w" or "b".
    pub color: String,
    /// Uppercase piece code: K, Q, R, N, B or P.
    pub rank: String,
    pub row: u8,
    pub col: u8,
}

impl PieceInfo {
    pub fn from_piece(piece: Piece) -> Self {
        PieceInfo {
            color: piece.color.to_fen().to_string(),
            rank: piece.kind.code().to_string(),
            row: piece.row,
            col: piece.col,
        }
    }

    pub fn to_piece(&self) -> Result<Piece, ApiError> {
        let color = Color::from_fen(&self.color)
            .ok_or_else(|| ApiError::InvalidRequest(format!("invalid color: {}", self.color)))?;
        let mut code = self.rank.chars();
        let kind = match (code.next(), code.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => PieceType::from_char(c).map(|(_, k)| k),
            _ => None,
        }
        .ok_or_else(|| ApiError::InvalidRequest(format!("invalid piece rank: {}", self.rank)))?;
        Ok(Piece::new(color, kind, self.row, self.col))
    }
}

/// Parsed board data as consumed by the chessboard widget.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub fen: String,
    pub turn: String,
    pub en_passant: Option<String>,
    pub white_king: Option<String>,
    pub black_king: Option<String>,
    pub half_move: u32,
    pub full_move: u32,
    pub white_short_castle: bool,
    pub white_long_castle: bool,
    pub black_short_castle: bool,
    pub black_long_castle: bool,
    pub pieces: BTreeMap<String, PieceInfo>,
    pub legal_moves: BTreeMap<String, Vec<String>>,
}

impl BoardResponse {
    pub fn new(pos: &Position, legal_moves: &LegalMoves) -> Result<Self, FenError> {
        Ok(BoardResponse {
            fen: fen::serialize(pos)?,
            turn: pos.turn.to_fen().to_string(),
            en_passant: pos.en_passant.map(Square::to_algebraic),
            white_king: pos.white_king.map(Square::to_algebraic),
            black_king: pos.black_king.map(Square::to_algebraic),
            half_move: pos.halfmove_clock,
            full_move: pos.fullmove_number,
            white_short_castle: pos.castling.white_kingside,
            white_long_castle: pos.castling.white_queenside,
            black_short_castle: pos.castling.black_kingside,
            black_long_castle: pos.castling.black_queenside,
            pieces: pos
                .pieces()
                .map(|(sq, piece)| (sq.to_algebraic(), PieceInfo::from_piece(piece)))
                .collect(),
            legal_moves: legal_moves
                .iter()
                .map(|(from, targets)| {
                    (
                        from.to_algebraic(),
                        targets.iter().map(|to| to.to_algebraic()).collect(),
                    )
                })
                .collect(),
        })
    }
}

/// Structured validation failure.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FenErrorInfo {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<char>,
}

impl From<&FenError> for FenErrorInfo {
    fn from(err: &FenError) -> Self {
        FenErrorInfo {
            kind: err.kind().to_string(),
            message: err.to_string(),
            rank: err.rank(),
            character: err.character(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FenErrorInfo>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializeResponse {
    pub fen: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalResponse {
    pub white: f64,
    pub black: f64,
    pub text: String,
}
