//! Forsyth–Edwards Notation codec.
//!
//! A FEN record has four or six space-separated fields:
//!
//! 1. Piece placement, rank 8 first, files a–h within a rank. Letters
//!    `KQRNBP` are white pieces, `kqrnbp` black ones, and the digits 1–8
//!    count runs of empty squares. Ranks are separated by `/`.
//! 2. Side to move, `w` or `b`.
//! 3. Castling availability, `-` or an in-order subsequence of `KQkq`.
//! 4. En passant target square, `-` or a square such as `e3`.
//! 5. Halfmove clock (optional, defaults to 0).
//! 6. Fullmove number (optional, defaults to 1; given together with field 5).
//!
//! [`validate`] and [`parse`] stop at the first violation they find and report
//! it as a [`FenError`]. [`serialize`] always emits the canonical six-field form
//! with minimal run-length encoding.

use crate::engine::board::Position;
use crate::engine::types::{
    CastlingRights, ClockField, Color, FenError, GrammarFault, Piece, PieceType, Square,
};

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const PIECE_CHARS: &str = "KQRNBPkqrnbp";

// ---------------------------------------------------------------------------
// Field-level reading
// ---------------------------------------------------------------------------

/// The fields of a FEN record that passed the grammar check.
struct Record<'a> {
    ranks: Vec<&'a str>,
    turn: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

/// Chess rank (8..1) of the placement group at `index` (0..7).
#[inline]
fn rank_of(index: usize) -> u8 {
    8 - index as u8
}

fn read_record(fen: &str) -> Result<Record<'_>, FenError> {
    let fields: Vec<&str> = fen.split(' ').collect();
    if fields.len() != 4 && fields.len() != 6 {
        return Err(GrammarFault::FieldCount(fields.len()).into());
    }

    // ----- Field 1: Piece placement -----
    let ranks: Vec<&str> = fields[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(GrammarFault::RankCount(ranks.len()).into());
    }
    for (index, group) in ranks.iter().enumerate() {
        let rank = rank_of(index);
        if group.is_empty() {
            return Err(GrammarFault::EmptyRank { rank }.into());
        }
        if let Some(character) = group
            .chars()
            .find(|&ch| !PIECE_CHARS.contains(ch) && !('1'..='8').contains(&ch))
        {
            return Err(GrammarFault::InvalidCharacter { character, rank }.into());
        }
    }

    // ----- Field 2: Side to move -----
    let turn = Color::from_fen(fields[1])
        .ok_or_else(|| GrammarFault::SideToMove(fields[1].to_string()))?;

    // ----- Field 3: Castling availability -----
    let castling = CastlingRights::from_fen(fields[2])
        .ok_or_else(|| GrammarFault::Castling(fields[2].to_string()))?;

    // ----- Field 4: En passant target square -----
    let en_passant = match fields[3] {
        "-" => None,
        text => Some(
            Square::from_algebraic(text)
                .ok_or_else(|| GrammarFault::EnPassant(text.to_string()))?,
        ),
    };

    // ----- Fields 5 and 6: clocks -----
    let (halfmove_clock, fullmove_number) = if fields.len() == 6 {
        let halfmove = read_clock(ClockField::Halfmove, fields[4])?;
        let fullmove = read_clock(ClockField::Fullmove, fields[5])?;
        (halfmove, fullmove)
    } else {
        (0, 1)
    };

    Ok(Record {
        ranks,
        turn,
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

/// Parse a clock field as a plain base-10 integer (no sign, no whitespace).
fn read_clock(field: ClockField, value: &str) -> Result<u32, FenError> {
    let invalid = || FenError::NumericField {
        field,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u32>().map_err(|_| invalid())
}

// ---------------------------------------------------------------------------
// Placement structure
// ---------------------------------------------------------------------------

/// Chess-specific checks on a grammatically valid placement field.
///
/// Each rank is checked top to bottom (width first, then back-rank pawns);
/// the king count is checked once every rank is well formed.
fn check_placement(ranks: &[&str]) -> Result<(), FenError> {
    for (index, group) in ranks.iter().enumerate() {
        let rank = rank_of(index);
        if group.len() > 8 {
            return Err(FenError::RankSum { rank });
        }
        let width: u32 = group
            .chars()
            .map(|ch| ch.to_digit(10).unwrap_or(1))
            .sum();
        if width != 8 {
            return Err(FenError::RankSum { rank });
        }
        if (rank == 8 || rank == 1) && group.contains(['p', 'P']) {
            return Err(FenError::PawnPlacement { rank });
        }
    }

    let count = |king: char| ranks.iter().flat_map(|g| g.chars()).filter(|&c| c == king).count();
    let (white, black) = (count('K'), count('k'));
    if white != 1 || black != 1 {
        return Err(FenError::KingCount { white, black });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public codec
// ---------------------------------------------------------------------------

/// Check a FEN string without building a position.
pub fn validate(fen: &str) -> Result<(), FenError> {
    let record = read_record(fen)?;
    check_placement(&record.ranks)
}

/// Parse a FEN string into a [`Position`].
///
/// The input must pass [`validate`]; otherwise the same error is returned and
/// nothing is built. Legal moves are not part of the result.
pub fn parse(fen: &str) -> Result<Position, FenError> {
    let record = read_record(fen)?;
    check_placement(&record.ranks)?;

    let mut pos = Position::empty();
    for (row, group) in record.ranks.iter().enumerate() {
        let row = row as u8;
        let mut col: u8 = 0;
        for ch in group.chars() {
            if let Some(run) = ch.to_digit(10) {
                col += run as u8;
                continue;
            }
            if col > 7 {
                return Err(FenError::RankSum { rank: 8 - row });
            }
            let Some((color, kind)) = PieceType::from_char(ch) else {
                return Err(GrammarFault::InvalidCharacter {
                    character: ch,
                    rank: 8 - row,
                }
                .into());
            };
            pos.put_piece(Piece::new(color, kind, row, col));
            col += 1;
        }
        if col != 8 {
            return Err(FenError::RankSum { rank: 8 - row });
        }
    }

    pos.turn = record.turn;
    pos.castling = record.castling;
    pos.en_passant = record.en_passant;
    pos.halfmove_clock = record.halfmove_clock;
    pos.fullmove_number = record.fullmove_number;
    Ok(pos)
}

/// Export a position as a canonical six-field FEN string.
///
/// Fails if a stored piece's own coordinates disagree with the square it is
/// stored under.
pub fn serialize(pos: &Position) -> Result<String, FenError> {
    let mut fen = String::with_capacity(90);

    // ----- Field 1: Piece placement -----
    for row in 0..8u8 {
        let mut empty_count = 0u8;
        for col in 0..8u8 {
            let sq = Square::from_row_col(row, col);
            match pos.placement[sq.index()] {
                Some(piece) => {
                    if piece.square() != Some(sq) {
                        return Err(GrammarFault::MisplacedPiece {
                            square: sq,
                            row: piece.row,
                            col: piece.col,
                        }
                        .into());
                    }
                    if empty_count > 0 {
                        fen.push((b'0' + empty_count) as char);
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            fen.push((b'0' + empty_count) as char);
        }
        if row < 7 {
            fen.push('/');
        }
    }

    // ----- Field 2: Side to move -----
    fen.push(' ');
    fen.push(pos.turn.to_fen());

    // ----- Field 3: Castling -----
    fen.push(' ');
    fen.push_str(&pos.castling.to_fen());

    // ----- Field 4: En passant -----
    fen.push(' ');
    match pos.en_passant {
        Some(sq) => fen.push_str(&sq.to_algebraic()),
        None => fen.push('-'),
    }

    // ----- Fields 5 and 6: clocks -----
    fen.push(' ');
    fen.push_str(&pos.halfmove_clock.to_string());
    fen.push(' ');
    fen.push_str(&pos.fullmove_number.to_string());

    Ok(fen)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn grammar(fen: &str) -> GrammarFault {
        match validate(fen) {
            Err(FenError::Grammar(fault)) => fault,
            other => panic!("expected grammar error for {fen:?}, got {other:?}"),
        }
    }

    // ===================================================================
    // Grammar
    // ===================================================================

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(grammar("invalid fen string"), GrammarFault::FieldCount(3));
        assert_eq!(grammar(""), GrammarFault::FieldCount(1));
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0"),
            GrammarFault::FieldCount(5)
        );
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 x"),
            GrammarFault::FieldCount(7)
        );
    }

    #[test]
    fn rejects_irregular_spacing() {
        assert!(matches!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR  w KQkq - 0 1"),
            Err(FenError::Grammar(_))
        ));
        assert!(matches!(
            validate(" rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::Grammar(_))
        ));
        assert!(matches!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n"),
            Err(FenError::NumericField { .. })
        ));
    }

    #[test]
    fn rejects_wrong_rank_count() {
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::RankCount(7)
        );
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::RankCount(9)
        );
    }

    #[test]
    fn rejects_empty_rank_group() {
        assert_eq!(
            grammar("rnbqkbnr/pppppppp//8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::EmptyRank { rank: 6 }
        );
    }

    #[test]
    fn rejects_invalid_piece_character_with_rank() {
        assert_eq!(
            grammar("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::InvalidCharacter {
                character: 'x',
                rank: 8
            }
        );
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP0PPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::InvalidCharacter {
                character: '0',
                rank: 2
            }
        );
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            GrammarFault::InvalidCharacter {
                character: '9',
                rank: 6
            }
        );
    }

    #[test]
    fn rejects_invalid_side_to_move() {
        assert_eq!(
            grammar("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            GrammarFault::SideToMove("x".into())
        );
    }

    #[test]
    fn rejects_invalid_castling() {
        for castling in ["XYZ", "qkQK", "KK", "", "-K"] {
            let fen = format!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w {castling} - 0 1");
            assert_eq!(grammar(&fen), GrammarFault::Castling(castling.into()));
        }
    }

    #[test]
    fn rejects_invalid_en_passant() {
        for ep in ["z9", "e", "e33", "E3"] {
            let fen = format!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq {ep} 0 1");
            assert_eq!(grammar(&fen), GrammarFault::EnPassant(ep.into()));
        }
    }

    #[test]
    fn rejects_malformed_clocks() {
        for (clocks, field, value) in [
            ("abc 1", ClockField::Halfmove, "abc"),
            ("-1 1", ClockField::Halfmove, "-1"),
            ("+3 1", ClockField::Halfmove, "+3"),
            ("0 x", ClockField::Fullmove, "x"),
            ("99999999999 1", ClockField::Halfmove, "99999999999"),
        ] {
            let fen = format!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - {clocks}");
            assert_eq!(
                validate(&fen),
                Err(FenError::NumericField {
                    field,
                    value: value.into()
                }),
                "{fen}"
            );
        }
    }

    // ===================================================================
    // Placement structure
    // ===================================================================

    #[test]
    fn rejects_short_and_long_ranks() {
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1"),
            Err(FenError::RankSum { rank: 1 })
        );
        assert_eq!(
            validate("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankSum { rank: 8 })
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/44/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Ok(())
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/81/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankSum { rank: 4 })
        );
    }

    #[test]
    fn rejects_group_longer_than_eight_characters() {
        // Nine "1"s sum to 9 anyway, but the length check reports first.
        assert_eq!(
            validate("rnbqkbnr/pppppppp/111111111/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankSum { rank: 6 })
        );
    }

    #[test]
    fn rejects_pawns_on_back_ranks() {
        assert_eq!(
            validate("pppppppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::PawnPlacement { rank: 8 })
        );
        assert_eq!(
            validate("4k3/8/8/8/8/8/8/3PK3 w - - 0 1"),
            Err(FenError::PawnPlacement { rank: 1 })
        );
        assert_eq!(
            validate("4k2p/8/8/8/8/8/8/4K3 b - - 0 1"),
            Err(FenError::PawnPlacement { rank: 8 })
        );
    }

    #[test]
    fn rank_sum_is_reported_before_back_rank_pawns() {
        assert_eq!(
            validate("ppp/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::RankSum { rank: 8 })
        );
    }

    #[test]
    fn rejects_wrong_king_counts() {
        assert_eq!(
            validate("8/8/8/8/8/8/8/8 w - - 0 1"),
            Err(FenError::KingCount { white: 0, black: 0 })
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1BNR w KQkq - 0 1"),
            Err(FenError::KingCount { white: 0, black: 1 })
        );
        assert_eq!(
            validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKKBNR w KQkq - 0 1"),
            Err(FenError::KingCount { white: 2, black: 1 })
        );
        assert_eq!(
            validate("k6k/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount { white: 1, black: 2 })
        );
    }

    // ===================================================================
    // Parse
    // ===================================================================

    #[test]
    fn parse_starting_position() {
        let pos = parse(STARTING_FEN).unwrap();
        assert_eq!(pos.piece_count(), 32);
        assert_eq!(pos.turn, Color::White);
        assert_eq!(pos.castling, CastlingRights::ALL);
        assert_eq!(pos.en_passant, None);
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.white_king, Some(sq("e1")));
        assert_eq!(pos.black_king, Some(sq("e8")));
    }

    #[test]
    fn parse_places_pieces_with_coordinates() {
        let pos = parse(STARTING_FEN).unwrap();
        let rook = pos.piece_at(sq("a8")).unwrap();
        assert_eq!((rook.color, rook.kind, rook.row, rook.col), (Color::Black, PieceType::Rook, 0, 0));
        let king = pos.piece_at(sq("e1")).unwrap();
        assert_eq!((king.color, king.kind, king.row, king.col), (Color::White, PieceType::King, 7, 4));
        assert_eq!(pos.piece_at(sq("e4")), None);
    }

    #[test]
    fn parse_four_field_defaults_clocks() {
        let pos = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3").unwrap();
        assert_eq!(pos.halfmove_clock, 0);
        assert_eq!(pos.fullmove_number, 1);
        assert_eq!(pos.turn, Color::Black);
        assert_eq!(pos.en_passant, Some(sq("e3")));
    }

    #[test]
    fn parse_keeps_castling_flags_independent() {
        let pos = parse("r3k2r/8/8/8/8/8/8/R3K2R w Qk - 3 17").unwrap();
        assert!(!pos.castling.white_kingside);
        assert!(pos.castling.white_queenside);
        assert!(pos.castling.black_kingside);
        assert!(!pos.castling.black_queenside);
        assert_eq!(pos.halfmove_clock, 3);
        assert_eq!(pos.fullmove_number, 17);
    }

    #[test]
    fn parse_accepts_en_passant_on_any_square() {
        let pos = parse("4k3/8/8/8/8/8/8/4K3 w - a1 0 1").unwrap();
        assert_eq!(pos.en_passant, Some(sq("a1")));
    }

    #[test]
    fn parse_reports_same_error_as_validate() {
        for fen in [
            "invalid fen string",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "pppppppp/8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
        ] {
            assert_eq!(parse(fen).err(), validate(fen).err(), "{fen}");
        }
    }

    // ===================================================================
    // Serialize
    // ===================================================================

    #[test]
    fn serialize_starting_position() {
        let pos = parse(STARTING_FEN).unwrap();
        assert_eq!(serialize(&pos).unwrap(), STARTING_FEN);
    }

    #[test]
    fn serialize_normalises_run_lengths() {
        let pos = parse("rnbqkbnr/pppppppp/8/8/1111P111/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(
            serialize(&pos).unwrap(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn serialize_appends_default_clocks() {
        let pos = parse("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(serialize(&pos).unwrap(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn serialize_castling_in_fixed_order() {
        let mut pos = parse(STARTING_FEN).unwrap();
        pos.castling = CastlingRights {
            white_kingside: false,
            white_queenside: true,
            black_kingside: false,
            black_queenside: true,
        };
        assert!(serialize(&pos).unwrap().contains(" w Qq - "));
        pos.castling = CastlingRights::NONE;
        assert!(serialize(&pos).unwrap().contains(" w - - "));
    }

    #[test]
    fn serialize_rejects_misplaced_piece() {
        let mut pos = parse(STARTING_FEN).unwrap();
        let e4 = sq("e4");
        pos.placement[e4.index()] = Some(Piece::new(Color::White, PieceType::Queen, 0, 0));
        assert_eq!(
            serialize(&pos),
            Err(FenError::Grammar(GrammarFault::MisplacedPiece {
                square: e4,
                row: 0,
                col: 0
            }))
        );
    }

    #[test]
    fn zero_fullmove_is_accepted_and_kept() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0";
        assert_eq!(validate(fen), Ok(()));
        let pos = parse(fen).unwrap();
        assert_eq!(pos.fullmove_number, 0);
        assert_eq!(serialize(&pos).unwrap(), fen);
    }
}
