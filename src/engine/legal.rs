//! Legal-move annotations attached to a position.
//!
//! Nothing here generates moves. A `LegalMoves` table is filled by an outside
//! rules engine; the only table known locally is the one for the standard
//! opening position (knight hops and pawn pushes for White).

use std::collections::BTreeMap;

use crate::engine::board::Position;
use crate::engine::types::Square;

/// Destination squares keyed by origin square, in the order they were listed.
pub type LegalMoves = BTreeMap<Square, Vec<Square>>;

/// Origin/destination pairs for White's first move, in algebraic notation.
const OPENING_MOVES: [(&str, [&str; 2]); 10] = [
    ("b1", ["a3", "c3"]),
    ("g1", ["f3", "h3"]),
    ("a2", ["a3", "a4"]),
    ("b2", ["b3", "b4"]),
    ("c2", ["c3", "c4"]),
    ("d2", ["d3", "d4"]),
    ("e2", ["e3", "e4"]),
    ("f2", ["f3", "f4"]),
    ("g2", ["g3", "g4"]),
    ("h2", ["h3", "h4"]),
];

/// The move table for the standard opening position.
pub fn opening_legal_moves() -> LegalMoves {
    let square = |name: &str| Square::from_algebraic(name).expect("static square name");
    OPENING_MOVES
        .iter()
        .map(|(from, targets)| (square(from), targets.iter().map(|to| square(to)).collect()))
        .collect()
}

/// The annotation known for `pos`: the opening table when `pos` is the opening
/// position with White to move, an empty table otherwise.
pub fn annotate(pos: &Position) -> LegalMoves {
    let opening = Position::starting();
    if pos.placement == opening.placement && pos.turn == opening.turn {
        opening_legal_moves()
    } else {
        LegalMoves::new()
    }
}
