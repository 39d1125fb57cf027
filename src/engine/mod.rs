pub mod board;
pub mod eval;
pub mod fen;
pub mod legal;
pub mod types;

pub use board::Position;
pub use eval::{EvalBar, EvalError};
pub use fen::{STARTING_FEN, parse, serialize, validate};
pub use legal::{LegalMoves, annotate, opening_legal_moves};
pub use types::*;
