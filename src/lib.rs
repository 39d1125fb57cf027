//! FEN codec and board-data service for the chessboard and evaluation-bar widgets.
//!
//! - [`engine`]: board primitives, the FEN codec, legal-move annotations and
//!   evaluation-bar formatting.
//! - [`api`]: the axum HTTP surface serving parsed board data.
//! - [`config`]: environment-driven server settings.

pub mod api;
pub mod config;
pub mod engine;
