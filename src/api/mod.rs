//! HTTP surface serving board data to the chessboard and evaluation-bar widgets.
//!
//! - [`router`]: route table and middleware.
//! - [`handlers`]: request handlers over the FEN codec.
//! - [`models`]: JSON request/response shapes.
//! - [`errors`]: error-to-response mapping.
//! - [`state`]: shared server state.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
