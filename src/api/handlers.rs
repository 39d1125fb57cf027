use axum::Json;
use axum::extract::State;

use crate::engine::{EvalBar, Position, annotate, fen};

use super::errors::ApiError;
use super::models::*;
use super::state::SharedState;

// =========================================================================
// Health
// =========================================================================

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        engine: "chessboard-fen".to_string(),
        uptime,
    })
}

// =========================================================================
// Board data
// =========================================================================

/// GET /api/board/default
pub async fn default_board() -> Result<Json<BoardResponse>, ApiError> {
    let pos = Position::starting();
    Ok(Json(BoardResponse::new(&pos, &annotate(&pos))?))
}

// =========================================================================
// FEN codec
// =========================================================================

/// POST /api/fen/validate
///
/// Always answers 200; an invalid FEN is reported in the body.
pub async fn validate_fen(Json(input): Json<FenRequest>) -> Json<ValidateResponse> {
    match fen::validate(&input.fen) {
        Ok(()) => Json(ValidateResponse {
            valid: true,
            error: None,
        }),
        Err(err) => {
            tracing::debug!(fen = %input.fen, kind = err.kind(), "FEN failed validation: {err}");
            Json(ValidateResponse {
                valid: false,
                error: Some(FenErrorInfo::from(&err)),
            })
        }
    }
}

/// POST /api/fen/parse
pub async fn parse_fen(Json(input): Json<FenRequest>) -> Result<Json<BoardResponse>, ApiError> {
    let pos = fen::parse(&input.fen).inspect_err(|err| {
        tracing::debug!(fen = %input.fen, kind = err.kind(), "rejected FEN: {err}");
    })?;
    Ok(Json(BoardResponse::new(&pos, &annotate(&pos))?))
}

/// POST /api/fen/serialize
pub async fn serialize_board(
    Json(input): Json<BoardRequest>,
) -> Result<Json<SerializeResponse>, ApiError> {
    let pos = input.into_position()?;
    let fen = fen::serialize(&pos).inspect_err(|err| {
        tracing::debug!(kind = err.kind(), "board data cannot be encoded: {err}");
    })?;
    Ok(Json(SerializeResponse { fen }))
}

// =========================================================================
// Evaluation bar
// =========================================================================

/// POST /api/eval
pub async fn evaluate(Json(input): Json<EvalRequest>) -> Result<Json<EvalResponse>, ApiError> {
    let text = input
        .evaluation
        .as_ref()
        .map(EvaluationInput::to_text)
        .unwrap_or_default();
    let bar = EvalBar::from_evaluation(&text)?;
    Ok(Json(EvalResponse {
        white: bar.white,
        black: bar.black,
        text: bar.text,
    }))
}

// =========================================================================
// Tests
// =========================================================================
