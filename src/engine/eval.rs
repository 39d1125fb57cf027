//! Evaluation-bar formatting.
//!
//! Converts an engine evaluation as text (`"+1.25"`, `"-M3"`, `"1/2-1/2"`, ...)
//! into the share of the bar owned by each side and the label drawn on it.

use std::sync::LazyLock;

use regex::Regex;

/// Pawn score at which the bar is completely filled for one side.
const SCORE_SPAN: f64 = 12.0;

static SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?)(?:(M)(\d+)|(\d+(?:\.\d+)?))?$").expect("valid evaluation regex")
});

/// Errors for evaluation text the bar cannot display.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("invalid evaluation: '{0}'")]
    Unrecognised(String),

    #[error("invalid evaluation: '{0}' (mate in zero)")]
    MateInZero(String),
}

/// Fill shares and label for an evaluation bar.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalBar {
    /// White's share of the bar, in `[0, 1]`.
    pub white: f64,
    /// Black's share of the bar, `1 - white`.
    pub black: f64,
    /// Normalised label, e.g. `"+1.25"`, `"-M3"`, `"Draw"`.
    pub text: String,
}

impl EvalBar {
    /// Interpret an evaluation string. Surrounding whitespace is ignored and
    /// an empty string reads as `0`.
    pub fn from_evaluation(evaluation: &str) -> Result<Self, EvalError> {
        let e = evaluation.trim();

        match e {
            "1-0" => return Ok(Self::with_white(1.0, e.to_string())),
            "0-1" => return Ok(Self::with_white(0.0, e.to_string())),
            "1/2-1/2" => return Ok(Self::with_white(0.5, "Draw".to_string())),
            _ => {}
        }

        let caps = SCORE
            .captures(e)
            .ok_or_else(|| EvalError::Unrecognised(evaluation.to_string()))?;
        let negative = &caps[1] == "-";

        if caps.get(2).is_some() {
            let moves: f64 = caps[3]
                .parse()
                .map_err(|_| EvalError::Unrecognised(evaluation.to_string()))?;
            if moves == 0.0 {
                return Err(EvalError::MateInZero(evaluation.to_string()));
            }
            let sign = if negative { '-' } else { '+' };
            let white = if negative { 0.0 } else { 1.0 };
            return Ok(Self::with_white(white, format!("{sign}M{moves:.0}")));
        }

        let value: f64 = match caps.get(4) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| EvalError::Unrecognised(evaluation.to_string()))?,
            None => 0.0,
        };
        let signed = if negative { -value } else { value };
        let white = ((SCORE_SPAN + signed) / (2.0 * SCORE_SPAN)).clamp(0.0, 1.0);
        let sign = match (value == 0.0, negative) {
            (true, _) => "",
            (false, true) => "-",
            (false, false) => "+",
        };
        Ok(Self::with_white(white, format!("{sign}{}", format_score(value))))
    }

    fn with_white(white: f64, text: String) -> Self {
        EvalBar {
            white,
            black: 1.0 - white,
            text,
        }
    }
}

/// Magnitude with 2 decimals below 10, 1 below 100, none above; trailing
/// zeros dropped.
fn format_score(value: f64) -> String {
    let decimals: usize = if value > 99.0 {
        0
    } else if value > 10.0 {
        1
    } else {
        2
    };
    let s = format!("{value:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
