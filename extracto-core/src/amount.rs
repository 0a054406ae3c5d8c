//! Locale-aware amount parsing.
//!
//! Statements print amounts as `1.234,56` (dot thousands, comma decimal), but
//! extraction often yields bare `12.34` or `1.234`; separator roles are inferred
//! from digit grouping.

use thiserror::Error;

use crate::diagnostics::{Diagnostics, WarningKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount '{token}'")]
pub struct AmountError {
    pub token: String,
}

/// Rewrite a locale-formatted token as a plain ASCII decimal (sign stripped).
fn normalize_digits(digits: &str) -> String {
    let has_dot = digits.contains('.');
    let has_comma = digits.contains(',');

    match (has_dot, has_comma) {
        (true, true) => digits.replace('.', "").replace(',', "."),
        (false, true) => digits.replace(',', "."),
        (true, false) => {
            let trailing = digits.rsplit('.').next().map(str::len).unwrap_or(0);
            if trailing == 3 {
                digits.replace('.', "")
            } else {
                digits.to_string()
            }
        }
        (false, false) => digits.to_string(),
    }
}

/// Parse an amount token. An empty token is `0.0`.
pub fn parse_amount(token: &str) -> Result<f64, AmountError> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(0.0);
    }

    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, token),
    };

    let value: f64 = normalize_digits(digits).parse().map_err(|_| AmountError {
        token: token.to_string(),
    })?;

    Ok(if negative { -value } else { value })
}

/// Parse an amount, recording a warning and returning `0.0` on failure.
///
/// The flag is `false` when the token could not be read.
pub fn amount_or_zero(token: &str, diagnostics: &mut Diagnostics) -> (f64, bool) {
    match parse_amount(token) {
        Ok(value) => (value, true),
        Err(err) => {
            diagnostics.warn(WarningKind::InvalidAmount, err.to_string());
            (0.0, false)
        }
    }
}
