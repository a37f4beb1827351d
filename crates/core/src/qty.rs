//! Defensive numeric normalization.

/// Coerce an externally-supplied quantity to a safe integer.
///
/// Non-finite input (NaN, ±inf) becomes 0; finite input is floored toward
/// negative infinity. Negative results pass through unchanged: every
/// caller clamps to its own valid range afterwards.
pub fn normalize_qty(raw: f64) -> i64 {
    if raw.is_finite() { raw.floor() as i64 } else { 0 }
}
