//! Numeric wire encoding.
//!
//! Every price, size and amount that ends up inside a hashed or signed
//! payload goes through this module. A value is either encoded exactly at the
//! requested precision or rejected with [`CoreError::PrecisionLoss`]; nothing
//! is rounded silently.

use crate::error::{CoreError, Result};

/// Fractional digits used when rendering prices and sizes as wire strings.
pub const WIRE_DECIMALS: u32 = 8;
/// Scale used for integer values that are hashed (`float_to_int_for_hashing`).
pub const HASHING_DECIMALS: u32 = 8;
/// Scale of USD integer amounts (e.g. isolated margin `ntli`).
pub const USD_DECIMALS: u32 = 6;

/// Round-trip tolerance for decimal strings.
const WIRE_TOLERANCE: f64 = 1e-12;
/// Tolerance for scaled integer conversions.
const INT_TOLERANCE: f64 = 1e-3;

/// Encode a float as a wire string with 8 fractional digits.
///
/// `1100.0` becomes `"1100"`, `0.2` becomes `"0.2"`, `-0.0` becomes `"0"`.
pub fn float_to_wire(x: f64) -> Result<String> {
    float_to_wire_with(x, WIRE_DECIMALS)
}

/// Encode a float as a wire string at `decimals` fractional digits.
///
/// Formats at fixed precision, parses the result back and fails when the
/// round trip moved the value by `1e-12` or more.
pub fn float_to_wire_with(x: f64, decimals: u32) -> Result<String> {
    if !x.is_finite() {
        return Err(CoreError::NonFinite(x));
    }

    let rounded = format!("{:.*}", decimals as usize, x);
    let parsed: f64 = rounded
        .parse()
        .map_err(|_| CoreError::PrecisionLoss { value: x, decimals })?;
    if (parsed - x).abs() >= WIRE_TOLERANCE {
        return Err(CoreError::PrecisionLoss { value: x, decimals });
    }

    Ok(normalize_decimal_str(&rounded))
}

/// Strip trailing zeros and a dangling decimal point; `-0` becomes `0`.
fn normalize_decimal_str(s: &str) -> String {
    let trimmed = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    };

    if trimmed == "-0" || trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Convert a float to an integer scaled by `10^power`.
///
/// Fails when the scaled value is more than `1e-3` away from an integer or
/// does not fit in an `i64`.
pub fn float_to_int(x: f64, power: u32) -> Result<i64> {
    if !x.is_finite() {
        return Err(CoreError::NonFinite(x));
    }

    let scaled = x * 10f64.powi(power as i32);
    let rounded = scaled.round();
    if (rounded - scaled).abs() >= INT_TOLERANCE {
        return Err(CoreError::PrecisionLoss {
            value: x,
            decimals: power,
        });
    }
    // 2^63 is exactly representable; anything at or beyond it overflows i64.
    if rounded >= 9_223_372_036_854_775_808.0 || rounded < -9_223_372_036_854_775_808.0 {
        return Err(CoreError::PrecisionLoss {
            value: x,
            decimals: power,
        });
    }

    Ok(rounded as i64)
}

/// Integer form used for hashed numeric fields (8 decimals).
pub fn float_to_int_for_hashing(x: f64) -> Result<i64> {
    float_to_int(x, HASHING_DECIMALS)
}

/// USD integer form (6 decimals), e.g. `1.5` -> `1_500_000`.
pub fn float_to_usd_int(x: f64) -> Result<i64> {
    float_to_int(x, USD_DECIMALS)
}
