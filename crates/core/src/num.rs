//! Total numeric coercion for untrusted wire values.
//!
//! Directory payloads may carry null, absent, negative, or non-finite
//! numbers. Everything funnels through these helpers before entering the
//! engine, so downstream arithmetic never has to re-check its inputs.

/// Coerce an optional monetary amount to a usable `f64`.
///
/// Missing, non-finite, or negative values become `0.0`.
pub fn coerce_amount(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Coerce an optional count (e.g. quantity) to a non-negative integer.
pub fn coerce_count(value: Option<i64>) -> u32 {
    match value {
        Some(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => 0,
    }
}

/// Coerce an optional useful-life figure; non-positive values mean
/// "no depreciation schedule" and normalize to `None`.
pub fn coerce_life_years(value: Option<i64>) -> Option<u32> {
    match value {
        Some(v) if v > 0 => Some(u32::try_from(v).unwrap_or(u32::MAX)),
        _ => None,
    }
}

/// Divide with a guarded denominator: non-positive denominators yield `0.0`.
pub fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_coerce_invalid_inputs_to_zero() {
        assert_eq!(coerce_amount(None), 0.0);
        assert_eq!(coerce_amount(Some(-5.0)), 0.0);
        assert_eq!(coerce_amount(Some(f64::NAN)), 0.0);
        assert_eq!(coerce_amount(Some(f64::INFINITY)), 0.0);
        assert_eq!(coerce_amount(Some(1250.75)), 1250.75);
        assert_eq!(coerce_amount(Some(0.0)), 0.0);
    }

    #[test]
    fn counts_floor_at_zero() {
        assert_eq!(coerce_count(None), 0);
        assert_eq!(coerce_count(Some(-3)), 0);
        assert_eq!(coerce_count(Some(0)), 0);
        assert_eq!(coerce_count(Some(7)), 7);
    }

    #[test]
    fn non_positive_life_means_no_schedule() {
        assert_eq!(coerce_life_years(None), None);
        assert_eq!(coerce_life_years(Some(0)), None);
        assert_eq!(coerce_life_years(Some(-2)), None);
        assert_eq!(coerce_life_years(Some(5)), Some(5));
    }

    #[test]
    fn division_guards_its_denominator() {
        assert_eq!(guarded_div(10.0, 0.0), 0.0);
        assert_eq!(guarded_div(10.0, -1.0), 0.0);
        assert_eq!(guarded_div(9.0, 3.0), 3.0);
    }
}
