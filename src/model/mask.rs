//! Element mask combination helpers
//!
//! A mask flag of `true` marks an invalid or missing element. These helpers
//! only look at flags and values, never at table structure.

/// Both sides are invalid
#[inline]
pub fn both_masked(a: bool, b: bool) -> bool {
    a && b
}

/// At least one side is invalid
#[inline]
pub fn either_masked(a: bool, b: bool) -> bool {
    a || b
}

/// Pick the value of the first valid side.
///
/// Returns `(value, masked)`. When both sides are masked the first value is
/// carried along and the result is masked.
#[inline]
pub fn first_valid(v1: f64, m1: bool, v2: f64, m2: bool) -> (f64, bool) {
    match (m1, m2) {
        (false, _) => (v1, false),
        (true, false) => (v2, false),
        (true, true) => (v1, true),
    }
}

/// Exact value comparison where two NaNs are considered equal
#[inline]
pub fn values_match(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
