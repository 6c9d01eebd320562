//! Floating-point comparison on the time axis.

/// Tolerance multiplier used for time comparisons.
const CLOSE_ENOUGH_MULTIPLIER: f64 = 42.0;

/// Relative closeness test used for lattice times.
///
/// Equal values are always close. When either side is zero the absolute
/// difference must be below the squared tolerance.
#[must_use]
pub fn close_enough(x: f64, y: f64) -> bool {
    if x == y {
        return true;
    }
    let diff = (x - y).abs();
    let tolerance = CLOSE_ENOUGH_MULTIPLIER * f64::EPSILON;
    if x == 0.0 || y == 0.0 {
        return diff < tolerance * tolerance;
    }
    diff <= tolerance * x.abs() || diff <= tolerance * y.abs()
}
