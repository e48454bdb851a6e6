use serde::Serialize;

use crate::calc::round_to;
use crate::error::CalcError;

/// Roots of `a·x² + b·x + c = 0` together with the no-real-root flags
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuadraticRoots {
    pub x1: f64,
    pub x2: f64,
    /// First root has no real value
    pub e1: bool,
    /// Second root has no real value
    pub e2: bool,
    /// Neither root is real; `e1` and `e2` are cleared when this is set
    pub eb: bool,
}

/// `((-b ± √D) / 2) · a`, or `None` when `√D` is undefined
///
/// The halving happens before the multiplication by `a`; existing users rely
/// on these numbers, so the evaluation order stays as it is.
fn root(a: i64, b: i64, discriminant: f64, sign: f64) -> Option<f64> {
    if discriminant < 0.0 {
        return None;
    }
    Some((-(b as f64) + sign * discriminant.sqrt()) / 2.0 * a as f64)
}

/// `b² - 4ac`, exact while it fits in `i128`
fn discriminant(a: i64, b: i64, c: i64) -> f64 {
    let (a, b, c) = (i128::from(a), i128::from(b), i128::from(c));
    let b_squared = b * b;
    let ac = a * c;
    match ac.checked_mul(4).and_then(|four_ac| b_squared.checked_sub(four_ac)) {
        Some(d) => d as f64,
        // out of i128 range only when 4ac dwarfs b², so f64 keeps the sign
        None => b_squared as f64 - 4.0 * ac as f64,
    }
}

/// Solve a quadratic with integer coefficients
///
/// # Errors
/// * `CalcError::Domain` if `a <= 0`
pub fn solve(a: i64, b: i64, c: i64) -> Result<QuadraticRoots, CalcError> {
    if a <= 0 {
        return Err(CalcError::domain("a must be greater than 0"));
    }

    let discriminant = discriminant(a, b, c);

    let r1 = root(a, b, discriminant, 1.0);
    let r2 = root(a, b, discriminant, -1.0);

    let mut roots = QuadraticRoots {
        x1: round_to(r1.unwrap_or(0.0), 3),
        x2: round_to(r2.unwrap_or(0.0), 3),
        e1: r1.is_none(),
        e2: r2.is_none(),
        eb: false,
    };
    if roots.e1 && roots.e2 {
        roots.eb = true;
        roots.e1 = false;
        roots.e2 = false;
    }
    Ok(roots)
}
