//! The five calculators. Every function here is pure: parsed inputs in,
//! a value or a `CalcError` out.

pub mod divisors;
pub mod input;
pub mod logarithm;
pub mod quadratic;
pub mod stats;
pub mod trig;

/// Round half away from zero to `places` decimal places
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
