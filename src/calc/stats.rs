//! Descriptive statistics over a list of integers.
//!
//! Sums are accumulated one `term / N` at a time rather than divided once at
//! the end; results are compared against earlier outputs to the last bit, so
//! the accumulation order matters.

use serde::Serialize;

use crate::calc::round_to;
use crate::error::CalcError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    /// Mean absolute deviation from the mean
    pub mean_deviation: f64,
    /// Mean absolute deviation from the median
    pub median_deviation: f64,
    pub variance: f64,
    /// Standard deviation, rounded to 3 places
    pub sd: f64,
    /// Largest minus smallest; `u64` because that gap can exceed `i64::MAX`
    pub range: u64,
    /// Coefficient of variation in percent, rounded to 3 places
    pub cv: f64,
}

/// Middle value of a sorted, non-empty slice
///
/// Odd-length lists report half the middle element. That is not the textbook
/// median but it is what the calculator has always shown.
fn median(sorted: &[i64]) -> f64 {
    let l = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (i128::from(sorted[l - 1]) + i128::from(sorted[l])) as f64 / 2.0
    } else {
        sorted[l] as f64 / 2.0
    }
}

/// Σ f(x) / N, one term at a time
fn accumulate(values: &[i64], f: impl Fn(f64) -> f64) -> f64 {
    let n = values.len() as f64;
    values.iter().fold(0.0, |acc, &v| acc + f(v as f64) / n)
}

/// Summarise a list of integers
///
/// # Errors
/// * `CalcError::Validation` if the list is empty
/// * `CalcError::Domain` if every value is equal, which leaves the
///   coefficient of variation undefined
pub fn summarize(values: &[i64]) -> Result<Summary, CalcError> {
    if values.is_empty() {
        return Err(CalcError::validation("enter at least one number"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mean = accumulate(&sorted, |v| v);
    let median = median(&sorted);
    let mean_deviation = accumulate(&sorted, |v| (v - mean).abs());
    let median_deviation = accumulate(&sorted, |v| (v - median).abs());
    let variance = accumulate(&sorted, |v| (v - mean).powi(2));
    let sd = variance.sqrt();

    if sd == 0.0 {
        return Err(CalcError::domain(
            "standard deviation is zero, coefficient of variation is undefined",
        ));
    }

    let range = sorted[sorted.len() - 1].abs_diff(sorted[0]);
    let cv = mean / sd * 100.0;

    Ok(Summary {
        mean,
        median,
        mean_deviation,
        median_deviation,
        variance,
        sd: round_to(sd, 3),
        range,
        cv: round_to(cv, 3),
    })
}
