use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivisorFunction {
    Gcd,
    Lcm,
}

impl FromStr for DivisorFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcd" | "hcf" => Ok(DivisorFunction::Gcd),
            "lcm" => Ok(DivisorFunction::Lcm),
            other => Err(CalcError::validation(format!("unknown function '{}'", other))),
        }
    }
}

/// Euclid's algorithm: `gcd(a, b) = b` if `a == 0`, else `gcd(b mod a, a)`
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while a != 0 {
        (a, b) = (b % a, a);
    }
    b
}

/// Greatest common divisor of the whole list, folded left to right
pub fn gcd_all(values: &[i64]) -> Option<i64> {
    let (&first, rest) = values.split_first()?;
    Some(rest.iter().fold(first, |acc, &v| gcd(acc, v)))
}

/// Least common multiple of the whole list, folded from the right
///
/// Each step computes `a * acc / gcd(a, acc)` in double precision and
/// truncates, so very large inputs lose precision the same way on every run.
///
/// # Errors
/// * `CalcError::Domain` if an intermediate result does not fit in an `i64`
pub fn lcm_all(values: &[i64]) -> Result<Option<i64>, CalcError> {
    let Some((&last, rest)) = values.split_last() else {
        return Ok(None);
    };

    rest.iter()
        .rev()
        .try_fold(last, |acc, &a| {
            let product = i128::from(a) * i128::from(acc);
            let step = (product as f64 / gcd(a, acc) as f64).trunc();
            if step.abs() >= i64::MAX as f64 {
                return Err(CalcError::domain("result is too large"));
            }
            Ok(step as i64)
        })
        .map(Some)
}

/// Evaluate GCD or LCM over a parsed list
///
/// Negative entries are refused along with zero, so every list that gets
/// through is strictly positive and the Euclid loop never sees a sign.
///
/// # Errors
/// * `CalcError::Validation` if fewer than two numbers were given
/// * `CalcError::Domain` if any number is zero or negative
pub fn evaluate(function: DivisorFunction, values: &[i64]) -> Result<i64, CalcError> {
    if values.len() < 2 {
        return Err(CalcError::validation("enter at least two numbers"));
    }
    if values.iter().any(|&v| v <= 0) {
        return Err(CalcError::domain("all numbers must be positive"));
    }

    let result = match function {
        DivisorFunction::Gcd => gcd_all(values),
        DivisorFunction::Lcm => lcm_all(values)?,
    };
    // Non-empty was checked above
    result.ok_or_else(|| CalcError::validation("enter at least two numbers"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(17, 5), 1);
        assert_eq!(evaluate(DivisorFunction::Gcd, &[12, 18, 24]).unwrap(), 6);
    }

    #[test]
    fn gcd_is_associative() {
        let triples = [(12, 18, 27), (7, 14, 21), (100, 75, 40), (9, 28, 35)];
        for (a, b, c) in triples {
            assert_eq!(gcd(gcd(a, b), c), gcd(a, gcd(b, c)), "{a}, {b}, {c}");
        }
    }

    #[test]
    fn lcm_known_values() {
        assert_eq!(evaluate(DivisorFunction::Lcm, &[4, 6]).unwrap(), 12);
        assert_eq!(evaluate(DivisorFunction::Lcm, &[1, 1, 1]).unwrap(), 1);
        assert_eq!(evaluate(DivisorFunction::Lcm, &[2, 3, 4, 5]).unwrap(), 60);
    }

    #[test]
    fn zero_is_rejected_before_computing() {
        for f in [DivisorFunction::Gcd, DivisorFunction::Lcm] {
            let err = evaluate(f, &[4, 0, 6]).unwrap_err();
            assert!(matches!(err, CalcError::Domain(_)));
            assert_eq!(err.to_string(), "all numbers must be positive");
        }
    }

    #[test]
    fn negative_entries_are_rejected() {
        for values in [&[-4, 6][..], &[12, 18, -24][..], &[i64::MIN, i64::MAX][..]] {
            let err = evaluate(DivisorFunction::Gcd, values).unwrap_err();
            assert!(matches!(err, CalcError::Domain(_)));
            let err = evaluate(DivisorFunction::Lcm, values).unwrap_err();
            assert!(matches!(err, CalcError::Domain(_)));
        }
    }

    #[test]
    fn gcd_at_the_top_of_i64() {
        assert_eq!(evaluate(DivisorFunction::Gcd, &[i64::MAX, i64::MAX]).unwrap(), i64::MAX);
        assert_eq!(evaluate(DivisorFunction::Gcd, &[i64::MAX, i64::MAX - 1]).unwrap(), 1);
    }

    #[test]
    fn lcm_at_the_top_of_i64_is_too_large() {
        let err = evaluate(DivisorFunction::Lcm, &[i64::MAX, i64::MAX - 1]).unwrap_err();
        assert_eq!(err.to_string(), "result is too large");
    }

    #[test]
    fn needs_two_numbers() {
        assert!(matches!(
            evaluate(DivisorFunction::Gcd, &[5]),
            Err(CalcError::Validation(_))
        ));
    }

    #[test]
    fn long_lists_do_not_recurse() {
        let values = vec![2; 100_000];
        assert_eq!(evaluate(DivisorFunction::Gcd, &values).unwrap(), 2);
        assert_eq!(evaluate(DivisorFunction::Lcm, &values).unwrap(), 2);
    }

    #[test]
    fn overflowing_lcm_is_a_domain_error() {
        let primes = [1_000_000_007, 998_244_353, 1_000_000_009];
        assert!(matches!(
            evaluate(DivisorFunction::Lcm, &primes),
            Err(CalcError::Domain(_))
        ));
    }
}
