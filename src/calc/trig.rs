use serde::{Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::calc::round_to;
use crate::error::CalcError;

/// Results at or above this are reported as infinity
const UPPER_CLAMP: f64 = 1e11;
/// Results at or below this are reported as infinity
const LOWER_CLAMP: f64 = -1e9;

/// The six trigonometric functions offered by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Cosec,
    Sec,
    Cot,
}

impl FromStr for TrigFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sin" => Ok(TrigFunction::Sin),
            "cos" => Ok(TrigFunction::Cos),
            "tan" => Ok(TrigFunction::Tan),
            "cosec" => Ok(TrigFunction::Cosec),
            "sec" => Ok(TrigFunction::Sec),
            "cot" => Ok(TrigFunction::Cot),
            other => Err(CalcError::validation(format!(
                "unknown trigonometric function '{}'",
                other
            ))),
        }
    }
}

/// Unit the angle was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radian,
    Degree,
}

impl AngleUnit {
    /// Anything other than `"radian"` is read as degrees
    pub fn from_form(s: &str) -> Self {
        if s == "radian" {
            AngleUnit::Radian
        } else {
            AngleUnit::Degree
        }
    }
}

/// Outcome of a trigonometric evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrigValue {
    Finite(f64),
    Infinity,
}

impl fmt::Display for TrigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrigValue::Finite(v) => write!(f, "{}", v),
            TrigValue::Infinity => write!(f, "∞"),
        }
    }
}

// JSON has no infinity, so the sentinel goes out as a string
impl Serialize for TrigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TrigValue::Finite(v) => serializer.serialize_f64(*v),
            TrigValue::Infinity => serializer.serialize_str("∞"),
        }
    }
}

/// 1/x, with an exact zero denominator mapped to +∞ instead of a signed infinity
fn reciprocal(x: f64) -> f64 {
    if x == 0.0 { f64::INFINITY } else { 1.0 / x }
}

/// Evaluate a trigonometric function
///
/// Degrees are converted to radians first. Reciprocal functions whose
/// underlying value is exactly zero yield infinity. Any raw result
/// `>= 1e11` or `<= -1e9` saturates to infinity; everything else is
/// rounded to 2 decimal places.
///
/// # Errors
/// * `CalcError::Validation` if the angle is not finite once converted to
///   radians (a degree value near `f64::MAX` overflows)
///
/// # Examples
/// ```
/// use calcweb::calc::trig::{evaluate, AngleUnit, TrigFunction, TrigValue};
///
/// let v = evaluate(TrigFunction::Sin, 30.0, AngleUnit::Degree)?;
/// assert_eq!(v, TrigValue::Finite(0.5));
/// # Ok::<(), calcweb::CalcError>(())
/// ```
pub fn evaluate(
    function: TrigFunction,
    angle: f64,
    unit: AngleUnit,
) -> Result<TrigValue, CalcError> {
    let x = match unit {
        AngleUnit::Radian => angle,
        AngleUnit::Degree => angle * PI / 180.0,
    };
    if !x.is_finite() {
        return Err(CalcError::validation("x is too large to convert to radians"));
    }

    let raw = match function {
        TrigFunction::Sin => x.sin(),
        TrigFunction::Cos => x.cos(),
        TrigFunction::Tan => x.tan(),
        TrigFunction::Cosec => reciprocal(x.sin()),
        TrigFunction::Sec => reciprocal(x.cos()),
        TrigFunction::Cot => reciprocal(x.tan()),
    };

    Ok(if raw >= UPPER_CLAMP || raw <= LOWER_CLAMP {
        TrigValue::Infinity
    } else {
        TrigValue::Finite(round_to(raw, 2))
    })
}
