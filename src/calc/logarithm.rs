use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFunction {
    /// Logarithm in an arbitrary base
    Log,
    /// Natural logarithm
    Ln,
}

impl FromStr for LogFunction {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(LogFunction::Log),
            "ln" => Ok(LogFunction::Ln),
            other => Err(CalcError::validation(format!(
                "unknown logarithm function '{}'",
                other
            ))),
        }
    }
}

/// Evaluate `log_base(x)` or `ln(x)`
///
/// `base` is only consulted for [`LogFunction::Log`]. The result keeps full
/// floating point precision.
///
/// # Errors
/// * `CalcError::Domain` if `x <= 0`, checked first
/// * `CalcError::Domain` if `base <= 0` or `base == 1` for `log`
pub fn evaluate(function: LogFunction, x: f64, base: f64) -> Result<f64, CalcError> {
    if x <= 0.0 {
        return Err(CalcError::domain("value must be positive"));
    }

    match function {
        LogFunction::Log => {
            if base <= 0.0 || base == 1.0 {
                return Err(CalcError::domain("base must be positive and not 1"));
            }
            Ok(x.log(base))
        }
        LogFunction::Ln => Ok(x.ln()),
    }
}
