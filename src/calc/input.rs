use crate::error::CalcError;

/// Parse a single integer form field
///
/// # Arguments
/// * `field` - Field name, used in the error message
/// * `raw` - Raw form value; surrounding whitespace is ignored
pub fn parse_int(field: &str, raw: &str) -> Result<i64, CalcError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| CalcError::validation(format!("{} must be a whole number", field)))
}

/// Parse a single floating point form field, rejecting NaN and infinities
pub fn parse_number(field: &str, raw: &str) -> Result<f64, CalcError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::validation(format!("{} must be a number", field))),
    }
}

/// Parse a comma-separated list of integers such as `"12, 18,24"`
///
/// # Errors
/// * `CalcError::Validation` if the list is empty or any entry is not an integer
pub fn parse_int_list(raw: &str) -> Result<Vec<i64>, CalcError> {
    if raw.trim().is_empty() {
        return Err(CalcError::validation("enter a comma-separated list of numbers"));
    }

    raw.split(',')
        .map(|entry| {
            let entry = entry.trim();
            entry.parse::<i64>().map_err(|_| {
                CalcError::validation(format!("'{}' is not a whole number", entry))
            })
        })
        .collect()
}
