//! Range validation, run before any numeric work.
//!
//! Order of checks (first failure wins):
//! 1. driving value is a number (not NaN)
//! 2. tables have equal length
//! 3. at least two breakpoints
//! 4. every element of inputRange, then outputRange, is finite
//! 5. inputRange is strictly increasing
//!
//! Presence and element-type checks for untyped callers happen one layer up,
//! in [`crate::dynamic`].

use crate::error::{ConfigurationError, RangeName};
use crate::Result;

/// Validate the driving value. Infinities are legal.
pub fn validate_input(input: f64) -> Result<()> {
    if input.is_nan() {
        return Err(reject(ConfigurationError::NonNumericInput {
            found: "NaN".to_string(),
        }));
    }
    Ok(())
}

/// Validate a breakpoint table against its output table.
pub fn validate_ranges(input_range: &[f64], output_range: &[f64]) -> Result<()> {
    if input_range.len() != output_range.len() {
        return Err(reject(ConfigurationError::LengthMismatch {
            input_len: input_range.len(),
            output_len: output_range.len(),
        }));
    }
    if input_range.len() < 2 {
        return Err(reject(ConfigurationError::TooFewBreakpoints {
            len: input_range.len(),
        }));
    }
    check_finite(RangeName::Input, input_range)?;
    check_finite(RangeName::Output, output_range)?;
    check_strictly_increasing(input_range)
}

/// Full typed pipeline: driving value, then both tables.
pub fn validate(input: f64, input_range: &[f64], output_range: &[f64]) -> Result<()> {
    validate_input(input)?;
    validate_ranges(input_range, output_range)
}

fn check_finite(range: RangeName, values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        return Ok(());
    }
    Err(reject(ConfigurationError::NonFiniteRange {
        range,
        values: values.to_vec(),
    }))
}

fn check_strictly_increasing(values: &[f64]) -> Result<()> {
    match values.windows(2).position(|w| w[1] <= w[0]) {
        None => Ok(()),
        Some(pos) => Err(reject(ConfigurationError::NonMonotonicRange {
            values: values.to_vec(),
            index: pos + 1,
        })),
    }
}

pub(crate) fn reject(err: ConfigurationError) -> ConfigurationError {
    log::debug!("rejecting keyframe configuration ({}): {err}", err.kind());
    err
}
