//! Configuration errors raised by the interpolation pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a caller-supplied argument, as it appears in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Argument {
    Input,
    InputRange,
    OutputRange,
}

impl Argument {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::InputRange => "inputRange",
            Self::OutputRange => "outputRange",
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of the two keyframe tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeName {
    Input,
    Output,
}

impl RangeName {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input => "inputRange",
            Self::Output => "outputRange",
        }
    }
}

impl fmt::Display for RangeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<RangeName> for Argument {
    #[inline]
    fn from(range: RangeName) -> Self {
        match range {
            RangeName::Input => Self::InputRange,
            RangeName::Output => Self::OutputRange,
        }
    }
}

/// Fieldless discriminant of [`ConfigurationError`] for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    MissingArgument,
    NonNumericInput,
    NonNumericRange,
    LengthMismatch,
    TooFewBreakpoints,
    NonFiniteRange,
    NonMonotonicRange,
    InvalidOptions,
}

impl ErrorKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingArgument => "missingArgument",
            Self::NonNumericInput => "nonNumericInput",
            Self::NonNumericRange => "nonNumericRange",
            Self::LengthMismatch => "lengthMismatch",
            Self::TooFewBreakpoints => "tooFewBreakpoints",
            Self::NonFiniteRange => "nonFiniteRange",
            Self::NonMonotonicRange => "nonMonotonicRange",
            Self::InvalidOptions => "invalidOptions",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyframe configuration that cannot be evaluated.
///
/// Raised before any segment computation starts. Messages echo the offending
/// data (lengths or the literal table contents) so a misconfigured property
/// can be found from the call site.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("input or inputRange or outputRange can not be undefined (missing {argument})")]
    MissingArgument { argument: Argument },

    #[error("Cannot interpolate an input which is not a number (got {found})")]
    NonNumericInput { found: String },

    #[error("{range} must contain only numbers (got {found})")]
    NonNumericRange { range: RangeName, found: String },

    #[error("inputRange ({input_len}) and outputRange ({output_len}) must have the same length")]
    LengthMismatch { input_len: usize, output_len: usize },

    #[error("inputRange must have at least 2 elements, but got {len}")]
    TooFewBreakpoints { len: usize },

    #[error("{range} must contain only finite numbers, but got {}", JsArray(.values))]
    NonFiniteRange { range: RangeName, values: Vec<f64> },

    #[error(
        "inputRange must be strictly monotonically increasing, but got {} (element {index} does not exceed its predecessor)",
        JsArray(.values)
    )]
    NonMonotonicRange { values: Vec<f64>, index: usize },

    #[error("invalid interpolation options: {reason}")]
    InvalidOptions { reason: String },
}

impl ConfigurationError {
    /// Discriminant of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument { .. } => ErrorKind::MissingArgument,
            Self::NonNumericInput { .. } => ErrorKind::NonNumericInput,
            Self::NonNumericRange { .. } => ErrorKind::NonNumericRange,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::TooFewBreakpoints { .. } => ErrorKind::TooFewBreakpoints,
            Self::NonFiniteRange { .. } => ErrorKind::NonFiniteRange,
            Self::NonMonotonicRange { .. } => ErrorKind::NonMonotonicRange,
            Self::InvalidOptions { .. } => ErrorKind::InvalidOptions,
        }
    }

    /// The argument this error blames, when it blames a single one.
    #[inline]
    pub fn argument(&self) -> Option<Argument> {
        match self {
            Self::MissingArgument { argument } => Some(*argument),
            Self::NonNumericInput { .. } => Some(Argument::Input),
            Self::NonNumericRange { range, .. } | Self::NonFiniteRange { range, .. } => {
                Some((*range).into())
            }
            Self::TooFewBreakpoints { .. } | Self::NonMonotonicRange { .. } => {
                Some(Argument::InputRange)
            }
            Self::LengthMismatch { .. } | Self::InvalidOptions { .. } => None,
        }
    }
}

/// Formats a table the way the JS rendering layer prints arrays:
/// `[0,0.5,Infinity]`.
pub(crate) struct JsArray<'a>(pub &'a [f64]);

impl fmt::Display for JsArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_js_number(f, *v)?;
        }
        f.write_str("]")
    }
}

fn write_js_number(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v == f64::INFINITY {
        f.write_str("Infinity")
    } else if v == f64::NEG_INFINITY {
        f.write_str("-Infinity")
    } else {
        write!(f, "{v}")
    }
}
