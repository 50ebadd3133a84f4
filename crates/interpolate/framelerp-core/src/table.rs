//! Pre-validated keyframe tables.

use serde::{Deserialize, Serialize};

use crate::config::InterpolateOptions;
use crate::easing::EasingCurve;
use crate::error::ConfigurationError;
use crate::extrapolate::ExtrapolationPolicy;
use crate::interpolate::evaluate;
use crate::validate::{validate_input, validate_ranges};

/// A breakpoint table paired with its output table, validated once at
/// construction. Sampling only checks the driving value.
///
/// Deserialization runs the same validation:
///
/// ```
/// use framelerp_core::KeyframeTable;
///
/// let ok: Result<KeyframeTable, _> =
///     serde_json::from_str(r#"{"inputRange": [0, 10], "outputRange": [1, 0]}"#);
/// assert!(ok.is_ok());
/// let bad: Result<KeyframeTable, _> =
///     serde_json::from_str(r#"{"inputRange": [0, 0], "outputRange": [1, 0]}"#);
/// assert!(bad.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawKeyframeTable")]
pub struct KeyframeTable {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKeyframeTable {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
}

impl TryFrom<RawKeyframeTable> for KeyframeTable {
    type Error = ConfigurationError;

    fn try_from(raw: RawKeyframeTable) -> Result<Self, Self::Error> {
        Self::new(raw.input_range, raw.output_range)
    }
}

impl KeyframeTable {
    pub fn new(
        input_range: impl Into<Vec<f64>>,
        output_range: impl Into<Vec<f64>>,
    ) -> crate::Result<Self> {
        let input_range = input_range.into();
        let output_range = output_range.into();
        validate_ranges(&input_range, &output_range)?;
        Ok(Self {
            input_range,
            output_range,
        })
    }

    #[inline]
    pub fn input_range(&self) -> &[f64] {
        &self.input_range
    }

    #[inline]
    pub fn output_range(&self) -> &[f64] {
        &self.output_range
    }

    /// Number of breakpoints (always >= 2).
    #[inline]
    pub fn len(&self) -> usize {
        self.input_range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.input_range.is_empty()
    }

    /// First and last breakpoint.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.input_range[0], self.input_range[self.len() - 1])
    }

    pub fn sample(&self, input: f64, options: &InterpolateOptions) -> crate::Result<f64> {
        validate_input(input)?;
        options.validate()?;
        Ok(evaluate(
            input,
            &self.input_range,
            &self.output_range,
            &options.easing,
            options.extrapolation(),
        ))
    }

    pub fn sample_with<E>(
        &self,
        input: f64,
        easing: &E,
        extrapolation: ExtrapolationPolicy,
    ) -> crate::Result<f64>
    where
        E: EasingCurve + ?Sized,
    {
        validate_input(input)?;
        Ok(evaluate(
            input,
            &self.input_range,
            &self.output_range,
            easing,
            extrapolation,
        ))
    }
}
