//! The `interpolate` entry points.
//!
//! validate -> locate segment -> resolve extrapolation -> progress -> ease -> blend.
//! Nothing is retained between calls.

use crate::config::InterpolateOptions;
use crate::easing::EasingCurve;
use crate::extrapolate::{resolve_extrapolation, ExtrapolationPolicy, Resolution};
use crate::mapper::map_segment;
use crate::segment::locate_segment;
use crate::validate::validate;
use crate::Result;

/// Map `input` through the keyframe table (`input_range` -> `output_range`).
///
/// ```
/// use framelerp_core::{interpolate, Extrapolation, InterpolateOptions};
///
/// let opacity = interpolate(15.0, &[0.0, 30.0], &[0.0, 1.0], &InterpolateOptions::default()).unwrap();
/// assert_eq!(opacity, 0.5);
///
/// let clamped = InterpolateOptions::default().with_extrapolate_right(Extrapolation::Clamp);
/// assert_eq!(interpolate(90.0, &[0.0, 30.0], &[0.0, 1.0], &clamped).unwrap(), 1.0);
/// ```
pub fn interpolate(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    options: &InterpolateOptions,
) -> Result<f64> {
    validate(input, input_range, output_range)?;
    options.validate()?;
    Ok(evaluate(
        input,
        input_range,
        output_range,
        &options.easing,
        options.extrapolation(),
    ))
}

/// [`interpolate`] with a caller-supplied easing curve.
pub fn interpolate_with<E>(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    easing: &E,
    extrapolation: ExtrapolationPolicy,
) -> Result<f64>
where
    E: EasingCurve + ?Sized,
{
    validate(input, input_range, output_range)?;
    Ok(evaluate(input, input_range, output_range, easing, extrapolation))
}

/// Evaluate against tables that already passed validation.
pub(crate) fn evaluate<E>(
    input: f64,
    input_range: &[f64],
    output_range: &[f64],
    easing: &E,
    extrapolation: ExtrapolationPolicy,
) -> f64
where
    E: EasingCurve + ?Sized,
{
    let location = locate_segment(input, input_range);
    match resolve_extrapolation(location, input, input_range, extrapolation) {
        Resolution::Identity(value) => value,
        Resolution::Map { segment, input } => {
            map_segment(input, segment, input_range, output_range, easing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::error::ErrorKind;

    #[test]
    fn identity_bypasses_easing() {
        let exploding = |_t: f64| -> f64 { f64::NAN };
        let v = interpolate_with(
            -1000.0,
            &[0.0, 1.0, 2.0],
            &[0.0, 2.0, 4.0],
            &exploding,
            ExtrapolationPolicy::identity(),
        )
        .unwrap();
        assert_eq!(v, -1000.0);
    }

    #[test]
    fn options_are_validated() {
        let options = InterpolateOptions::default().with_easing(Easing::CubicBezier {
            x1: -0.5,
            y1: 0.0,
            x2: 0.5,
            y2: 1.0,
        });
        let err = interpolate(0.5, &[0.0, 1.0], &[0.0, 1.0], &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);
        // Argument errors are reported first.
        let err = interpolate(0.5, &[0.0, 1.0], &[0.0], &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        // A caller-supplied curve is not checked.
        assert!(interpolate_with(
            0.5,
            &[0.0, 1.0],
            &[0.0, 1.0],
            &options.easing,
            ExtrapolationPolicy::default()
        )
        .is_ok());
    }
}
