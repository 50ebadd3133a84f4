//! Entry points for untyped callers (JSON, JS bindings).
//!
//! Arguments arrive as [`DynArg`] and pass an explicit pipeline before any
//! numeric work:
//! presence -> input type -> inputRange type -> outputRange type -> typed checks.

use serde_json::Value as JsonValue;

use crate::config::InterpolateOptions;
use crate::easing::EasingCurve;
use crate::error::{Argument, ConfigurationError, RangeName};
use crate::extrapolate::ExtrapolationPolicy;
use crate::interpolate::evaluate;
use crate::table::KeyframeTable;
use crate::validate::{reject, validate_ranges};
use crate::Result;

/// An argument as received from a dynamically typed caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DynArg {
    /// `undefined` / `null` / not supplied.
    Missing,
    Number(f64),
    List(Vec<DynArg>),
    /// Anything else, carrying its type name for diagnostics.
    Other(String),
}

impl DynArg {
    /// Caller-facing type name, using JS vocabulary.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Missing => "undefined",
            Self::Number(n) if n.is_nan() => "NaN",
            Self::Number(_) => "number",
            Self::List(_) => "array",
            Self::Other(name) => name.as_str(),
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for DynArg {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&[f64]> for DynArg {
    fn from(values: &[f64]) -> Self {
        Self::List(values.iter().copied().map(Self::Number).collect())
    }
}

impl From<Vec<f64>> for DynArg {
    fn from(values: Vec<f64>) -> Self {
        values.as_slice().into()
    }
}

impl<T> From<Option<T>> for DynArg
where
    T: Into<DynArg>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

impl From<&JsonValue> for DynArg {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Missing,
            JsonValue::Number(n) => n
                .as_f64()
                .map_or_else(|| Self::Other("number".to_string()), Self::Number),
            JsonValue::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            JsonValue::Bool(_) => Self::Other("boolean".to_string()),
            JsonValue::String(_) => Self::Other("string".to_string()),
            JsonValue::Object(_) => Self::Other("object".to_string()),
        }
    }
}

/// Interpolate from untyped arguments.
pub fn interpolate_dyn(
    input: &DynArg,
    input_range: &DynArg,
    output_range: &DynArg,
    options: &InterpolateOptions,
) -> Result<f64> {
    let (input, input_range, output_range) = typed_arguments(input, input_range, output_range)?;
    validate_ranges(&input_range, &output_range)?;
    options.validate()?;
    Ok(evaluate(
        input,
        &input_range,
        &output_range,
        &options.easing,
        options.extrapolation(),
    ))
}

/// [`interpolate_dyn`] with a caller-supplied easing curve.
pub fn interpolate_dyn_with<E>(
    input: &DynArg,
    input_range: &DynArg,
    output_range: &DynArg,
    easing: &E,
    extrapolation: ExtrapolationPolicy,
) -> Result<f64>
where
    E: EasingCurve + ?Sized,
{
    let (input, input_range, output_range) = typed_arguments(input, input_range, output_range)?;
    validate_ranges(&input_range, &output_range)?;
    Ok(evaluate(input, &input_range, &output_range, easing, extrapolation))
}

/// Interpolate from JSON arguments. `null` counts as missing; `options` may be
/// absent or `null` for defaults.
pub fn interpolate_json(
    input: &JsonValue,
    input_range: &JsonValue,
    output_range: &JsonValue,
    options: Option<&JsonValue>,
) -> Result<f64> {
    let input = DynArg::from(input);
    let input_range = DynArg::from(input_range);
    let output_range = DynArg::from(output_range);
    // Argument errors take precedence over option errors.
    let (x, ir, or) = typed_arguments(&input, &input_range, &output_range)?;
    validate_ranges(&ir, &or)?;
    let options = match options {
        None | Some(JsonValue::Null) => InterpolateOptions::default(),
        Some(value) => InterpolateOptions::from_json(value).map_err(reject)?,
    };
    Ok(evaluate(x, &ir, &or, &options.easing, options.extrapolation()))
}

impl KeyframeTable {
    /// Build a table from untyped arguments with the same presence and type
    /// checks as [`interpolate_dyn`].
    pub fn from_dyn(input_range: &DynArg, output_range: &DynArg) -> Result<Self> {
        for (arg, name) in [
            (input_range, Argument::InputRange),
            (output_range, Argument::OutputRange),
        ] {
            if arg.is_missing() {
                return Err(reject(ConfigurationError::MissingArgument { argument: name }));
            }
        }
        let input_range = numeric_list(RangeName::Input, input_range)?;
        let output_range = numeric_list(RangeName::Output, output_range)?;
        Self::new(input_range, output_range)
    }
}

/// Presence then type checks, yielding typed arguments.
fn typed_arguments(
    input: &DynArg,
    input_range: &DynArg,
    output_range: &DynArg,
) -> Result<(f64, Vec<f64>, Vec<f64>)> {
    for (arg, name) in [
        (input, Argument::Input),
        (input_range, Argument::InputRange),
        (output_range, Argument::OutputRange),
    ] {
        if arg.is_missing() {
            return Err(reject(ConfigurationError::MissingArgument { argument: name }));
        }
    }

    let input = match input {
        DynArg::Number(n) if !n.is_nan() => *n,
        other => {
            return Err(reject(ConfigurationError::NonNumericInput {
                found: other.type_name().to_string(),
            }))
        }
    };
    let input_range = numeric_list(RangeName::Input, input_range)?;
    let output_range = numeric_list(RangeName::Output, output_range)?;
    Ok((input, input_range, output_range))
}

fn numeric_list(range: RangeName, arg: &DynArg) -> Result<Vec<f64>> {
    let DynArg::List(items) = arg else {
        return Err(reject(ConfigurationError::NonNumericRange {
            range,
            found: arg.type_name().to_string(),
        }));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            // NaN elements are numbers here; the finiteness check reports them.
            DynArg::Number(n) => Ok(*n),
            other => Err(reject(ConfigurationError::NonNumericRange {
                range,
                found: format!("{} at index {i}", other.type_name()),
            })),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn num(v: f64) -> DynArg {
        DynArg::Number(v)
    }

    fn list(values: &[f64]) -> DynArg {
        DynArg::from(values)
    }

    fn kind_of(input: DynArg, ir: DynArg, or: DynArg) -> ErrorKind {
        interpolate_dyn(&input, &ir, &or, &InterpolateOptions::default())
            .unwrap_err()
            .kind()
    }

    #[test]
    fn missing_arguments() {
        assert_eq!(
            kind_of(DynArg::Missing, DynArg::Missing, DynArg::Missing),
            ErrorKind::MissingArgument
        );
        let err = interpolate_dyn(
            &num(1.0),
            &DynArg::Missing,
            &DynArg::Other("string".into()),
            &InterpolateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingArgument {
                argument: Argument::InputRange
            }
        );
    }

    #[test]
    fn presence_before_type() {
        // A non-numeric input with a missing table still reports the missing table.
        assert_eq!(
            kind_of(
                DynArg::List(vec![num(1.0), num(2.0)]),
                DynArg::Missing,
                DynArg::Other("string".into())
            ),
            ErrorKind::MissingArgument
        );
    }

    #[test]
    fn non_numeric_input() {
        let err = interpolate_dyn(
            &DynArg::Other("string".into()),
            &list(&[0.0, 1.0]),
            &list(&[1.0, 0.0]),
            &InterpolateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonNumericInput);
        assert!(err.to_string().contains("not a number"));
        assert_eq!(
            kind_of(num(f64::NAN), list(&[0.0, 1.0]), list(&[1.0, 0.0])),
            ErrorKind::NonNumericInput
        );
    }

    #[test]
    fn non_numeric_ranges_name_the_table() {
        let err = interpolate_dyn(
            &num(1.0),
            &DynArg::Other("string".into()),
            &DynArg::Other("string".into()),
            &InterpolateOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("inputRange must contain only numbers"));

        let err = interpolate_dyn(
            &num(1.0),
            &list(&[1.0, 2.0, 3.0]),
            &DynArg::Other("string".into()),
            &InterpolateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.argument(), Some(Argument::OutputRange));

        let err = interpolate_dyn(
            &num(1.0),
            &DynArg::List(vec![num(0.0), DynArg::Other("string".into())]),
            &list(&[0.0, 1.0]),
            &InterpolateOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "inputRange must contain only numbers (got string at index 1)"
        );
    }

    #[test]
    fn typed_checks_follow() {
        assert_eq!(
            kind_of(num(1.0), list(&[0.0, 2.0]), list(&[0.0, 1.0, 2.0])),
            ErrorKind::LengthMismatch
        );
        assert_eq!(
            kind_of(num(1.0), list(&[0.0, 1.0, 1.0]), list(&[0.0, 2.0, 0.0])),
            ErrorKind::NonMonotonicRange
        );
    }

    #[test]
    fn json_arguments() {
        let v = interpolate_json(&json!(0.75), &json!([0, 0.5, 1]), &json!([0, 2, 0]), None)
            .unwrap();
        assert_eq!(v, 1.0);

        let v = interpolate_json(
            &json!(2000),
            &json!([0, 1, 1000]),
            &json!([0, 1, -1000]),
            Some(&json!({"extrapolateRight": "clamp"})),
        )
        .unwrap();
        assert_eq!(v, -1000.0);

        let err = interpolate_json(&json!("1"), &json!([0, 1]), &json!([1, 0]), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonNumericInput);
        let err = interpolate_json(&JsonValue::Null, &json!([0, 1]), &json!([1, 0]), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
        let err = interpolate_json(
            &json!(1),
            &json!([0, 1]),
            &json!([1, 0]),
            Some(&json!({"easing": "bounce"})),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOptions);
    }

    #[test]
    fn keyframe_table_from_dynamic_arguments() {
        let table = KeyframeTable::from_dyn(&list(&[0.0, 30.0]), &list(&[0.0, 1.0])).unwrap();
        assert_eq!(
            table.sample(15.0, &InterpolateOptions::default()).unwrap(),
            0.5
        );

        let err = KeyframeTable::from_dyn(&DynArg::Missing, &DynArg::Other("string".into()))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingArgument {
                argument: Argument::InputRange
            }
        );
        let err = KeyframeTable::from_dyn(&list(&[0.0, 1.0]), &DynArg::Missing).unwrap_err();
        assert_eq!(err.argument(), Some(Argument::OutputRange));
        assert_eq!(err.kind(), ErrorKind::MissingArgument);

        let err = KeyframeTable::from_dyn(&DynArg::Other("string".into()), &list(&[0.0, 1.0]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonNumericRange);
        let err = KeyframeTable::from_dyn(&list(&[0.0, 0.0]), &list(&[0.0, 1.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NonMonotonicRange);
    }

    #[test]
    fn custom_easing_through_dynamic_path() {
        let v = interpolate_dyn_with(
            &num(0.5),
            &list(&[0.0, 1.0]),
            &list(&[0.0, 10.0]),
            &|t: f64| t * t,
            ExtrapolationPolicy::default(),
        )
        .unwrap();
        assert_eq!(v, 2.5);
    }
}
