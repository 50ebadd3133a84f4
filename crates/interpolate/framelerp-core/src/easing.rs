//! Easing curves applied to the progress fraction before blending.
//!
//! - [`EasingCurve`] is the single-method capability the mapper consumes.
//! - [`Easing`] is the closed set of built-in curves (serde-tagged by `"type"`).
//! - Any `Fn(f64) -> f64` is a custom curve.
//!
//! Curves receive the raw fraction. Under `extend` extrapolation that fraction
//! leaves [0,1] and no clamping is applied on either side of the curve.

use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const BISECTION_ITERATIONS: usize = 64;
const SOLVE_EPSILON: f64 = 1e-7;

/// Maps a progress fraction to an eased fraction.
pub trait EasingCurve {
    fn ease(&self, t: f64) -> f64;
}

impl<F> EasingCurve for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn ease(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Built-in easing curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Easing {
    /// `f(t) = t`
    #[default]
    Linear,
    /// `f(t) = 1 - cos(t·π/2)`
    Sin,
    Quad,
    Cubic,
    Poly {
        exponent: f64,
    },
    Circle,
    Exp,
    Back {
        #[serde(default = "default_back_overshoot")]
        overshoot: f64,
    },
    /// CSS-style timing function through (0,0), (x1,y1), (x2,y2), (1,1).
    CubicBezier {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Mirrors the wrapped curve: `f(t) = 1 - e(1 - t)`.
    Out {
        easing: Box<Easing>,
    },
    /// Wrapped curve for the first half, its mirror for the second.
    InOut {
        easing: Box<Easing>,
    },
}

fn default_back_overshoot() -> f64 {
    DEFAULT_BACK_OVERSHOOT
}

impl Easing {
    /// Checked constructor for [`Easing::CubicBezier`].
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> crate::Result<Self> {
        let easing = Self::CubicBezier { x1, y1, x2, y2 };
        easing.validate()?;
        Ok(easing)
    }

    /// `cubic-bezier(0.42, 0, 1, 1)`
    pub fn ease() -> Self {
        Self::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        }
    }

    /// `cubic-bezier(0.42, 0, 0.58, 1)`
    pub fn ease_in_out() -> Self {
        Self::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        }
    }

    pub fn back() -> Self {
        Self::Back {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub fn out(easing: Easing) -> Self {
        Self::Out {
            easing: Box::new(easing),
        }
    }

    pub fn in_out(easing: Easing) -> Self {
        Self::InOut {
            easing: Box::new(easing),
        }
    }

    /// Check curve parameters. Bezier x control points must lie in [0,1] so
    /// the timing function stays single-valued.
    pub fn validate(&self) -> crate::Result<()> {
        match self {
            Self::Poly { exponent } if !exponent.is_finite() => Err(invalid(format!(
                "poly exponent must be finite, but got {exponent}"
            ))),
            Self::Back { overshoot } if !overshoot.is_finite() => Err(invalid(format!(
                "back overshoot must be finite, but got {overshoot}"
            ))),
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
                    return Err(invalid(format!(
                        "cubic-bezier control points must be finite, but got ({x1}, {y1}, {x2}, {y2})"
                    )));
                }
                if !(0.0..=1.0).contains(x1) || !(0.0..=1.0).contains(x2) {
                    return Err(invalid(format!(
                        "cubic-bezier x values must be in [0, 1], but got x1={x1}, x2={x2}"
                    )));
                }
                Ok(())
            }
            Self::Out { easing } | Self::InOut { easing } => easing.validate(),
            _ => Ok(()),
        }
    }
}

fn invalid(reason: String) -> ConfigurationError {
    ConfigurationError::InvalidOptions { reason }
}

impl EasingCurve for Easing {
    fn ease(&self, t: f64) -> f64 {
        match self {
            Self::Linear => t,
            Self::Sin => 1.0 - (t * PI / 2.0).cos(),
            Self::Quad => t * t,
            Self::Cubic => t * t * t,
            Self::Poly { exponent } => t.powf(*exponent),
            Self::Circle => 1.0 - (1.0 - t * t).sqrt(),
            Self::Exp => 2f64.powf(10.0 * (t - 1.0)),
            Self::Back { overshoot } => t * t * ((overshoot + 1.0) * t - overshoot),
            Self::CubicBezier { x1, y1, x2, y2 } => bezier_ease(t, *x1, *y1, *x2, *y2),
            Self::Out { easing } => 1.0 - easing.ease(1.0 - t),
            Self::InOut { easing } => {
                if t < 0.5 {
                    easing.ease(t * 2.0) / 2.0
                } else {
                    1.0 - easing.ease((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

impl FromStr for Easing {
    type Err = ConfigurationError;

    /// Parses the shorthand names accepted in options (`"sin"`, `"easeInOut"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "sin" => Ok(Self::Sin),
            "quad" => Ok(Self::Quad),
            "cubic" => Ok(Self::Cubic),
            "circle" => Ok(Self::Circle),
            "exp" => Ok(Self::Exp),
            "back" => Ok(Self::back()),
            "ease" => Ok(Self::ease()),
            "easeInOut" => Ok(Self::ease_in_out()),
            other => Err(invalid(format!("unknown easing '{other}'"))),
        }
    }
}

/// Cubic Bezier basis with P0 = 0 and P3 = 1.
#[inline]
fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

#[inline]
fn bezier_coord_derivative(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Eased y for progress `t`, inverting x(s) = t inside [0,1] and continuing
/// along the end tangents outside it.
fn bezier_ease(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    // Control points on the diagonal give the identity curve.
    if x1 == y1 && x2 == y2 {
        return t;
    }
    // A flat tangent holds the endpoint, even for infinite t.
    if t < 0.0 {
        let slope = start_slope(x1, y1, x2, y2);
        return if slope == 0.0 { 0.0 } else { t * slope };
    }
    if t > 1.0 {
        let slope = end_slope(x1, y1, x2, y2);
        return if slope == 0.0 { 1.0 } else { 1.0 + (t - 1.0) * slope };
    }
    if t == 0.0 || t == 1.0 {
        return t;
    }
    bezier_coord(y1, y2, solve_param_for_x(t, x1, x2))
}

fn start_slope(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x1 > 0.0 {
        y1 / x1
    } else if y1 == 0.0 && x2 > 0.0 {
        y2 / x2
    } else {
        0.0
    }
}

fn end_slope(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x2 < 1.0 {
        (y2 - 1.0) / (x2 - 1.0)
    } else if y2 == 1.0 && x1 < 1.0 {
        (y1 - 1.0) / (x1 - 1.0)
    } else {
        0.0
    }
}

/// Newton-Raphson from `s = x`, falling back to bisection when the slope
/// flattens out. x(s) is monotonic for x1, x2 in [0,1].
fn solve_param_for_x(x: f64, x1: f64, x2: f64) -> f64 {
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < SOLVE_EPSILON {
            return s;
        }
        let slope = bezier_coord_derivative(x1, x2, s);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        s -= err / slope;
    }

    let mut lo = 0.0f64;
    let mut hi = 1.0f64;
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let cur = bezier_coord(x1, x2, s);
        if (cur - x).abs() < SOLVE_EPSILON {
            break;
        }
        if cur < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sin_matches_closed_form() {
        assert_eq!(Easing::Sin.ease(0.5), 1.0 - (0.5 * PI / 2.0).cos());
        assert_eq!(Easing::Sin.ease(0.0), 0.0);
    }

    #[test]
    fn diagonal_bezier_is_identity() {
        let e = Easing::cubic_bezier(0.3, 0.3, 0.7, 0.7).unwrap();
        for t in [-2.0, 0.0, 0.25, 0.5, 1.0, 3.5] {
            assert_eq!(e.ease(t), t);
        }
    }

    #[test]
    fn bezier_hits_endpoints_and_is_monotonic() {
        let e = Easing::ease_in_out();
        assert_eq!(e.ease(0.0), 0.0);
        assert_eq!(e.ease(1.0), 1.0);
        assert_abs_diff_eq!(e.ease(0.5), 0.5, epsilon = 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = e.ease(i as f64 / 100.0);
            assert!(y >= prev - 1e-9, "not monotonic at {i}");
            prev = y;
        }
    }

    #[test]
    fn bezier_extends_along_tangents() {
        // (0.42,0) start tangent is flat, (0.58,1) end tangent is flat.
        let e = Easing::ease_in_out();
        assert_eq!(e.ease(-1.0), 0.0);
        assert_eq!(e.ease(2.0), 1.0);

        // Start tangent through (0.25,0.5) has slope 2.
        let steep = Easing::cubic_bezier(0.25, 0.5, 0.75, 0.5).unwrap();
        assert_abs_diff_eq!(steep.ease(-0.5), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(steep.ease(1.5), 1.0 + 0.5 * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn bezier_infinite_fraction_is_not_nan() {
        let e = Easing::ease_in_out();
        assert_eq!(e.ease(f64::INFINITY), 1.0);
        assert_eq!(e.ease(f64::NEG_INFINITY), 0.0);

        // `ease` has a flat start and a sloped end.
        let ease = Easing::ease();
        assert_eq!(ease.ease(f64::NEG_INFINITY), 0.0);
        assert_eq!(ease.ease(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn bezier_rejects_out_of_range_x() {
        let err = Easing::cubic_bezier(1.5, 0.0, 0.5, 1.0).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidOptions);
        assert!(Easing::cubic_bezier(0.1, f64::NAN, 0.5, 1.0).is_err());
        // y may overshoot freely.
        assert!(Easing::cubic_bezier(0.5, -0.6, 0.5, 1.6).is_ok());
    }

    #[test]
    fn out_and_in_out_mirror() {
        let out = Easing::out(Easing::Quad);
        assert_abs_diff_eq!(out.ease(0.25), 1.0 - 0.75 * 0.75, epsilon = 1e-12);
        let io = Easing::in_out(Easing::Cubic);
        assert_eq!(io.ease(0.5), 0.5);
        assert_abs_diff_eq!(io.ease(0.25), 0.0625, epsilon = 1e-12);
        assert_abs_diff_eq!(io.ease(0.75), 0.9375, epsilon = 1e-12);
    }

    #[test]
    fn closures_are_curves() {
        let double = |t: f64| t * 2.0;
        assert_eq!(double.ease(0.25), 0.5);
        let dynamic: &dyn EasingCurve = &double;
        assert_eq!(dynamic.ease(2.0), 4.0);
    }

    #[test]
    fn shorthand_names_parse() {
        assert_eq!("sin".parse::<Easing>().unwrap(), Easing::Sin);
        assert_eq!("easeInOut".parse::<Easing>().unwrap(), Easing::ease_in_out());
        assert!("bounce".parse::<Easing>().is_err());
    }

    #[test]
    fn tagged_json_roundtrip() {
        let e = Easing::out(Easing::Poly { exponent: 4.0 });
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "out", "easing": {"type": "poly", "exponent": 4.0}})
        );
        let back: Easing = serde_json::from_value(serde_json::json!({"type": "back"})).unwrap();
        assert_eq!(back, Easing::back());
    }
}
