//! Progress fraction and output blending for a resolved segment.

use crate::easing::EasingCurve;

/// Linear progress of `x` through segment `segment`. Leaves [0,1] for
/// extended values.
#[inline]
pub fn progress(x: f64, segment: usize, input_range: &[f64]) -> f64 {
    let lo = input_range[segment];
    let hi = input_range[segment + 1];
    (x - lo) / (hi - lo)
}

/// `a + t * (b - a)`, returning `b` bit-exactly at `t == 1`.
#[inline]
pub fn blend(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 {
        return b;
    }
    a + t * (b - a)
}

/// Map `x` through segment `segment` with the given easing.
pub fn map_segment<E>(
    x: f64,
    segment: usize,
    input_range: &[f64],
    output_range: &[f64],
    easing: &E,
) -> f64
where
    E: EasingCurve + ?Sized,
{
    let out_lo = output_range[segment];
    let out_hi = output_range[segment + 1];
    // Flat segment: avoids inf * 0 for infinite driving values.
    if out_lo == out_hi {
        return out_lo;
    }
    let t = progress(x, segment, input_range);
    blend(out_lo, out_hi, easing.ease(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn blend_is_exact_at_both_ends() {
        assert_eq!(blend(0.1, 0.7, 0.0), 0.1);
        assert_eq!(blend(0.1, 0.7, 1.0), 0.7);
        assert_eq!(blend(-1000.0, 1000.0, 0.5), 0.0);
    }

    #[test]
    fn progress_extends_past_segment() {
        assert_eq!(progress(-3.0, 0, &[0.0, 1.0, 2.0]), -3.0);
        assert_eq!(progress(4.0, 1, &[0.0, 1.0, 2.0]), 3.0);
    }

    #[test]
    fn flat_segment_with_infinite_input() {
        let v = map_segment(f64::INFINITY, 0, &[0.0, 1.0], &[2.0, 2.0], &Easing::Linear);
        assert_eq!(v, 2.0);
    }
}
