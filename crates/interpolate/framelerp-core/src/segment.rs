//! Segment lookup over a validated breakpoint table.

/// Where a driving value falls relative to the breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// `B[i] <= x <= B[i + 1]`.
    Within(usize),
    /// `x < B[0]`.
    BelowFirst,
    /// `x > B[N - 1]`.
    AboveLast,
}

impl Segment {
    /// Segment whose slope governs the value: boundary indicators map to the
    /// first or last segment.
    #[inline]
    pub fn index(&self, breakpoints: usize) -> usize {
        match self {
            Self::Within(i) => *i,
            Self::BelowFirst => 0,
            Self::AboveLast => breakpoints.saturating_sub(2),
        }
    }
}

/// Locate the segment containing `x`.
///
/// `input_range` must already be validated (length >= 2, strictly increasing).
/// An exact hit on an interior breakpoint resolves to the segment ending at
/// that breakpoint, so the first segment whose right edge is `>= x` wins.
/// Binary search over the interior breakpoints keeps this O(log N).
pub fn locate_segment(x: f64, input_range: &[f64]) -> Segment {
    let n = input_range.len();
    debug_assert!(n >= 2, "breakpoint table must be validated before lookup");
    if x < input_range[0] {
        return Segment::BelowFirst;
    }
    if x > input_range[n - 1] {
        return Segment::AboveLast;
    }
    // Count of interior breakpoints strictly below x.
    Segment::Within(input_range[1..n - 1].partition_point(|&b| b < x))
}
