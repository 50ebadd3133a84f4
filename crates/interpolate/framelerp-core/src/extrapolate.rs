//! Out-of-range policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::segment::Segment;

/// Behaviour on one side of the breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Continue the boundary segment's slope.
    #[default]
    Extend,
    /// Pin the driving value to the boundary breakpoint.
    Clamp,
    /// Return the driving value untouched.
    Identity,
}

impl Extrapolation {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Extend => "extend",
            Self::Clamp => "clamp",
            Self::Identity => "identity",
        }
    }
}

impl fmt::Display for Extrapolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Extrapolation {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extend" => Ok(Self::Extend),
            "clamp" => Ok(Self::Clamp),
            "identity" => Ok(Self::Identity),
            other => Err(ConfigurationError::InvalidOptions {
                reason: format!(
                    "extrapolation must be one of \"extend\", \"clamp\", \"identity\", but got \"{other}\""
                ),
            }),
        }
    }
}

/// Independent left/right extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ExtrapolationPolicy {
    pub left: Extrapolation,
    pub right: Extrapolation,
}

impl ExtrapolationPolicy {
    #[inline]
    pub const fn new(left: Extrapolation, right: Extrapolation) -> Self {
        Self { left, right }
    }

    #[inline]
    pub const fn uniform(both: Extrapolation) -> Self {
        Self::new(both, both)
    }

    #[inline]
    pub const fn extend() -> Self {
        Self::uniform(Extrapolation::Extend)
    }

    #[inline]
    pub const fn clamp() -> Self {
        Self::uniform(Extrapolation::Clamp)
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::uniform(Extrapolation::Identity)
    }
}

/// What the mapper should do with a located driving value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Blend within `segment` at `input` (possibly outside the segment).
    Map { segment: usize, input: f64 },
    /// Skip mapping and easing; this is the result.
    Identity(f64),
}

/// Apply the side's policy when `location` is outside the table.
pub fn resolve_extrapolation(
    location: Segment,
    input: f64,
    input_range: &[f64],
    policy: ExtrapolationPolicy,
) -> Resolution {
    let n = input_range.len();
    let (side, boundary) = match location {
        Segment::Within(segment) => return Resolution::Map { segment, input },
        Segment::BelowFirst => (policy.left, input_range[0]),
        Segment::AboveLast => (policy.right, input_range[n - 1]),
    };
    log::trace!("input {input} outside [{}, {}], applying {side}", input_range[0], input_range[n - 1]);

    let segment = location.index(n);
    match side {
        Extrapolation::Extend => Resolution::Map { segment, input },
        Extrapolation::Clamp => Resolution::Map {
            segment,
            input: boundary,
        },
        Extrapolation::Identity => Resolution::Identity(input),
    }
}
