//! framelerp core (engine-agnostic)
//!
//! Maps a driving value (frame index, elapsed time) through a keyframe table:
//! a strictly increasing breakpoint table and an index-aligned output table.
//! The result is a piecewise linear blend, optionally eased, with independent
//! left/right extrapolation. A frame-based renderer calls this once per
//! animated property per frame.
//!
//! Pipeline: validate -> locate segment -> resolve extrapolation -> progress
//! fraction -> easing -> blend. Every call is pure and synchronous.

pub mod config;
pub mod dynamic;
pub mod easing;
pub mod error;
pub mod extrapolate;
pub mod interpolate;
pub mod mapper;
pub mod segment;
pub mod table;
pub mod validate;

// Re-exports for consumers (bindings, renderers)
pub use config::InterpolateOptions;
pub use dynamic::{interpolate_dyn, interpolate_dyn_with, interpolate_json, DynArg};
pub use easing::{Easing, EasingCurve};
pub use error::{Argument, ConfigurationError, ErrorKind, RangeName};
pub use extrapolate::{Extrapolation, ExtrapolationPolicy};
pub use interpolate::{interpolate, interpolate_with};
pub use segment::{locate_segment, Segment};
pub use table::KeyframeTable;

/// Result type for keyframe evaluation.
pub type Result<T> = core::result::Result<T, ConfigurationError>;
