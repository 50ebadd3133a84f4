//! Per-call interpolation options.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::easing::Easing;
use crate::error::ConfigurationError;
use crate::extrapolate::{Extrapolation, ExtrapolationPolicy};
use crate::Result;

/// Options for one evaluation. Every field defaults when omitted: linear
/// easing and `extend` on both sides.
///
/// JSON field names are camelCase (`extrapolateLeft`, `extrapolateRight`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpolateOptions {
    pub easing: Easing,
    pub extrapolate_left: Extrapolation,
    pub extrapolate_right: Extrapolation,
}

impl InterpolateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_extrapolate_left(mut self, left: Extrapolation) -> Self {
        self.extrapolate_left = left;
        self
    }

    pub fn with_extrapolate_right(mut self, right: Extrapolation) -> Self {
        self.extrapolate_right = right;
        self
    }

    pub fn with_extrapolation(mut self, policy: ExtrapolationPolicy) -> Self {
        self.extrapolate_left = policy.left;
        self.extrapolate_right = policy.right;
        self
    }

    #[inline]
    pub fn extrapolation(&self) -> ExtrapolationPolicy {
        ExtrapolationPolicy::new(self.extrapolate_left, self.extrapolate_right)
    }

    pub fn validate(&self) -> Result<()> {
        self.easing.validate()
    }

    /// Parse options from loosely shaped JSON.
    ///
    /// Accepts shorthand easing names (`"easing": "sin"`) as well as the tagged
    /// form, and treats `null` fields as absent.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        let normalized = normalize_options_json(value)?;
        let options: Self = serde_json::from_value(normalized).map_err(|e| {
            ConfigurationError::InvalidOptions {
                reason: e.to_string(),
            }
        })?;
        options.validate()?;
        Ok(options)
    }
}

/// Rewrite shorthand options JSON into the canonical form the serde derives
/// understand.
pub fn normalize_options_json(value: &JsonValue) -> Result<JsonValue> {
    match value {
        JsonValue::Null => Ok(JsonValue::Object(Map::new())),
        JsonValue::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, field) in map {
                if field.is_null() {
                    continue;
                }
                let field = if key == "easing" {
                    normalize_easing_json(field)?
                } else {
                    field.clone()
                };
                out.insert(key.clone(), field);
            }
            Ok(JsonValue::Object(out))
        }
        other => Err(ConfigurationError::InvalidOptions {
            reason: format!("options must be an object, but got {other}"),
        }),
    }
}

/// `"sin"` -> `{ "type": "sin" }`, recursing into `out` / `inOut` wrappers.
pub fn normalize_easing_json(value: &JsonValue) -> Result<JsonValue> {
    match value {
        JsonValue::String(name) => {
            let easing: Easing = name.parse()?;
            serde_json::to_value(&easing).map_err(|e| ConfigurationError::InvalidOptions {
                reason: e.to_string(),
            })
        }
        JsonValue::Object(map) => {
            let mut out = map.clone();
            if let Some(inner) = map.get("easing") {
                out.insert("easing".to_string(), normalize_easing_json(inner)?);
            }
            Ok(JsonValue::Object(out))
        }
        other => Err(ConfigurationError::InvalidOptions {
            reason: format!("easing must be a name or an object, but got {other}"),
        }),
    }
}
