use js_sys::{Array, Function, Reflect};
use serde_json::{Map as JsonMap, Value as JsonValue};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use framelerp_core::{
    interpolate_dyn_with, ConfigurationError, DynArg, Easing, EasingCurve, ExtrapolationPolicy,
    InterpolateOptions, KeyframeTable,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js_error(err: ConfigurationError) -> JsError {
    JsError::new(&format!("{}: {}", err.kind(), err))
}

/// Easing callback supplied from JS as `options.easing`.
struct JsEasing {
    f: Function,
}

impl EasingCurve for JsEasing {
    fn ease(&self, t: f64) -> f64 {
        // A throwing or non-numeric callback yields NaN rather than aborting the frame.
        match self.f.call1(&JsValue::UNDEFINED, &JsValue::from_f64(t)) {
            Ok(val) => val.as_f64().unwrap_or(f64::NAN),
            Err(_) => f64::NAN,
        }
    }
}

enum Curve {
    Builtin(Easing),
    Js(JsEasing),
}

impl EasingCurve for Curve {
    fn ease(&self, t: f64) -> f64 {
        match self {
            Curve::Builtin(easing) => easing.ease(t),
            Curve::Js(js) => js.ease(t),
        }
    }
}

/// Convert a JS argument into the untyped form the core validates.
fn to_dyn(v: &JsValue) -> DynArg {
    if jsvalue_is_undefined_or_null(v) {
        return DynArg::Missing;
    }
    if let Some(n) = v.as_f64() {
        return DynArg::Number(n);
    }
    if Array::is_array(v) {
        let items = Array::from(v);
        return DynArg::List(items.iter().map(|item| to_dyn(&item)).collect());
    }
    DynArg::Other(
        v.js_typeof()
            .as_string()
            .unwrap_or_else(|| "unknown".to_string()),
    )
}

fn options_error(reason: String) -> ConfigurationError {
    ConfigurationError::InvalidOptions { reason }
}

fn field(options: &JsValue, key: &str) -> Result<JsValue, ConfigurationError> {
    Reflect::get(options, &JsValue::from_str(key))
        .map_err(|e| options_error(format!("cannot read options.{key}: {e:?}")))
}

/// Read `options` into an easing curve and extrapolation policy.
///
/// A function `easing` is kept as a JS callback; everything else goes through
/// the same JSON normalization the core applies.
fn read_options(options: &JsValue) -> Result<(Curve, ExtrapolationPolicy), ConfigurationError> {
    if jsvalue_is_undefined_or_null(options) {
        let defaults = InterpolateOptions::default();
        let extrapolation = defaults.extrapolation();
        return Ok((Curve::Builtin(defaults.easing), extrapolation));
    }
    if !options.is_object() {
        return Err(options_error(format!(
            "options must be an object, but got {}",
            options.js_typeof().as_string().unwrap_or_default()
        )));
    }

    let mut js_easing = None;
    let mut json = JsonMap::new();
    for key in ["easing", "extrapolateLeft", "extrapolateRight"] {
        let value = field(options, key)?;
        if jsvalue_is_undefined_or_null(&value) {
            continue;
        }
        if key == "easing" {
            if let Some(f) = value.dyn_ref::<Function>() {
                js_easing = Some(JsEasing { f: f.clone() });
                continue;
            }
        }
        let value: JsonValue = swb::from_value(value)
            .map_err(|e| options_error(format!("options.{key}: {e}")))?;
        json.insert(key.to_string(), value);
    }

    let parsed = InterpolateOptions::from_json(&JsonValue::Object(json))?;
    let policy = parsed.extrapolation();
    let curve = match js_easing {
        Some(js) => Curve::Js(js),
        None => Curve::Builtin(parsed.easing),
    };
    Ok((curve, policy))
}

/// Map `input` through the keyframe tables.
///
/// Arguments mirror the JS call: `interpolate(frame, [0, 30], [0, 1], { extrapolateRight: "clamp" })`.
/// Errors are thrown as `Error("<kind>: <message>")`.
#[wasm_bindgen]
pub fn interpolate(
    input: JsValue,
    input_range: JsValue,
    output_range: JsValue,
    options: JsValue,
) -> Result<f64, JsError> {
    console_error_panic_hook::set_once();

    let input = to_dyn(&input);
    let input_range = to_dyn(&input_range);
    let output_range = to_dyn(&output_range);

    match read_options(&options) {
        Ok((curve, policy)) => {
            interpolate_dyn_with(&input, &input_range, &output_range, &curve, policy)
                .map_err(to_js_error)
        }
        Err(options_err) => {
            // Argument errors take precedence over option errors.
            interpolate_dyn_with(
                &input,
                &input_range,
                &output_range,
                &Easing::Linear,
                ExtrapolationPolicy::default(),
            )
            .map_err(to_js_error)?;
            Err(to_js_error(options_err))
        }
    }
}

/// Pre-validated keyframe tables for per-frame sampling.
#[wasm_bindgen]
pub struct Keyframes {
    table: KeyframeTable,
}

#[wasm_bindgen]
impl Keyframes {
    #[wasm_bindgen(constructor)]
    pub fn new(input_range: JsValue, output_range: JsValue) -> Result<Keyframes, JsError> {
        console_error_panic_hook::set_once();

        let table = KeyframeTable::from_dyn(&to_dyn(&input_range), &to_dyn(&output_range))
            .map_err(to_js_error)?;
        Ok(Keyframes { table })
    }

    /// Number of breakpoints.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.table.len()
    }

    pub fn sample(&self, input: f64, options: JsValue) -> Result<f64, JsError> {
        if input.is_nan() {
            return Err(to_js_error(ConfigurationError::NonNumericInput {
                found: "NaN".to_string(),
            }));
        }
        let (curve, policy) = read_options(&options).map_err(to_js_error)?;
        self.table
            .sample_with(input, &curve, policy)
            .map_err(to_js_error)
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
