//! wasm-bindgen interface for Vitrine page widgets.
//!
//! The page drives the engine: collect DOM events into an Inputs JSON,
//! call update(dt, inputs) once per animation frame, and apply the
//! returned changes. The visual decoration contract for canonical slots:
//! - "carousel.N/slide.I" (bool): the panel's shown/hidden display state
//!   and its active decoration class
//! - "carousel.N/dot.I" (bool): the pagination dot's active class
//! - "counter.N/value" (int): rendered as the display element's text
//! - "counter.N/animate" (bool): the CSS animation-state class on the
//!   stats item
//! Styling for these markers is the page's responsibility.

use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vitrine_widgets_core::{
    parse_page_manifest_json, CarouselId, CarouselSpec, Config, CounterId, CounterSpec, Engine,
    Inputs, ManifestIds, Outputs, TargetResolver,
};

#[wasm_bindgen]
pub struct VitrineWidgets {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

struct JsResolver {
    f: Function,
}

impl TargetResolver for JsResolver {
    fn resolve(&mut self, path: &str) -> Option<String> {
        // Call JS resolver(path) - expect string key; allow number fallback -> string
        let arg = JsValue::from_str(path);
        match self.f.call1(&JsValue::UNDEFINED, &arg) {
            Ok(val) => {
                if val.is_undefined() || val.is_null() {
                    return None;
                }
                if let Some(s) = val.as_string() {
                    return Some(s);
                }
                if let Some(n) = val.as_f64() {
                    return Some(if n.fract() == 0.0 {
                        format!("{}", n as i64)
                    } else {
                        format!("{}", n)
                    });
                }
                // Attempt serde conversion to String as a last resort
                swb::from_value::<String>(val).ok()
            }
            Err(_) => None,
        }
    }
}

#[wasm_bindgen]
impl VitrineWidgets {
    /// Create a new engine instance. Pass a JSON config object or
    /// undefined/null for defaults.
    /// Example:
    ///   new VitrineWidgets({ rotation_interval_ms: 8000 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VitrineWidgets, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(VitrineWidgets {
            core: Engine::new(cfg),
        })
    }

    /// Load a page manifest JSON (counters with raw data-attribute targets,
    /// carousels with slide/dot counts). Validation is strict; malformed
    /// targets reject the whole manifest. Returns the assigned ids as
    /// { counters: [..], carousels: [..] }.
    #[wasm_bindgen(js_name = load_manifest)]
    pub fn load_manifest(&mut self, manifest_json: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&manifest_json) {
            return Err(JsError::new("load_manifest: manifest_json is null/undefined"));
        }
        // Stringify the JS object so we can reuse the core parser (expects &str)
        let s = js_sys::JSON::stringify(&manifest_json)
            .map_err(|e| JsError::new(&format!("load_manifest stringify error: {:?}", e)))?
            .as_string()
            .ok_or_else(|| JsError::new("load_manifest: stringify produced non-string"))?;
        let manifest = parse_page_manifest_json(&s)
            .map_err(|e| JsError::new(&format!("load_manifest error: {e}")))?;
        let ids: ManifestIds = self.core.load_manifest(manifest);
        swb::to_value(&ids).map_err(|e| JsError::new(&format!("manifest ids error: {e}")))
    }

    /// Register a single counter. `spec` is JSON matching CounterSpec.
    /// Returns a CounterId (u32).
    #[wasm_bindgen(js_name = add_counter)]
    pub fn add_counter(&mut self, spec: JsValue) -> Result<u32, JsError> {
        let spec_rs: CounterSpec =
            swb::from_value(spec).map_err(|e| JsError::new(&format!("counter spec error: {e}")))?;
        let id: CounterId = self.core.add_counter(spec_rs);
        Ok(id.0)
    }

    /// Register a single carousel. `spec` is JSON matching CarouselSpec.
    /// Returns a CarouselId (u32).
    #[wasm_bindgen(js_name = add_carousel)]
    pub fn add_carousel(&mut self, spec: JsValue) -> Result<u32, JsError> {
        let spec_rs: CarouselSpec =
            swb::from_value(spec).map_err(|e| JsError::new(&format!("carousel spec error: {e}")))?;
        let id: CarouselId = self.core.add_carousel(spec_rs);
        Ok(id.0)
    }

    /// Resolve canonical slot paths to opaque keys using a JS resolver
    /// callback. The resolver is called as
    /// `resolver(path: string) -> string | number | null/undefined`.
    /// Resolved values are stored as strings.
    #[wasm_bindgen]
    pub fn prebind(&mut self, resolver: Function) {
        let mut js_resolver = JsResolver { f: resolver };
        self.core.prebind(&mut js_resolver);
    }

    /// Step the engine by dt (seconds) with inputs JSON. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let out: &Outputs = self.core.update(dt, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Current slide index of a carousel, or undefined for unknown ids.
    #[wasm_bindgen(js_name = carousel_index)]
    pub fn carousel_index(&self, carousel_id: u32) -> Option<u32> {
        self.core
            .carousel_index(CarouselId(carousel_id))
            .map(|i| i as u32)
    }

    /// Currently displayed value of a counter, or undefined for unknown ids.
    #[wasm_bindgen(js_name = counter_display)]
    pub fn counter_display(&self, counter_id: u32) -> Option<f64> {
        self.core
            .counter_display(CounterId(counter_id))
            .map(|v| v as f64)
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
