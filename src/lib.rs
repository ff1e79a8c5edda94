pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod format;
pub mod state;
pub mod token;

pub use crate::config::EngineConfig;
pub use crate::engine::{Calculation, CalculatorEngine, PressResult};
pub use crate::error::{CalcError, ConfigError};
pub use crate::events::{EngineEvent, Notifier, Renderer, ResultObserver};
pub use crate::token::{InputToken, Operator};

use crate::bridge::Bridge;
use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the calculator core version string.
#[wasm_bindgen(js_name = coreVersion)]
pub fn core_version() -> String {
    VERSION.to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed calculator. Each press returns an `Update` object.
#[wasm_bindgen]
pub struct Calculator {
    bridge: Bridge,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Calculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Calculator {
        Calculator {
            bridge: Bridge::new(CalculatorEngine::new()),
        }
    }

    /// Build from a JSON `EngineConfig`; omitted fields take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<Calculator, JsValue> {
        let config = EngineConfig::from_json(json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
        let engine =
            CalculatorEngine::with_config(config).map_err(|e| JsValue::from_str(&format!("{e}")))?;
        Ok(Calculator {
            bridge: Bridge::new(engine),
        })
    }

    /// Feed a `KeyboardEvent.key` value.
    #[wasm_bindgen(js_name = pressKey)]
    pub fn press_key(&mut self, key: &str) -> Result<JsValue, JsValue> {
        to_js(&self.bridge.press_key(key))
    }

    /// Feed a button `data-action` / `data-number` value.
    #[wasm_bindgen(js_name = pressAction)]
    pub fn press_action(&mut self, action: &str) -> Result<JsValue, JsValue> {
        to_js(&self.bridge.press_action(action))
    }

    pub fn display(&self) -> String {
        self.bridge.engine().display()
    }

    pub fn equation(&self) -> Option<String> {
        self.bridge.engine().equation()
    }

    /// Snapshot of the full calculator state.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.bridge.engine().state())
    }

    /// Completed calculations, newest first.
    pub fn history(&self) -> Result<JsValue, JsValue> {
        to_js(&self.bridge.engine().history().to_vec())
    }
}
