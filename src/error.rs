//! Error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The canvas refused to hand out a 2D context; the session cannot start
    #[error("2D rendering context is not available")]
    MissingContext,

    #[error("invalid map id {0} (expected 1, 2 or 3)")]
    InvalidMapId(u8),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("score relay failed: {0}")]
    Relay(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for GameError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        GameError::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GameError> for wasm_bindgen::JsValue {
    fn from(err: GameError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
