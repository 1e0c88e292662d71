//! Error type shared by the codec, api and orchestrator layers.
//!
//! Field-level parse failures are not errors here: they are tracked as invalid
//! flags on the form state and reported through validation.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("invalid edit target: {0}")]
    InvalidTarget(String),

    #[error("browser API unavailable: {0}")]
    MissingBrowserApi(&'static str),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("failed to encode {type_name}: {source}")]
    Encode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {type_name}: {source}")]
    Decode {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset has no reaction at index {index} ({len} reactions)")]
    MissingReaction { index: usize, len: usize },
}

impl EditorError {
    /// Wrap a rejected JS promise or failed JS call.
    pub fn from_js(context: &str, value: JsValue) -> Self {
        EditorError::Network(format!("{}: {:?}", context, value))
    }
}
