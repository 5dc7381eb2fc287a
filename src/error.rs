use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("network error fetching {dataset}: {source}")]
    Network {
        dataset: &'static str,
        #[source]
        source: gloo_net::Error,
    },
    #[error("HTTP {status} fetching {dataset}")]
    Status { dataset: &'static str, status: u16 },
    #[error("failed to parse {dataset}: {source}")]
    Parse {
        dataset: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("missing element: {0}")]
    MissingElement(&'static str),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        RenderError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
