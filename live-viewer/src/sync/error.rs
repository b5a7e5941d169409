use thiserror::Error;

/// Failures while resolving which export to display. Decoder failures are
/// reported by the asset server and never become a `SyncError`.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Request could not be made or did not complete
    #[error("network error: {0}")]
    Network(String),

    /// Latest-model body was not the expected JSON
    #[error("invalid latest-model response: {0}")]
    Json(#[from] serde_json::Error),

    /// Exports directory could not be read
    #[error("exports directory error: {0}")]
    Io(#[from] std::io::Error),

    /// No browser window to issue requests from
    #[error("browser window not available")]
    NoWindow,
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

#[cfg(target_arch = "wasm32")]
impl SyncError {
    pub fn from_js(value: wasm_bindgen::JsValue) -> Self {
        Self::Network(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}
