use serde::Deserialize;
use std::time::Duration;

/// Body of the latest-model endpoint. The server also answers 404 with an
/// `error` field and no filename; both mean there is nothing to display.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LatestModelResponse {
    #[serde(default)]
    pub filename: Option<String>,
}

impl LatestModelResponse {
    pub fn parse(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    pub fn into_filename(self) -> Option<String> {
        self.filename.filter(|name| !name.is_empty())
    }
}

/// The export the server currently considers newest.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestExport {
    pub filename: String,
    /// Display only; `None` when the size header was absent or unreadable.
    pub size_bytes: Option<u64>,
}

/// Details shown in the status overlay, recomputed on every load.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetadata {
    pub filename: String,
    pub size_bytes: Option<u64>,
    pub load_time: Duration,
}

impl LoadMetadata {
    pub fn new(filename: impl Into<String>, size_bytes: Option<u64>) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
            load_time: Duration::ZERO,
        }
    }
}

impl From<&LatestExport> for LoadMetadata {
    fn from(export: &LatestExport) -> Self {
        Self::new(export.filename.clone(), export.size_bytes)
    }
}

/// Bytes decoded so far against the advertised total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadProgress {
    pub loaded: u64,
    pub total: Option<u64>,
}

impl LoadProgress {
    /// Percentage complete. NaN when the total is unknown or zero.
    pub fn percent(&self) -> f64 {
        match self.total {
            Some(total) => self.loaded as f64 / total as f64 * 100.0,
            None => f64::NAN,
        }
    }
}

/// Parse a `content-length` header value.
pub fn parse_content_length(value: Option<&str>) -> Option<u64> {
    value?.trim().parse().ok()
}
