use crate::engine::core::config::ViewerConfig;
use crate::sync::error::{SyncError, SyncResult};
use crate::sync::metadata::{LatestExport, LatestModelResponse, parse_content_length};
use constants::endpoints::LATEST_MODEL_ENDPOINT;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

/// Ask the server for the newest export, then for its size.
pub async fn fetch_latest_export(config: ViewerConfig) -> SyncResult<Option<LatestExport>> {
    let window = web_sys::window().ok_or(SyncError::NoWindow)?;

    let response = fetch(&window, &config.endpoint_url(LATEST_MODEL_ENDPOINT), "GET").await?;
    let body = JsFuture::from(response.text().map_err(SyncError::from_js)?)
        .await
        .map_err(SyncError::from_js)?
        .as_string()
        .unwrap_or_default();

    let Some(filename) = LatestModelResponse::parse(&body)?.into_filename() else {
        return Ok(None);
    };

    // Size is for display only; a missing header is carried through as None.
    let head = fetch(&window, &config.export_url(&filename), "HEAD").await?;
    let content_length = head.headers().get("content-length").ok().flatten();
    let size_bytes = parse_content_length(content_length.as_deref());

    Ok(Some(LatestExport {
        filename,
        size_bytes,
    }))
}

async fn fetch(window: &Window, url: &str, method: &str) -> SyncResult<Response> {
    let init = RequestInit::new();
    init.set_method(method);

    let request = Request::new_with_str_and_init(url, &init).map_err(SyncError::from_js)?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(SyncError::from_js)?;

    value.dyn_into::<Response>().map_err(SyncError::from_js)
}
