use bevy::prelude::*;
use constants::endpoints::{EXPORTS_ROUTE, WEB_ASSET_ROOT};
use std::path::PathBuf;

/// Where the viewer finds the server endpoints and the exported files.
///
/// Web builds talk to the page origin. Native builds read the exports
/// directory under the working directory, the same layout the companion
/// server serves from.
#[derive(Resource, Debug, Clone)]
pub struct ViewerConfig {
    /// Root handed to the asset server; the exports route resolves under it.
    pub asset_root: PathBuf,
    /// Prefix for server endpoints. Empty means same origin.
    pub server_origin: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        #[cfg(target_arch = "wasm32")]
        let asset_root = PathBuf::from(WEB_ASSET_ROOT);

        #[cfg(not(target_arch = "wasm32"))]
        let asset_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from(WEB_ASSET_ROOT));

        Self {
            asset_root,
            server_origin: String::new(),
        }
    }
}

impl ViewerConfig {
    pub fn exports_dir(&self) -> PathBuf {
        self.asset_root.join(EXPORTS_ROUTE)
    }

    /// Asset server path of an export, relative to `asset_root`.
    pub fn asset_path(filename: &str) -> String {
        format!("{EXPORTS_ROUTE}/{filename}")
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.server_origin.trim_end_matches('/'), path)
    }

    pub fn export_url(&self, filename: &str) -> String {
        self.endpoint_url(&format!("/{}", Self::asset_path(filename)))
    }
}
