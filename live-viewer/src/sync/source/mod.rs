//! Where the latest export is looked up.
//!
//! Web builds ask the companion server over HTTP. Native builds apply the
//! server's own rule to the exports directory: newest `.glb` by
//! modification time.

#[cfg(not(target_arch = "wasm32"))]
pub mod local;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use local::fetch_latest_export;
#[cfg(target_arch = "wasm32")]
pub use web::fetch_latest_export;
