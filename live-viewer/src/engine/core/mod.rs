//! Core application setup for the scene host.
//!
//! Handles application lifecycle, window configuration and plugin
//! initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the scene host, asset sync and notification
/// channel wired together.
pub mod app_setup;

/// Runtime paths derived from the fixed constants.
pub mod config;

/// Viewport dimensions and window resize handling.
pub mod viewport;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
