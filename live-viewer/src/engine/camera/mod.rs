//! Viewport camera for model inspection.
//!
//! Provides orbit controls with damping and the bounding-box framing used to
//! fit each freshly loaded model into view.

use bevy::prelude::*;

/// Bounding volumes and the fixed framing rule derived from them.
pub mod framing;

/// Damped orbit controls resource and the per-frame controller system.
pub mod orbit_controls;

/// Marks the single perspective camera the viewer renders through.
#[derive(Component, Debug, Default)]
pub struct ViewerCamera;
