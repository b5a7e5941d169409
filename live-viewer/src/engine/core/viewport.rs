use crate::engine::camera::ViewerCamera;
use bevy::prelude::*;
use bevy::window::WindowResized;

/// Current drawable surface size. The camera aspect ratio always follows it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl ViewportState {
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Record new surface dimensions. Degenerate sizes (a minimised window)
    /// are ignored so the aspect ratio never becomes infinite or NaN.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

/// Point the perspective projection at the viewport's aspect ratio.
pub fn apply_aspect(projection: &mut Projection, viewport: &ViewportState) {
    if let Projection::Perspective(perspective) = projection {
        perspective.aspect_ratio = viewport.aspect();
    }
}

/// Recompute the camera projection whenever the window is resized. The
/// surface itself is resized by the windowing backend.
pub fn handle_window_resize(
    mut resized: EventReader<WindowResized>,
    mut viewport: ResMut<ViewportState>,
    mut cameras: Query<&mut Projection, With<ViewerCamera>>,
) {
    for event in resized.read() {
        if !viewport.resize(event.width, event.height) {
            debug!(
                "Ignoring degenerate resize to {}x{}",
                event.width, event.height
            );
            continue;
        }

        for mut projection in &mut cameras {
            apply_aspect(&mut projection, &viewport);
        }
    }
}
