use bevy::math::Vec3;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Camera position before any model has been framed.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 1.0, 5.0);

/// Camera distance is `FRAMING_MARGIN * max(extent)` of the model bounds.
pub const FRAMING_MARGIN: f32 = 1.5;

/// Unnormalised offset direction from the model centre to the camera.
pub const FRAMING_DIRECTION: Vec3 = Vec3::new(1.0, 0.4, 1.0);

/// Fraction of the pending orbit motion applied per frame.
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;

pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;

/// Keeps the polar angle away from the poles so `looking_at` stays defined.
pub const ORBIT_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
