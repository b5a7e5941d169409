use bevy::math::Vec3;

/// Scene background, `0x2a2a2a`.
pub const BACKGROUND_RGB: [u8; 3] = [0x2a, 0x2a, 0x2a];

/// Ambient light colour, `0x404040`.
pub const AMBIENT_RGB: [u8; 3] = [0x40, 0x40, 0x40];
pub const AMBIENT_INTENSITY: f32 = 0.6;

pub const MAIN_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 5.0);
pub const MAIN_LIGHT_INTENSITY: f32 = 1.0;

pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(-5.0, 0.0, -5.0);
pub const FILL_LIGHT_INTENSITY: f32 = 0.3;

/// Relative light intensities are scaled onto physical units with these.
pub const DIRECTIONAL_LUX_PER_UNIT: f32 = 4_000.0;
pub const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 400.0;
