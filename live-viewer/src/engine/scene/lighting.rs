use bevy::prelude::*;
use constants::lighting::{
    AMBIENT_BRIGHTNESS_PER_UNIT, AMBIENT_INTENSITY, AMBIENT_RGB, BACKGROUND_RGB,
    DIRECTIONAL_LUX_PER_UNIT, FILL_LIGHT_INTENSITY, FILL_LIGHT_POSITION, MAIN_LIGHT_INTENSITY,
    MAIN_LIGHT_POSITION,
};

#[derive(Component)]
pub struct MainLight;

#[derive(Component)]
pub struct FillLight;

fn rgb(bytes: [u8; 3]) -> Color {
    Color::srgb_u8(bytes[0], bytes[1], bytes[2])
}

pub fn background_colour() -> ClearColor {
    ClearColor(rgb(BACKGROUND_RGB))
}

pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: rgb(AMBIENT_RGB),
        brightness: AMBIENT_INTENSITY * AMBIENT_BRIGHTNESS_PER_UNIT,
        ..default()
    }
}

/// Key light from above-right and a dim fill from behind-left, both aimed
/// at the origin.
pub fn spawn_lighting(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: MAIN_LIGHT_INTENSITY * DIRECTIONAL_LUX_PER_UNIT,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(MAIN_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        MainLight,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: FILL_LIGHT_INTENSITY * DIRECTIONAL_LUX_PER_UNIT,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(FILL_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        FillLight,
    ));
}
