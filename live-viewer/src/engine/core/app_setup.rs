use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::camera::{FAR_PLANE, FOV_DEGREES, INITIAL_POSITION, NEAR_PLANE};
// Crate engine modules
use crate::engine::camera::ViewerCamera;
use crate::engine::camera::orbit_controls::{OrbitControls, orbit_camera_controller};
use crate::engine::core::config::ViewerConfig;
use crate::engine::core::viewport::{ViewportState, handle_window_resize};
use crate::engine::core::window_config::create_window_config;
use crate::engine::scene::lighting::{ambient_light, background_colour, spawn_lighting};
use crate::engine::scene::overlay::spawn_status_overlay;
// Sync and notification layers
use crate::channel::NotificationChannelPlugin;
use crate::sync::AssetSyncPlugin;

const LOG_FILTER: &str = "wgpu=error,naga=warn,live_viewer=info";

pub fn create_app() -> App {
    let config = ViewerConfig::default();
    let mut app = App::new();

    app.add_plugins(create_default_plugins(&config))
        .insert_resource(config)
        .insert_resource(background_colour())
        .insert_resource(ambient_light())
        .init_resource::<ViewportState>()
        .init_resource::<OrbitControls>()
        .add_plugins(AssetSyncPlugin)
        .add_plugins(NotificationChannelPlugin);

    app.add_systems(Startup, setup)
        .add_systems(Update, (handle_window_resize, orbit_camera_controller).chain());

    app
}

fn spawn_camera(commands: &mut Commands, viewport: &ViewportState) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            aspect_ratio: viewport.aspect(),
        }),
        Transform::from_translation(INITIAL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        ViewerCamera,
    ));
}

// Startup system: camera, lights and the hidden overlay. The model slot
// starts empty until the first load lands.
fn setup(
    mut commands: Commands,
    mut viewport: ResMut<ViewportState>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = windows.single() {
        viewport.resize(window.width(), window.height());
    }

    spawn_camera(&mut commands, &viewport);
    spawn_lighting(&mut commands);
    spawn_status_overlay(&mut commands);
}

fn create_default_plugins(config: &ViewerConfig) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        file_path: config.asset_root.to_string_lossy().into_owned(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
