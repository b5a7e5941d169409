use crate::sync::metadata::LoadMetadata;
use bevy::prelude::*;

#[derive(Component)]
pub struct StatusOverlay;

pub fn spawn_status_overlay(commands: &mut Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        Visibility::Hidden,
        StatusOverlay,
    ));
}

/// Size in kilobytes with one decimal. An unknown size renders as `NaN`,
/// which is what a missing `content-length` has always shown.
pub fn format_size_kb(size_bytes: Option<u64>) -> String {
    match size_bytes {
        Some(bytes) => format!("{:.1}", bytes as f64 / 1024.0),
        None => "NaN".to_string(),
    }
}

pub fn format_overlay(metadata: &LoadMetadata) -> String {
    format!(
        "File: {}\nSize: {} KB\nLoad Time: {:.2}s",
        metadata.filename,
        format_size_kb(metadata.size_bytes),
        metadata.load_time.as_secs_f64()
    )
}

pub fn show_overlay(text: &mut Text, visibility: &mut Visibility, metadata: &LoadMetadata) {
    text.0 = format_overlay(metadata);
    *visibility = Visibility::Visible;
}
