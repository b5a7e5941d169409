//! Asset synchronisation: keeps the displayed model in step with the newest
//! export.
//!
//! A load runs in two stages. The metadata stage looks up the latest export
//! and its size off the main thread. The decode stage hands the file to the
//! asset server and attaches the result as the single displayed model.
//!
//! ```text
//! ModelUpdated ──1s──> ReloadRequested ──> metadata task ──> MetadataResolved
//!                                                                 │
//!        DisplayedModel <── DecodeFinished <── asset server <── DecodeRequested
//! ```
//!
//! Loads are never cancelled; overlapping runs race and the decode that
//! finishes last is what stays on screen.

pub mod error;
pub mod loader;
pub mod metadata;
pub mod schedule;
pub mod source;
pub mod state;

use crate::engine::core::config::ViewerConfig;
use crate::engine::scene::model::{frame_displayed_model, mark_scene_ready};
use bevy::prelude::*;
use loader::{
    AssetSync, DecodeFinished, DecodeRequested, MetadataResolved, ReloadRequested,
    apply_decode_outcomes, apply_metadata, begin_loads, poll_decodes, poll_metadata_tasks,
    start_decodes,
};
use schedule::{ModelUpdated, ReloadSchedule, fire_scheduled_reloads, schedule_debounced_reloads};

pub struct AssetSyncPlugin;

impl Plugin for AssetSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewerConfig>()
            .init_resource::<AssetSync>()
            .init_resource::<ReloadSchedule>()
            .add_event::<ModelUpdated>()
            .add_event::<ReloadRequested>()
            .add_event::<MetadataResolved>()
            .add_event::<DecodeRequested>()
            .add_event::<DecodeFinished>()
            .add_observer(mark_scene_ready)
            .add_systems(Startup, request_initial_load)
            .add_systems(
                Update,
                (
                    schedule_debounced_reloads,
                    fire_scheduled_reloads,
                    begin_loads,
                    poll_metadata_tasks,
                    apply_metadata,
                    start_decodes,
                    poll_decodes,
                    apply_decode_outcomes,
                    frame_displayed_model,
                )
                    .chain(),
            );
    }
}

/// Show whatever export already exists when the viewer opens.
fn request_initial_load(mut reloads: EventWriter<ReloadRequested>) {
    reloads.write(ReloadRequested);
}
