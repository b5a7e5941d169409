use crate::engine::core::config::ViewerConfig;
use crate::engine::scene::model::{DisplayedModel, NeedsFraming};
use crate::engine::scene::overlay::StatusOverlay;
use crate::sync::error::SyncResult;
use crate::sync::metadata::{LatestExport, LoadMetadata, LoadProgress};
use crate::sync::source::fetch_latest_export;
use crate::sync::state::{LoadTicket, SyncEvent, SyncState};
use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task, block_on, futures_lite::future};
use std::time::Duration;

/// Start one `loadLatest` run.
#[derive(Event, Debug, Default, Clone, Copy)]
pub struct ReloadRequested;

/// The metadata stage of a run has finished.
#[derive(Event, Debug)]
pub struct MetadataResolved {
    pub ticket: LoadTicket,
    pub outcome: SyncResult<Option<LatestExport>>,
}

/// Hand an export to the decoder.
#[derive(Event, Debug, Clone)]
pub struct DecodeRequested {
    pub ticket: LoadTicket,
    pub export: LatestExport,
}

/// The decoder has finished with an export, one way or the other.
#[derive(Event, Debug)]
pub struct DecodeFinished {
    pub ticket: LoadTicket,
    pub metadata: LoadMetadata,
    pub result: Result<Handle<Scene>, String>,
}

struct MetadataFetch {
    ticket: LoadTicket,
    task: Task<SyncResult<Option<LatestExport>>>,
}

/// A resident asset path is reloaded in place, so its load state already
/// reads `Loaded`; completion is signalled by a `Modified` event instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeWait {
    FreshLoad,
    Reload,
}

struct PendingDecode {
    ticket: LoadTicket,
    handle: Handle<Gltf>,
    metadata: LoadMetadata,
    wait: DecodeWait,
    started: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodePoll {
    Pending,
    Succeeded,
    Failed(String),
}

/// Map the asset server's view of a decode onto its outcome.
pub fn poll_decode(wait: DecodeWait, state: Option<&LoadState>, modified: bool) -> DecodePoll {
    match state {
        Some(LoadState::Failed(err)) => DecodePoll::Failed(err.to_string()),
        Some(LoadState::Loaded) if wait == DecodeWait::FreshLoad || modified => {
            DecodePoll::Succeeded
        }
        _ => DecodePoll::Pending,
    }
}

/// Asset synchronisation state plus every run still in flight.
///
/// Runs are never cancelled. When several overlap, whichever decode finishes
/// last is the one left on screen.
#[derive(Resource, Default)]
pub struct AssetSync {
    state: SyncState,
    next_ticket: u64,
    fetches: Vec<MetadataFetch>,
    decodes: Vec<PendingDecode>,
    displayed: Option<LoadTicket>,
    last_metadata: Option<LoadMetadata>,
}

impl AssetSync {
    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn displayed_ticket(&self) -> Option<LoadTicket> {
        self.displayed
    }

    pub fn last_metadata(&self) -> Option<&LoadMetadata> {
        self.last_metadata.as_ref()
    }

    pub fn in_flight(&self) -> usize {
        self.fetches.len() + self.decodes.len()
    }

    fn issue_ticket(&mut self) -> LoadTicket {
        self.next_ticket += 1;
        LoadTicket(self.next_ticket)
    }

    /// Apply a transition. While other runs are still in flight the state
    /// stays `Loading`; the last one to finish decides the outcome.
    fn record(&mut self, event: SyncEvent) {
        let next = self.state.transition(event);
        self.state = if self.in_flight() > 0 {
            SyncState::Loading
        } else {
            next
        };
    }
}

/// Kick off the metadata stage for every reload request.
pub fn begin_loads(
    mut requests: EventReader<ReloadRequested>,
    mut sync: ResMut<AssetSync>,
    config: Res<ViewerConfig>,
) {
    for _ in requests.read() {
        let ticket = sync.issue_ticket();
        let config = config.clone();
        let task = IoTaskPool::get().spawn(async move { fetch_latest_export(config).await });

        sync.fetches.push(MetadataFetch { ticket, task });
        sync.record(SyncEvent::LoadStarted);
        debug!("Load {:?} started", ticket);
    }
}

pub fn poll_metadata_tasks(
    mut sync: ResMut<AssetSync>,
    mut resolved: EventWriter<MetadataResolved>,
) {
    sync.fetches
        .retain_mut(|fetch| match block_on(future::poll_once(&mut fetch.task)) {
            Some(outcome) => {
                resolved.write(MetadataResolved {
                    ticket: fetch.ticket,
                    outcome,
                });
                false
            }
            None => true,
        });
}

/// React to a finished metadata stage: give up quietly, or detach the
/// current model and request a decode of the new export.
pub fn apply_metadata(
    mut commands: Commands,
    mut events: EventReader<MetadataResolved>,
    mut sync: ResMut<AssetSync>,
    mut decode_requests: EventWriter<DecodeRequested>,
    models: Query<Entity, With<DisplayedModel>>,
) {
    for event in events.read() {
        match &event.outcome {
            Err(err) => {
                error!("Failed to fetch latest model: {}", err);
                sync.record(SyncEvent::FetchFailed);
            }
            Ok(None) => {
                info!("No GLB files found");
                let model_displayed = sync.displayed.is_some();
                sync.record(SyncEvent::NothingToLoad { model_displayed });
            }
            Ok(Some(export)) => {
                for entity in &models {
                    commands.entity(entity).try_despawn();
                }
                sync.displayed = None;

                decode_requests.write(DecodeRequested {
                    ticket: event.ticket,
                    export: export.clone(),
                });
            }
        }
    }
}

/// Start the decoder on each requested export.
pub fn start_decodes(
    mut requests: EventReader<DecodeRequested>,
    mut sync: ResMut<AssetSync>,
    asset_server: Res<AssetServer>,
    time: Res<Time<Real>>,
) {
    for request in requests.read() {
        let file_path = ViewerConfig::asset_path(&request.export.filename);

        let resident = asset_server.get_handle::<Gltf>(file_path.clone()).is_some();
        let handle: Handle<Gltf> = asset_server.load(file_path.clone());
        let wait = if resident {
            asset_server.reload(file_path);
            DecodeWait::Reload
        } else {
            DecodeWait::FreshLoad
        };

        let progress = LoadProgress {
            loaded: 0,
            total: request.export.size_bytes,
        };
        info!("Loading progress: {:.1}%", progress.percent());

        sync.decodes.push(PendingDecode {
            ticket: request.ticket,
            handle,
            metadata: LoadMetadata::from(&request.export),
            wait,
            started: time.elapsed(),
        });
    }
}

/// Scene shown for a decoded export: its default scene, else the first one.
fn displayed_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
}

pub fn poll_decodes(
    mut sync: ResMut<AssetSync>,
    mut gltf_events: EventReader<AssetEvent<Gltf>>,
    mut finished: EventWriter<DecodeFinished>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    time: Res<Time<Real>>,
) {
    let modified: Vec<AssetId<Gltf>> = gltf_events
        .read()
        .filter_map(|event| match event {
            AssetEvent::Modified { id } => Some(*id),
            _ => None,
        })
        .collect();

    let now = time.elapsed();
    sync.decodes.retain_mut(|decode| {
        let state = asset_server.get_load_state(decode.handle.id());
        let was_modified = modified.contains(&decode.handle.id());

        let result = match poll_decode(decode.wait, state.as_ref(), was_modified) {
            DecodePoll::Pending => return true,
            DecodePoll::Succeeded => {
                let progress = LoadProgress {
                    loaded: decode.metadata.size_bytes.unwrap_or_default(),
                    total: decode.metadata.size_bytes,
                };
                info!("Loading progress: {:.1}%", progress.percent());

                gltfs
                    .get(&decode.handle)
                    .and_then(displayed_scene)
                    .ok_or_else(|| "export contains no scenes".to_string())
            }
            DecodePoll::Failed(err) => Err(err),
        };

        let mut metadata = decode.metadata.clone();
        metadata.load_time = now.saturating_sub(decode.started);
        finished.write(DecodeFinished {
            ticket: decode.ticket,
            metadata,
            result,
        });
        false
    });
}

/// Attach decoded models, replacing whatever is displayed, or log the
/// failure. The model attached last wins.
pub fn apply_decode_outcomes(
    mut commands: Commands,
    mut events: EventReader<DecodeFinished>,
    mut sync: ResMut<AssetSync>,
    models: Query<Entity, With<DisplayedModel>>,
    mut overlay: Query<&mut Visibility, With<StatusOverlay>>,
) {
    let mut attached: Option<Entity> = None;

    for event in events.read() {
        match &event.result {
            Ok(handle) => {
                for entity in models.iter().chain(attached) {
                    commands.entity(entity).try_despawn();
                }

                let entity = commands
                    .spawn((
                        Name::new(format!("model:{}", event.metadata.filename)),
                        SceneRoot(handle.clone()),
                        DisplayedModel {
                            ticket: event.ticket,
                            metadata: event.metadata.clone(),
                        },
                        NeedsFraming,
                    ))
                    .id();
                attached = Some(entity);

                sync.displayed = Some(event.ticket);
                sync.last_metadata = Some(event.metadata.clone());
                sync.record(SyncEvent::DecodeSucceeded);

                info!(
                    "Loaded: {} ({:.2}s)",
                    event.metadata.filename,
                    event.metadata.load_time.as_secs_f64()
                );
            }
            Err(err) => {
                error!(
                    "Failed to load model: {} ({})",
                    event.metadata.filename, err
                );
                sync.record(SyncEvent::DecodeFailed);

                // The previous model was detached before decoding; do not
                // leave the overlay describing it.
                if sync.displayed.is_none() {
                    for mut visibility in &mut overlay {
                        *visibility = Visibility::Hidden;
                    }
                }
            }
        }
    }
}
