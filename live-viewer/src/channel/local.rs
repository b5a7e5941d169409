use crate::channel::queue::{ChannelSignal, NotificationQueue};
use crate::engine::core::config::ViewerConfig;
use crate::sync::source::local::is_export;
use bevy::prelude::*;
use constants::timing::WATCHER_DEBOUNCE_SECS;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Keeps the exports directory watch alive for the lifetime of the app.
#[derive(Resource)]
pub struct ExportWatcher(#[allow(dead_code)] Mutex<RecommendedWatcher>);

/// True for events that mean an export was written: created, rewritten or
/// renamed into place. Metadata-only changes and removals are ignored.
pub fn is_export_change(event: &Event) -> bool {
    let relevant = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };

    relevant
        && event.paths.iter().any(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(is_export)
        })
}

/// Drops signals that follow the previous one within the debounce window.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    last: Option<Instant>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            window: Duration::from_secs_f32(WATCHER_DEBOUNCE_SECS),
            last: None,
        }
    }
}

impl Debounce {
    pub fn allow(&mut self, now: Instant) -> bool {
        if self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) < self.window)
        {
            return false;
        }
        self.last = Some(now);
        true
    }
}

/// Watch `dir` and push one `ModelUpdated` signal per debounced export change.
pub fn watch_exports(dir: &Path, queue: NotificationQueue) -> notify::Result<RecommendedWatcher> {
    fs::create_dir_all(dir)?;

    let mut debounce = Debounce::default();
    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) if is_export_change(&event) => {
                if debounce.allow(Instant::now()) {
                    queue.push(ChannelSignal::ModelUpdated);
                }
            }
            Ok(_) => {}
            Err(err) => warn!("Export watcher error: {}", err),
        }
    })?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub fn start_export_watcher(
    mut commands: Commands,
    config: Res<ViewerConfig>,
    queue: Res<NotificationQueue>,
) {
    let dir = config.exports_dir();
    match watch_exports(&dir, queue.clone()) {
        Ok(watcher) => {
            info!("Watching {} for exports", dir.display());
            commands.insert_resource(ExportWatcher(Mutex::new(watcher)));
            queue.push(ChannelSignal::Connected);
        }
        Err(err) => error!("Could not watch {}: {}", dir.display(), err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::source::local::tests::{scratch_dir, write_export};
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode};
    use std::path::PathBuf;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from("/exports").join(path))
    }

    #[test]
    fn created_rewritten_and_renamed_exports_count() {
        assert!(is_export_change(&event(
            EventKind::Create(CreateKind::File),
            "bridge.glb"
        )));
        assert!(is_export_change(&event(
            EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            "bridge.glb"
        )));
        assert!(is_export_change(&event(
            EventKind::Modify(ModifyKind::Name(RenameMode::To)),
            "bridge.glb"
        )));
    }

    #[test]
    fn other_files_and_removals_are_ignored() {
        assert!(!is_export_change(&event(
            EventKind::Create(CreateKind::File),
            "bridge.blend"
        )));
        assert!(!is_export_change(&event(
            EventKind::Remove(RemoveKind::File),
            "bridge.glb"
        )));
        assert!(!is_export_change(&event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)),
            "bridge.glb"
        )));
    }

    #[test]
    fn signals_within_half_a_second_are_dropped() {
        let mut debounce = Debounce::default();
        let start = Instant::now();
        assert!(debounce.allow(start));
        assert!(!debounce.allow(start + Duration::from_millis(300)));
        assert!(debounce.allow(start + Duration::from_millis(600)));
    }

    #[test]
    fn writing_an_export_queues_an_update() {
        let dir = scratch_dir("watch");
        let queue = NotificationQueue::default();
        let _watcher = watch_exports(&dir, queue.clone()).expect("watch scratch dir");

        write_export(&dir, "bridge.glb", 16, 0);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut signals = Vec::new();
        while signals.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
            signals.extend(queue.take());
        }

        // The write and the mtime touch land inside one debounce window.
        assert_eq!(signals, vec![ChannelSignal::ModelUpdated]);
        let _ = fs::remove_dir_all(&dir);
    }
}
