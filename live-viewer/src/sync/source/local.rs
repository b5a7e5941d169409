use crate::engine::core::config::ViewerConfig;
use crate::sync::error::SyncResult;
use crate::sync::metadata::LatestExport;
use constants::endpoints::EXPORT_EXTENSION;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Pick the newest export in the configured directory and read its size.
pub async fn fetch_latest_export(config: ViewerConfig) -> SyncResult<Option<LatestExport>> {
    let dir = config.exports_dir();

    let Some(filename) = newest_export(&dir)? else {
        return Ok(None);
    };
    let size_bytes = fs::metadata(dir.join(&filename))?.len();

    Ok(Some(LatestExport {
        filename,
        size_bytes: Some(size_bytes),
    }))
}

pub fn is_export(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(stem, extension)| !stem.is_empty() && extension == EXPORT_EXTENSION)
}

/// Newest export by modification time. A missing directory holds no exports.
pub fn newest_export(dir: &Path) -> io::Result<Option<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };

    let mut newest: Option<(SystemTime, String)> = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_export(&name) {
            continue;
        }

        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified()?;
        if newest.as_ref().is_none_or(|(latest, _)| modified > *latest) {
            newest = Some((modified, name));
        }
    }

    Ok(newest.map(|(_, name)| name))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bevy::tasks::block_on;
    use std::fs::File;
    use std::path::PathBuf;
    use std::time::Duration;

    pub(crate) fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "live-viewer-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    pub(crate) fn write_export(dir: &Path, name: &str, bytes: usize, age_secs: u64) {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; bytes]).expect("write export");
        let modified = SystemTime::now() - Duration::from_secs(age_secs);
        File::options()
            .write(true)
            .open(&path)
            .and_then(|file| file.set_modified(modified))
            .expect("set mtime");
    }

    #[test]
    fn only_glb_files_count() {
        assert!(is_export("scene.glb"));
        assert!(!is_export("scene.gltf"));
        assert!(!is_export("scene.glb.tmp"));
        assert!(!is_export(".glb"));
        assert!(!is_export("notes.txt"));
    }

    #[test]
    fn newest_by_modification_time() {
        let dir = scratch_dir("newest");
        write_export(&dir, "old.glb", 10, 300);
        write_export(&dir, "new.glb", 10, 5);
        write_export(&dir, "newer_but_ignored.txt", 10, 0);

        assert_eq!(newest_export(&dir).unwrap().as_deref(), Some("new.glb"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_or_empty_directory_has_nothing() {
        let dir = scratch_dir("empty");
        assert_eq!(newest_export(&dir).unwrap(), None);
        assert_eq!(newest_export(&dir.join("absent")).unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn latest_export_carries_size() {
        let root = scratch_dir("size");
        let exports = root.join("blender_exports");
        fs::create_dir_all(&exports).unwrap();
        write_export(&exports, "tower.glb", 3072, 1);

        let config = ViewerConfig {
            asset_root: root.clone(),
            server_origin: String::new(),
        };
        let export = block_on(fetch_latest_export(config)).unwrap().expect("an export");

        assert_eq!(export.filename, "tower.glb");
        assert_eq!(export.size_bytes, Some(3072));
        let _ = fs::remove_dir_all(&root);
    }
}
