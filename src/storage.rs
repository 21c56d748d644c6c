// Reads and writes the events file.
//
// The file is a bare JSON array of events, rewritten in full on every save.
// Loading never salvages part of a file: either every record parses or the
// whole load fails and the caller decides what to do.
use crate::config::Config;
use crate::context::AppContext;
use crate::error::StorageError;
use crate::model::Event;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EventStorage {
    path: PathBuf,
}

impl EventStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at the configured path, or the default one for `ctx`.
    pub fn from_config(ctx: &dyn AppContext, config: &Config) -> Result<Self, StorageError> {
        config
            .resolve_events_path(ctx)
            .map(Self::new)
            .ok_or(StorageError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sidecar lock file path, e.g. `saved_events.json.lock`.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T, StorageError>
    where
        F: FnOnce() -> Result<T, StorageError>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| StorageError::io(&lock_path, e))?;

        file.lock_exclusive()
            .map_err(|e| StorageError::io(&lock_path, e))?;
        let result = f();
        let _ = FileExt::unlock(&file);
        result
    }

    /// Write to a temporary sibling, then rename over the target.
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
        path: P,
        contents: C,
    ) -> Result<(), StorageError> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents).map_err(|e| StorageError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StorageError::io(path, e));
        }
        Ok(())
    }

    /// Load every event, or fail as a whole.
    ///
    /// A missing file is not an error: it yields an empty list.
    pub fn load(&self) -> Result<Vec<Event>, StorageError> {
        if !self.path.exists() {
            log::info!(
                "No events file at {}, starting empty",
                self.path.display()
            );
            return Ok(vec![]);
        }

        Self::with_lock(&self.path, || {
            let json =
                fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
            let events: Vec<Event> = serde_json::from_str(&json)
                .map_err(|e| StorageError::corrupt(&self.path, e))?;

            if let Some(pos) = events.iter().position(|e| e.title.trim().is_empty()) {
                return Err(StorageError::corrupt(
                    &self.path,
                    format!("record {} has no title", pos),
                ));
            }

            log::info!("Loaded {} events from {}", events.len(), self.path.display());
            Ok(events)
        })
    }

    /// Replace the file with `events`.
    pub fn save(&self, events: &[Event]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        Self::with_lock(&self.path, || {
            let json = serde_json::to_string_pretty(events)
                .map_err(|e| StorageError::corrupt(&self.path, e))?;
            Self::atomic_write(&self.path, json)
        })?;
        log::debug!("Saved {} events to {}", events.len(), self.path.display());
        Ok(())
    }

    /// Copy an unreadable file aside so a later save cannot overwrite it.
    ///
    /// The first copy is `<file>.corrupt`; later ones get `.corrupt.1`,
    /// `.corrupt.2` and so on, so earlier copies are never replaced.
    pub fn quarantine(&self) -> Result<PathBuf, StorageError> {
        let target = (0..)
            .map(|n| self.quarantine_path(n))
            .find(|p| !p.exists())
            .ok_or_else(|| StorageError::corrupt(&self.path, "no free backup name"))?;
        fs::copy(&self.path, &target).map_err(|e| StorageError::io(&target, e))?;
        Ok(target)
    }

    fn quarantine_path(&self, n: u32) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        if n > 0 {
            name.push(format!(".{}", n));
        }
        PathBuf::from(name)
    }
}
