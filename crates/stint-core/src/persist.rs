use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::task::Task;

/// Raw storage medium for the task collection. May fail; the fail-soft
/// policy lives in [`Persistence`], not here.
pub trait Backend {
    fn load(&self) -> anyhow::Result<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> anyhow::Result<()>;
}

/// Fail-soft adapter between `TaskStore` and a [`Backend`].
///
/// Contract: `load` degrades to an empty collection on missing or corrupt
/// data, `save` swallows storage faults. Neither ever raises to the caller;
/// the in-memory collection stays authoritative and a failed save is simply
/// dropped.
pub struct Persistence {
    backend: Box<dyn Backend>,
}

impl Persistence {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self) -> Vec<Task> {
        match self.backend.load() {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                tasks
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "load failed; starting with empty collection");
                Vec::new()
            }
        }
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save(&self, tasks: &[Task]) {
        if let Err(err) = self.backend.save(tasks) {
            warn!(error = %format!("{err:#}"), "save failed; keeping in-memory state");
        }
    }
}

/// Production backend: one JSON file holding the serialized task array.
/// No schema version field; unreadable content is reported as an error and
/// the [`Persistence`] layer treats it as an empty collection.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for JsonFileBackend {
    #[tracing::instrument(skip(self))]
    fn load(&self) -> anyhow::Result<Vec<Task>> {
        if !self.path.exists() {
            debug!(file = %self.path.display(), "no task file yet");
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, tasks))]
    fn save(&self, tasks: &[Task]) -> anyhow::Result<()> {
        debug!(file = %self.path.display(), count = tasks.len(), "saving tasks atomically");

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        let serialized = serde_json::to_string(tasks)?;
        temp.write_all(serialized.as_bytes())?;
        temp.flush()?;

        temp.persist(&self.path)
            .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;

        Ok(())
    }
}
