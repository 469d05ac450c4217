use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use futures::task::{Spawn, SpawnExt};
use log::{debug, info, warn};
use thiserror::Error;

use super::entry::{AssetEntry, AssetIntegrityError, EntryId, LoadStatus, Thumbnail};
use super::loader::{AssetLoader, LoadError};
use crate::config::PlacerConfig;

/// Directory scan failures
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to scan asset directory {dir:?}: {source}")]
    Scan {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one background load, as delivered to the UI tick
#[derive(Debug)]
struct LoadCompletion {
    id: EntryId,
    result: Result<super::Renderable, LoadError>,
}

/// What [`ModelRegistry::poll_completions`] applied this tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Loaded(EntryId),
    Failed(EntryId, String),
}

/// Options the registry needs from [`PlacerConfig`]
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub dir: PathBuf,
    pub model_extension: String,
    pub thumbnail_extensions: Vec<String>,
    pub thumbnail_size: u32,
}

impl ScanOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let defaults = PlacerConfig::default();
        Self {
            dir: dir.into(),
            model_extension: defaults.model_extension,
            thumbnail_extensions: defaults.thumbnail_extensions,
            thumbnail_size: defaults.thumbnail_size,
        }
    }

    pub fn with_model_extension(mut self, extension: &str) -> Self {
        self.model_extension = extension.trim_start_matches('.').to_string();
        self
    }
}

impl From<&PlacerConfig> for ScanOptions {
    fn from(config: &PlacerConfig) -> Self {
        Self {
            dir: config.assets_dir.clone(),
            model_extension: config.model_extension.clone(),
            thumbnail_extensions: config.thumbnail_extensions.clone(),
            thumbnail_size: config.thumbnail_size,
        }
    }
}

/// Catalogue of selectable models
///
/// Built once from a directory scan. Every entry gets exactly one load request
/// at build time; results arrive through [`poll_completions`], which must be
/// called from the same thread that reads the entries (the UI tick). Dropping
/// the registry drops the completion receiver, so loads still in flight finish
/// and are discarded.
///
/// [`poll_completions`]: ModelRegistry::poll_completions
pub struct ModelRegistry {
    entries: Vec<AssetEntry>,
    rejected: Vec<AssetIntegrityError>,
    completions: Receiver<LoadCompletion>,
    // Kept so the channel stays open even when no load was spawned.
    _sender: Sender<LoadCompletion>,
}

impl ModelRegistry {
    /// An empty registry, used when the asset directory cannot be scanned
    pub fn empty() -> Self {
        let (sender, completions) = mpsc::channel();
        Self {
            entries: Vec::new(),
            rejected: Vec::new(),
            completions,
            _sender: sender,
        }
    }

    /// Scans `options.dir` and issues one load per discovered model
    ///
    /// Entries whose thumbnail is missing or unreadable are skipped and kept in
    /// [`rejected`](Self::rejected). Loads are spawned on `spawner` and never
    /// block this call.
    pub fn build<S>(
        options: &ScanOptions,
        loader: Arc<dyn AssetLoader>,
        spawner: &S,
    ) -> Result<Self, RegistryError>
    where
        S: Spawn + ?Sized,
    {
        let model_files = scan_models(&options.dir, &options.model_extension)?;
        let (sender, completions) = mpsc::channel();

        let mut entries = Vec::with_capacity(model_files.len());
        let mut rejected = Vec::new();

        for (name, model_path) in model_files {
            let thumbnail = match Thumbnail::lookup(
                &options.dir,
                &name,
                &options.thumbnail_extensions,
                options.thumbnail_size,
            ) {
                Ok(thumbnail) => thumbnail,
                Err(err) => {
                    warn!("Skipping asset '{}': {}", name, err);
                    rejected.push(err);
                    continue;
                }
            };

            let id = EntryId(entries.len());
            request_load(id, &model_path, loader.as_ref(), spawner, sender.clone());
            entries.push(AssetEntry::new(id, name, model_path, thumbnail));
        }

        info!(
            "Registry built from {:?}: {} models, {} rejected",
            options.dir,
            entries.len(),
            rejected.len()
        );

        Ok(Self {
            entries,
            rejected,
            completions,
            _sender: sender,
        })
    }

    /// Applies every load completion delivered since the last call
    pub fn poll_completions(&mut self) -> Vec<LoadEvent> {
        let mut events = Vec::new();

        loop {
            let completion = match self.completions.try_recv() {
                Ok(completion) => completion,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            };

            let Some(entry) = self.entries.get_mut(completion.id.index()) else {
                warn!("Load completion for unknown entry {}", completion.id);
                continue;
            };

            let result = completion.result.map_err(|err| err.to_string());
            let failure = result.as_ref().err().cloned();

            if !entry.complete(result) {
                warn!(
                    "Ignoring duplicate load completion for '{}'",
                    entry.name()
                );
                continue;
            }

            match failure {
                None => {
                    info!("Loaded renderable for '{}'", entry.name());
                    events.push(LoadEvent::Loaded(entry.id()));
                }
                Some(reason) => {
                    warn!("Unable to load renderable for '{}': {}", entry.name(), reason);
                    events.push(LoadEvent::Failed(entry.id(), reason));
                }
            }
        }

        events
    }

    pub fn get(&self, id: EntryId) -> Option<&AssetEntry> {
        self.entries.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<&AssetEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assets dropped during the scan
    pub fn rejected(&self) -> &[AssetIntegrityError] {
        &self.rejected
    }

    /// Entries whose load has not completed yet
    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| *entry.status() == LoadStatus::Pending)
            .count()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

/// Lists `(name, path)` for every file whose extension matches, sorted by name
fn scan_models(dir: &Path, extension: &str) -> Result<Vec<(String, PathBuf)>, RegistryError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| RegistryError::Scan {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut models: Vec<(String, PathBuf)> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        })
        .filter_map(|path| {
            let name = path.file_stem()?.to_str()?.to_string();
            Some((name, path))
        })
        .collect();

    models.sort();
    Ok(models)
}

fn request_load<S>(
    id: EntryId,
    path: &Path,
    loader: &dyn AssetLoader,
    spawner: &S,
    sender: Sender<LoadCompletion>,
) where
    S: Spawn + ?Sized,
{
    let load = loader.load(path);
    let failure_sender = sender.clone();
    let task = async move {
        let result = load.await;
        // The registry may already be gone; nobody is waiting for the result then.
        let _ = sender.send(LoadCompletion { id, result });
    };

    match spawner.spawn(task) {
        Ok(()) => debug!("Requested load of {:?} as {}", path, id),
        Err(err) => {
            warn!("Could not spawn load for {:?}: {}", path, err);
            // Settle the entry through the normal completion path.
            let _ = failure_sender.send(LoadCompletion {
                id,
                result: Err(LoadError::Abandoned {
                    path: path.to_path_buf(),
                }),
            });
        }
    }
}
