use log::{debug, info};

use super::anchor::{Anchor, AnchorId, PlaneAlignment};
use super::config::WorldTrackingConfig;
use super::traits::ArSession;
use crate::config::SessionCapabilities;
use crate::placement::PlacementStore;
use crate::registry::{EntryId, ModelRegistry};

/// Why a confirmed placement did not produce an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The entry's renderable has not loaded (or failed to load)
    AssetNotReady,
    /// The id does not belong to the registry
    UnknownEntry,
}

/// Result of one [`SceneHost::observe`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Nothing was waiting to be placed
    Idle,
    Placed { entry: EntryId, anchor: AnchorId },
    Dropped { entry: EntryId, reason: DropReason },
}

/// Owns the tracking session and turns confirmations into anchors
pub struct SceneHost<S: ArSession> {
    session: S,
    config: WorldTrackingConfig,
    last_revision: Option<u64>,
    placed: usize,
}

impl<S: ArSession> SceneHost<S> {
    /// Configures and starts the session once
    pub fn new(mut session: S, capabilities: &SessionCapabilities) -> Self {
        let config =
            WorldTrackingConfig::resolve(capabilities, session.supports_scene_reconstruction());
        info!(
            "Starting session: planes {:?}, texturing {:?}, reconstruction {:?}",
            config.plane_detection, config.environment_texturing, config.scene_reconstruction
        );
        session.run(&config);

        Self {
            session,
            config,
            last_revision: None,
            placed: 0,
        }
    }

    /// Reacts to the latest placement state
    ///
    /// Call once per tick. The confirmation is taken out of the store before
    /// anything else happens, so it is never delivered twice; a confirmation
    /// whose renderable is not loaded yet is dropped.
    pub fn observe(
        &mut self,
        store: &mut PlacementStore,
        registry: &ModelRegistry,
    ) -> PlacementOutcome {
        if self.last_revision == Some(store.revision()) {
            return PlacementOutcome::Idle;
        }

        let outcome = match store.take_confirmed() {
            Some(entry) => self.place(entry, registry),
            None => PlacementOutcome::Idle,
        };

        self.last_revision = Some(store.revision());
        outcome
    }

    fn place(&mut self, entry: EntryId, registry: &ModelRegistry) -> PlacementOutcome {
        let Some(asset) = registry.get(entry) else {
            info!("Dropping placement of unknown entry {}", entry);
            return PlacementOutcome::Dropped {
                entry,
                reason: DropReason::UnknownEntry,
            };
        };

        let Some(renderable) = asset.renderable() else {
            info!("Unable to place '{}': model not loaded", asset.name());
            return PlacementOutcome::Dropped {
                entry,
                reason: DropReason::AssetNotReady,
            };
        };

        debug!("Adding '{}' to scene", asset.name());
        let anchor = Anchor::on_plane(PlaneAlignment::Any).with_child(renderable.clone());
        let anchor_id = self.session.add_anchor(anchor);
        self.placed += 1;
        info!("Placed '{}' as {}", asset.name(), anchor_id);

        PlacementOutcome::Placed {
            entry,
            anchor: anchor_id,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn config(&self) -> &WorldTrackingConfig {
        &self.config
    }

    /// Anchors created since the host started
    pub fn placed_count(&self) -> usize {
        self.placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::PlacementAction;
    use crate::registry::{AssetLoader, LoadError, MeshData, Renderable, ScanOptions};
    use futures::executor::LocalPool;
    use futures::future::{self, BoxFuture, FutureExt};
    use std::path::Path;
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingSession {
        runs: Vec<WorldTrackingConfig>,
        anchors: Vec<Anchor>,
        mesh_support: bool,
    }

    impl ArSession for RecordingSession {
        fn supports_scene_reconstruction(&self) -> bool {
            self.mesh_support
        }

        fn run(&mut self, config: &WorldTrackingConfig) {
            self.runs.push(*config);
        }

        fn add_anchor(&mut self, anchor: Anchor) -> AnchorId {
            self.anchors.push(anchor);
            AnchorId(self.anchors.len() as u64)
        }
    }

    /// "slow" never finishes, everything else loads at once
    struct SlowLoader;

    impl AssetLoader for SlowLoader {
        fn load(&self, path: &Path) -> BoxFuture<'static, Result<Renderable, LoadError>> {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();
            if name == "slow" {
                return future::pending().boxed();
            }
            let mesh = MeshData::new(
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                Vec::new(),
                vec![0, 1, 2],
            );
            future::ready(Ok(Renderable::new(name, vec![mesh]))).boxed()
        }
    }

    fn registry(dir: &Path) -> (ModelRegistry, LocalPool) {
        for name in ["car", "slow"] {
            std::fs::write(dir.join(format!("{}.obj", name)), b"").unwrap();
            image::RgbaImage::new(2, 2)
                .save(dir.join(format!("{}.png", name)))
                .unwrap();
        }
        let mut pool = LocalPool::new();
        let mut registry =
            ModelRegistry::build(&ScanOptions::new(dir), Arc::new(SlowLoader), &pool.spawner())
                .unwrap();
        pool.run_until_stalled();
        registry.poll_completions();
        (registry, pool)
    }

    fn host() -> SceneHost<RecordingSession> {
        SceneHost::new(RecordingSession::default(), &SessionCapabilities::default())
    }

    #[test]
    fn test_session_runs_once_on_creation() {
        let host = host();
        assert_eq!(host.session().runs.len(), 1);
        assert_eq!(
            host.config().scene_reconstruction,
            super::super::config::SceneReconstruction::None
        );
    }

    #[test]
    fn test_confirmed_entry_becomes_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, _pool) = registry(dir.path());
        let car = registry.find("car").unwrap().id();

        let mut store = PlacementStore::new();
        let mut host = host();
        store.dispatch(PlacementAction::Pick(car)).unwrap();
        store.dispatch(PlacementAction::Confirm).unwrap();

        let outcome = host.observe(&mut store, &registry);
        assert!(matches!(outcome, PlacementOutcome::Placed { entry, .. } if entry == car));
        assert_eq!(host.placed_count(), 1);

        let anchor = &host.session().anchors[0];
        assert_eq!(anchor.children().len(), 1);
        assert_eq!(anchor.children()[0].name, "car");
        assert_eq!(store.state().confirmed(), None);
        assert!(!store.state().placement_mode_active());

        // Nothing new to deliver
        assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
        assert_eq!(host.session().anchors.len(), 1);
    }

    #[test]
    fn test_unloaded_entry_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, _pool) = registry(dir.path());
        let slow = registry.find("slow").unwrap().id();

        let mut store = PlacementStore::new();
        let mut host = host();
        store.dispatch(PlacementAction::Pick(slow)).unwrap();
        store.dispatch(PlacementAction::Confirm).unwrap();

        assert_eq!(
            host.observe(&mut store, &registry),
            PlacementOutcome::Dropped {
                entry: slow,
                reason: DropReason::AssetNotReady
            }
        );
        assert!(host.session().anchors.is_empty());
        assert_eq!(store.state().confirmed(), None);
    }

    #[test]
    fn test_unknown_entry_is_dropped() {
        let mut store = PlacementStore::new();
        let mut host = host();
        let stray = crate::registry::EntryId(7);
        store.dispatch(PlacementAction::Pick(stray)).unwrap();
        store.dispatch(PlacementAction::Confirm).unwrap();

        assert_eq!(
            host.observe(&mut store, &ModelRegistry::empty()),
            PlacementOutcome::Dropped {
                entry: stray,
                reason: DropReason::UnknownEntry
            }
        );
        assert_eq!(host.placed_count(), 0);
    }

    #[test]
    fn test_selection_changes_alone_place_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (registry, _pool) = registry(dir.path());
        let car = registry.find("car").unwrap().id();

        let mut store = PlacementStore::new();
        let mut host = host();
        store.dispatch(PlacementAction::Pick(car)).unwrap();
        assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
        store.dispatch(PlacementAction::Cancel).unwrap();
        assert_eq!(host.observe(&mut store, &registry), PlacementOutcome::Idle);
        assert!(host.session().anchors.is_empty());
    }
}
