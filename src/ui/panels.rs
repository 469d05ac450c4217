//! What the bottom of the screen shows, independent of imgui
//!
//! The picker and the confirm panel never show together: which one is up is
//! decided by [`PlacementState::placement_mode_active`].

use crate::placement::PlacementState;
use crate::registry::{EntryId, LoadStatus, ModelRegistry};

/// Side length of a picker thumbnail, in pixels
pub const THUMBNAIL_SIZE: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Ready,
    Loading,
    Unavailable,
}

impl ItemStatus {
    pub fn from_load_status(status: &LoadStatus) -> Self {
        match status {
            LoadStatus::Ready => ItemStatus::Ready,
            LoadStatus::Pending => ItemStatus::Loading,
            LoadStatus::Failed(_) => ItemStatus::Unavailable,
        }
    }

    /// Caption under the thumbnail, if any
    pub fn label(self) -> Option<&'static str> {
        match self {
            ItemStatus::Ready => None,
            ItemStatus::Loading => Some("loading…"),
            ItemStatus::Unavailable => Some("unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub id: EntryId,
    pub name: String,
    pub status: ItemStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Picker(Vec<PickerItem>),
    Confirm {
        entry: EntryId,
        name: String,
        /// Confirm is only offered once the model can actually be placed
        can_confirm: bool,
        status: ItemStatus,
    },
}

impl Panel {
    pub fn build(state: &PlacementState, registry: &ModelRegistry) -> Self {
        match state.selected() {
            Some(entry) => {
                let (name, status) = registry
                    .get(entry)
                    .map(|asset| {
                        (
                            asset.name().to_string(),
                            ItemStatus::from_load_status(asset.status()),
                        )
                    })
                    .unwrap_or_else(|| (entry.to_string(), ItemStatus::Unavailable));

                Panel::Confirm {
                    entry,
                    name,
                    can_confirm: status == ItemStatus::Ready,
                    status,
                }
            }
            None => Panel::Picker(
                registry
                    .entries()
                    .iter()
                    .map(|asset| PickerItem {
                        id: asset.id(),
                        name: asset.name().to_string(),
                        status: ItemStatus::from_load_status(asset.status()),
                    })
                    .collect(),
            ),
        }
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

    /// Loads "ready", fails "broken", never finishes anything else
    struct MixedLoader;

    impl AssetLoader for MixedLoader {
        fn load(&self, path: &Path) -> BoxFuture<'static, Result<Renderable, LoadError>> {
            let name = path.file_stem().unwrap().to_string_lossy().into_owned();
            match name.as_str() {
                "ready" => {
                    let mesh = MeshData::new(
                        vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                        Vec::new(),
                        vec![0, 1, 2],
                    );
                    future::ready(Ok(Renderable::new(name, vec![mesh]))).boxed()
                }
                "broken" => future::ready(Err(LoadError::Empty {
                    path: path.to_path_buf(),
                }))
                .boxed(),
                _ => future::pending().boxed(),
            }
        }
    }

    fn registry(dir: &Path) -> ModelRegistry {
        for name in ["ready", "broken", "slow"] {
            std::fs::write(dir.join(format!("{}.obj", name)), b"").unwrap();
            image::RgbaImage::new(2, 2)
                .save(dir.join(format!("{}.png", name)))
                .unwrap();
        }
        let mut pool = LocalPool::new();
        let mut registry =
            ModelRegistry::build(&ScanOptions::new(dir), Arc::new(MixedLoader), &pool.spawner())
                .unwrap();
        pool.run_until_stalled();
        registry.poll_completions();
        registry
    }

    #[test]
    fn test_picker_lists_every_entry_with_status() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());

        let Panel::Picker(items) = Panel::build(&PlacementState::new(), &registry) else {
            panic!("expected picker");
        };
        assert_eq!(items.len(), 3);

        let status = |name: &str| items.iter().find(|i| i.name == name).unwrap().status;
        assert_eq!(status("ready"), ItemStatus::Ready);
        assert_eq!(status("broken"), ItemStatus::Unavailable);
        assert_eq!(status("slow"), ItemStatus::Loading);
        assert_eq!(status("slow").label(), Some("loading…"));
    }

    #[test]
    fn test_selection_switches_to_confirm_panel() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());

        let mut state = PlacementState::new();
        state
            .apply(PlacementAction::Pick(registry.find("ready").unwrap().id()))
            .unwrap();

        match Panel::build(&state, &registry) {
            Panel::Confirm {
                name, can_confirm, ..
            } => {
                assert_eq!(name, "ready");
                assert!(can_confirm);
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_confirm_disabled_while_loading() {
        let dir = tempfile::tempdir().unwrap();
        let registry = registry(dir.path());

        for name in ["slow", "broken"] {
            let mut state = PlacementState::new();
            state
                .apply(PlacementAction::Pick(registry.find(name).unwrap().id()))
                .unwrap();
            assert!(matches!(
                Panel::build(&state, &registry),
                Panel::Confirm {
                    can_confirm: false,
                    ..
                }
            ));
        }
    }
}
