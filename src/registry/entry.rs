use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::imageops::FilterType;
use thiserror::Error;

use super::renderable::Renderable;

/// Stable index of an entry inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A discovered asset whose companion thumbnail is unusable
#[derive(Error, Debug)]
pub enum AssetIntegrityError {
    #[error("no thumbnail for '{name}' (looked for {searched:?})")]
    MissingThumbnail { name: String, searched: Vec<PathBuf> },

    #[error("thumbnail {path:?} for '{name}' could not be decoded: {source}")]
    UnreadableThumbnail {
        name: String,
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AssetIntegrityError {
    pub fn asset_name(&self) -> &str {
        match self {
            Self::MissingThumbnail { name, .. } | Self::UnreadableThumbnail { name, .. } => name,
        }
    }
}

/// Decoded RGBA8 preview image
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Thumbnail {
    /// Finds `<name>.<ext>` next to the model, trying extensions in order
    pub fn lookup(
        dir: &Path,
        name: &str,
        extensions: &[String],
        max_size: u32,
    ) -> Result<Self, AssetIntegrityError> {
        let candidates: Vec<PathBuf> = extensions
            .iter()
            .map(|ext| dir.join(format!("{}.{}", name, ext)))
            .collect();

        let Some(path) = candidates.iter().find(|path| path.is_file()) else {
            return Err(AssetIntegrityError::MissingThumbnail {
                name: name.to_string(),
                searched: candidates,
            });
        };

        let image = image::open(path).map_err(|source| AssetIntegrityError::UnreadableThumbnail {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;

        let image = if image.width() > max_size || image.height() > max_size {
            image.resize(max_size, max_size, FilterType::Triangle)
        } else {
            image
        };
        let rgba = image.to_rgba8();

        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            rgba: rgba.into_raw(),
        })
    }
}

/// Where an entry's renderable is in its single load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready,
    Failed(String),
}

/// One selectable model
#[derive(Debug)]
pub struct AssetEntry {
    id: EntryId,
    name: String,
    model_path: PathBuf,
    thumbnail: Thumbnail,
    renderable: Option<Arc<Renderable>>,
    status: LoadStatus,
}

impl AssetEntry {
    pub(crate) fn new(id: EntryId, name: String, model_path: PathBuf, thumbnail: Thumbnail) -> Self {
        Self {
            id,
            name,
            model_path,
            thumbnail,
            renderable: None,
            status: LoadStatus::Pending,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    pub fn renderable(&self) -> Option<&Arc<Renderable>> {
        self.renderable.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.renderable.is_some()
    }

    /// Applies the load outcome; returns false if one was already applied
    pub(crate) fn complete(&mut self, result: Result<Renderable, String>) -> bool {
        if self.status != LoadStatus::Pending {
            return false;
        }

        match result {
            Ok(renderable) => {
                self.renderable = Some(Arc::new(renderable));
                self.status = LoadStatus::Ready;
            }
            Err(reason) => self.status = LoadStatus::Failed(reason),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::renderable::MeshData;

    fn entry() -> AssetEntry {
        AssetEntry::new(
            EntryId(0),
            "car".to_string(),
            PathBuf::from("car.obj"),
            Thumbnail {
                width: 1,
                height: 1,
                rgba: vec![255; 4],
            },
        )
    }

    fn triangle() -> Renderable {
        Renderable::new(
            "car",
            vec![MeshData::new(
                vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
                Vec::new(),
                vec![0, 1, 2],
            )],
        )
    }

    #[test]
    fn test_renderable_is_set_at_most_once() {
        let mut entry = entry();
        assert!(entry.complete(Ok(triangle())));
        let first = entry.renderable().cloned().unwrap();

        assert!(!entry.complete(Ok(triangle())));
        assert!(Arc::ptr_eq(&first, entry.renderable().unwrap()));
    }

    #[test]
    fn test_failure_is_permanent() {
        let mut entry = entry();
        assert!(entry.complete(Err("bad file".to_string())));
        assert!(!entry.complete(Ok(triangle())));

        assert!(entry.renderable().is_none());
        assert_eq!(entry.status(), &LoadStatus::Failed("bad file".to_string()));
    }

    #[test]
    fn test_missing_thumbnail_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let err = Thumbnail::lookup(dir.path(), "car", &["png".into(), "jpg".into()], 64)
            .unwrap_err();

        match err {
            AssetIntegrityError::MissingThumbnail { name, searched } => {
                assert_eq!(name, "car");
                assert_eq!(searched.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_large_thumbnail_is_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(256, 128)
            .save(dir.path().join("car.png"))
            .unwrap();

        let thumbnail = Thumbnail::lookup(dir.path(), "car", &["png".into()], 64).unwrap();

        assert_eq!((thumbnail.width, thumbnail.height), (64, 32));
        assert_eq!(thumbnail.rgba.len(), 64 * 32 * 4);
    }

    #[test]
    fn test_corrupt_thumbnail_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("car.png"), b"not a png").unwrap();

        let err = Thumbnail::lookup(dir.path(), "car", &["png".into()], 64).unwrap_err();
        assert!(matches!(err, AssetIntegrityError::UnreadableThumbnail { .. }));
        assert_eq!(err.asset_name(), "car");
    }
}
