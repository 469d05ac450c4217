//! Asynchronous model loading
//!
//! The registry never parses model files itself. It hands a path to an
//! [`AssetLoader`] and gets back a boxed future; the future is spawned on a
//! background executor and its output is delivered to the registry later.

use std::path::{Path, PathBuf};

use futures::future::{BoxFuture, FutureExt};
use thiserror::Error;

use super::renderable::{MeshData, Renderable};

/// Model load failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("failed to parse {path:?}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("{path:?} contains no geometry")]
    Empty { path: PathBuf },

    #[error("load of {path:?} was abandoned before completing")]
    Abandoned { path: PathBuf },
}

/// Source of renderables
///
/// Implementations must not block the caller: all work happens inside the
/// returned future, which the registry runs on its own executor.
pub trait AssetLoader: Send + Sync {
    fn load(&self, path: &Path) -> BoxFuture<'static, Result<Renderable, LoadError>>;
}

/// Wavefront OBJ loader backed by `tobj`
#[derive(Debug, Clone, Default)]
pub struct ObjLoader;

impl ObjLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parses an OBJ file synchronously
    pub fn load_blocking(path: &Path) -> Result<Renderable, LoadError> {
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )
        .map_err(|err| LoadError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let meshes: Vec<MeshData> = models
            .into_iter()
            .map(|model| model.mesh)
            .filter(|mesh| !mesh.positions.is_empty() && !mesh.indices.is_empty())
            .map(|mesh| MeshData::new(mesh.positions, mesh.normals, mesh.indices))
            .collect();

        if meshes.is_empty() {
            return Err(LoadError::Empty {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();

        Ok(Renderable::new(name, meshes))
    }
}

impl AssetLoader for ObjLoader {
    fn load(&self, path: &Path) -> BoxFuture<'static, Result<Renderable, LoadError>> {
        let path = path.to_path_buf();
        async move { Self::load_blocking(&path) }.boxed()
    }
}
