//! Runtime configuration
//!
//! [`PlacerConfig`] collects everything the app needs at startup: where the
//! assets live, which file extensions count as models and thumbnails, how many
//! background loaders to run and which tracking capabilities to request.
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```ron
//! (
//!     assets_dir: "assets/models",
//!     loader_threads: 2,
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Directory scanned for models when nothing else is configured
pub const DEFAULT_ASSETS_DIR: &str = "assets/models";

/// Environment variable that overrides [`PlacerConfig::assets_dir`]
pub const ASSETS_DIR_ENV: &str = "PLACER_ASSETS";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Plane orientations the tracking session should detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlaneDetection {
    pub horizontal: bool,
    pub vertical: bool,
}

impl PlaneDetection {
    pub const NONE: Self = Self {
        horizontal: false,
        vertical: false,
    };

    pub const ALL: Self = Self {
        horizontal: true,
        vertical: true,
    };

    pub fn is_empty(&self) -> bool {
        !self.horizontal && !self.vertical
    }
}

impl Default for PlaneDetection {
    fn default() -> Self {
        Self::ALL
    }
}

/// How the session lights placed content from the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EnvironmentTexturing {
    None,
    Manual,
    #[default]
    Automatic,
}

/// Tracking capabilities requested from the session
///
/// The session is configured once with these values; mesh reconstruction is
/// only switched on when the session also reports support for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionCapabilities {
    pub plane_detection: PlaneDetection,
    pub environment_texturing: EnvironmentTexturing,
    pub mesh_reconstruction: bool,
}

impl Default for SessionCapabilities {
    fn default() -> Self {
        Self {
            plane_detection: PlaneDetection::ALL,
            environment_texturing: EnvironmentTexturing::Automatic,
            mesh_reconstruction: true,
        }
    }
}

impl SessionCapabilities {
    pub fn with_plane_detection(mut self, plane_detection: PlaneDetection) -> Self {
        self.plane_detection = plane_detection;
        self
    }

    pub fn with_environment_texturing(mut self, texturing: EnvironmentTexturing) -> Self {
        self.environment_texturing = texturing;
        self
    }

    pub fn with_mesh_reconstruction(mut self, enabled: bool) -> Self {
        self.mesh_reconstruction = enabled;
        self
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacerConfig {
    /// Directory scanned once at startup
    pub assets_dir: PathBuf,
    /// Extension (without dot) that marks a model file
    pub model_extension: String,
    /// Extensions tried, in order, when looking up a thumbnail
    pub thumbnail_extensions: Vec<String>,
    /// Edge length thumbnails are downscaled to
    pub thumbnail_size: u32,
    /// Upper bound on background loader threads
    pub loader_threads: usize,
    pub session: SessionCapabilities,
    /// Diameter of the overlay joystick in logical pixels
    pub joystick_diameter: f32,
    pub window_size: (u32, u32),
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            model_extension: "obj".to_string(),
            thumbnail_extensions: vec!["png".to_string(), "jpg".to_string()],
            thumbnail_size: 128,
            loader_threads: 4,
            session: SessionCapabilities::default(),
            joystick_diameter: 100.0,
            window_size: (1200, 800),
        }
    }
}

impl PlacerConfig {
    /// Parses a RON document; omitted fields keep their defaults
    pub fn from_ron_str(source: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a RON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source, path)
    }

    /// Loads the config file if one is given, then applies environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(self) -> Self {
        match std::env::var_os(ASSETS_DIR_ENV) {
            Some(dir) if !dir.is_empty() => self.with_assets_dir(dir),
            _ => self,
        }
    }

    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_model_extension(mut self, extension: &str) -> Self {
        self.model_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_loader_threads(mut self, threads: usize) -> Self {
        self.loader_threads = threads;
        self
    }

    pub fn with_session(mut self, session: SessionCapabilities) -> Self {
        self.session = session;
        self
    }

    /// Thread count actually used for the loader pool
    pub fn effective_loader_threads(&self) -> usize {
        num_cpus::get().min(self.loader_threads).max(1)
    }
}
