//! Error types for placer.

use thiserror::Error;

use crate::config::ConfigError;
use crate::gfx::rendering::RenderError;
use crate::placement::PlacementError;
use crate::registry::{AssetIntegrityError, LoadError, RegistryError};

/// Placer error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be read
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Asset directory scan failed
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A discovered asset is missing a required companion file
    #[error("Asset integrity error: {0}")]
    AssetIntegrity(#[from] AssetIntegrityError),

    /// Model load failed
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Placement action rejected
    #[error("Placement error: {0}")]
    Placement(#[from] PlacementError),

    /// Window system or event loop failure
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// GPU setup failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Background executor could not be started
    #[error("Executor error: {0}")]
    Executor(#[source] std::io::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for placer operations.
pub type Result<T> = std::result::Result<T, Error>;
