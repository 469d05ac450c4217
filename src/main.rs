use std::path::PathBuf;

use anyhow::Context;
use placer::{PlacerApp, PlacerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PlacerConfig::load(config_path.as_deref())
        .context("failed to load configuration")?;
    log::info!("Loading models from {}", config.assets_dir.display());

    PlacerApp::new(config)?.run()?;
    Ok(())
}
