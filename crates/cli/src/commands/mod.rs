//! Command implementations.

mod info;
mod serve;
mod validate;

pub use info::run_info;
pub use serve::run_serve;
pub use validate::run_validate;

use anyhow::{Context, Result};
use contracts::ServiceSettings;
use std::path::Path;

/// Load settings from `path`, failing early with a readable message if the file is missing
fn load_settings(path: &Path) -> Result<ServiceSettings> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    config_loader::ConfigLoader::load_from_path(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))
}
