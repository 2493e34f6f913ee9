use crate::types::{Result, SourceDescriptor, SourcesConfig};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Loads the configured sources. Never fails: a missing file is replaced by
/// the default configuration, an unusable one yields no sources.
pub fn load_sources(path: &Path) -> Vec<SourceDescriptor> {
    if !path.exists() {
        warn!("Source file {} not found, writing default configuration", path.display());
        let defaults = SourcesConfig::default_sources();
        if let Err(e) = write_sources(path, &defaults) {
            warn!("Could not write default configuration to {}: {}", path.display(), e);
        }
        return defaults.into_sources();
    }

    match read_sources(path) {
        Ok(sources) => {
            info!("Loaded {} sources from {}", sources.len(), path.display());
            sources
        }
        Err(e) => {
            error!("Could not load sources from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

pub fn read_sources(path: &Path) -> Result<Vec<SourceDescriptor>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        debug!("Source file {} is empty", path.display());
        return Ok(Vec::new());
    }
    let config: SourcesConfig = serde_yaml::from_str(&content)?;
    Ok(config.into_sources())
}

pub fn write_sources(path: &Path, config: &SourcesConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(config)?)?;
    Ok(())
}
