//! Loaders turning the TOML content directory into definitions.

pub mod config;
pub mod factory;
pub mod tables;
pub mod validate;
pub mod zones;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use tables::TableLoader;
pub use validate::validate;
pub use zones::ZoneLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let content = read_file(path)?;
    toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
}
