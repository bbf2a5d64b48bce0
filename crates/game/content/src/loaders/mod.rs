//! Loaders for JSON game definitions.

pub mod definition;
pub mod factory;

pub use definition::DefinitionLoader;
pub use factory::{new_game, seed_instance};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
