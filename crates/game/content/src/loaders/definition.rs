//! Game definition loader.

use std::path::Path;

use fable_core::GameDefinition;

use crate::loaders::{read_file, LoadResult};

/// Loads [`GameDefinition`] documents from JSON.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Parse a definition from a JSON string.
    pub fn from_json_str(json: &str) -> LoadResult<GameDefinition> {
        serde_json::from_str(json)
            .map_err(|e| anyhow::anyhow!("Failed to parse game definition: {}", e))
    }

    /// Load a definition from a JSON file.
    pub fn load(path: &Path) -> LoadResult<GameDefinition> {
        let content = read_file(path)?;
        Self::from_json_str(&content)
    }
}
