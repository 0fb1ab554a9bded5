//! Loading definition files into definitions and registries.

use crate::config::definition::DefinitionConfig;
use crate::config::error::ConfigError;
use crate::config::parser::parse_config;
use crate::mocks::definition::MockDefinition;
use crate::mocks::registry::DefinitionRegistry;
use std::path::{Path, PathBuf};

/// Read every definition declared in one file.
pub fn load_definitions(path: impl AsRef<Path>) -> Result<Vec<MockDefinition>, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<DefinitionConfig> = parse_config(&content, path)?;
    let definitions = entries
        .into_iter()
        .map(DefinitionConfig::into_definition)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ConfigError::Definition {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        "Loaded {} definition(s) from {}",
        definitions.len(),
        path.display()
    );
    Ok(definitions)
}

/// Collect the definitions of every file matching `pattern` into one registry.
///
/// Files are processed in path order; a name declared again in a later file replaces the
/// earlier definition. Every definition must be named.
pub fn load_registry(pattern: &str) -> Result<DefinitionRegistry, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    paths.sort();

    let mut registry = DefinitionRegistry::new();
    for path in paths {
        let definitions = load_definitions(&path)?;
        registry
            .collect(definitions)
            .map_err(|source| ConfigError::Definition { path, source })?;
    }

    tracing::debug!(
        "Registry loaded from {} with {} definition(s)",
        pattern,
        registry.len()
    );
    Ok(registry)
}
