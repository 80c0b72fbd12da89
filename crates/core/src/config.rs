//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! registry builder. Binaries read environment variables; nothing in this
//! crate does, which keeps request handling and tests free of process-wide
//! state.

use crate::registry::TerminologyRegistry;
use crate::TerminologyResult;
use std::path::{Path, PathBuf};

/// Registry construction settings resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct RegistryConfig {
    catalog_file: Option<PathBuf>,
}

impl RegistryConfig {
    /// Create a config. `catalog_file` replaces the bundled catalog when set.
    pub fn new(catalog_file: Option<PathBuf>) -> Self {
        Self { catalog_file }
    }

    pub fn catalog_file(&self) -> Option<&Path> {
        self.catalog_file.as_deref()
    }

    /// Build the registry this config describes and log what was loaded.
    ///
    /// Integrity defects in the loaded data are warnings, not failures: the
    /// affected entries degrade to "not found" at query time.
    ///
    /// # Errors
    ///
    /// Fails only when a catalog file is configured and cannot be read or
    /// parsed; the bundled catalog never fails to load.
    pub fn build_registry(&self) -> TerminologyResult<TerminologyRegistry> {
        let registry = match &self.catalog_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading terminology catalog from file");
                TerminologyRegistry::from_json_file(path)?
            }
            None => TerminologyRegistry::bundled(),
        };

        tracing::info!(
            namaste_terms = registry.terms().len(),
            icd11_codes = registry.classifications().len(),
            concept_mappings = registry.mappings().len(),
            "terminology registry loaded"
        );

        for issue in registry.integrity_issues() {
            tracing::warn!("catalog integrity issue: {issue}");
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_the_bundled_registry() {
        let registry = RegistryConfig::default()
            .build_registry()
            .expect("bundled catalog always loads");
        assert!(!registry.terms().is_empty());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let config = RegistryConfig::new(Some(PathBuf::from("/nonexistent/catalog.json")));
        assert!(config.build_registry().is_err());
    }
}
