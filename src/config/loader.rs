//! Configuration loading functionality.
//!
//! This module provides the [`RegimeRegistry`] type, which loads policy
//! regime definitions from YAML files and serves them read-only.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{PolicyRegime, RegistryMetadata};

/// Loads and provides access to the registered policy regimes.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/policy/
/// ├── registry.yaml            # Registry metadata
/// └── regimes/
///     ├── 01_tcja_baseline.yaml
///     └── 02_high_income_surtax.yaml
/// ```
///
/// Regime files are read in file-name order, which is also the order
/// regimes appear in a comparison.
///
/// # Example
///
/// ```no_run
/// use policy_impact_engine::config::RegimeRegistry;
///
/// let registry = RegimeRegistry::load("./config/policy").unwrap();
/// let regime = registry.regime("tcja_baseline").unwrap();
/// println!("Loaded regime: {}", regime.name);
/// ```
#[derive(Debug, Clone)]
pub struct RegimeRegistry {
    metadata: RegistryMetadata,
    regimes: Vec<PolicyRegime>,
}

impl RegimeRegistry {
    /// Builds a registry from in-memory regime definitions.
    ///
    /// Each regime is validated and ids must be unique.
    pub fn new(metadata: RegistryMetadata, regimes: Vec<PolicyRegime>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for regime in &regimes {
            regime.validate()?;
            if !seen.insert(regime.id.as_str()) {
                return Err(EngineError::InvalidRegime {
                    regime: regime.id.clone(),
                    message: "duplicate regime id".to_string(),
                });
            }
        }

        Ok(Self { metadata, regimes })
    }

    /// Loads the registry from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/policy")
    ///
    /// # Returns
    ///
    /// Returns a `RegimeRegistry` on success, or an error if:
    /// - `registry.yaml` or the `regimes` directory is missing
    /// - Any file contains invalid YAML or an invalid bracket table
    /// - A regime is inconsistent or an id is duplicated
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = load_yaml::<RegistryMetadata>(&path.join("registry.yaml"))?;
        let regimes = load_regimes(&path.join("regimes"))?;

        debug!(
            path = %path.display(),
            regimes = regimes.len(),
            "Loaded policy regime configuration"
        );

        Self::new(metadata, regimes)
    }

    /// Returns the registry metadata.
    pub fn metadata(&self) -> &RegistryMetadata {
        &self.metadata
    }

    /// Returns every regime in registration order.
    pub fn regimes(&self) -> &[PolicyRegime] {
        &self.regimes
    }

    /// Gets a regime by its id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use policy_impact_engine::config::RegimeRegistry;
    ///
    /// let registry = RegimeRegistry::load("./config/policy")?;
    /// let regime = registry.regime("high_income_surtax")?;
    /// println!("{}", regime.title);
    /// # Ok::<(), policy_impact_engine::error::EngineError>(())
    /// ```
    pub fn regime(&self, id: &str) -> EngineResult<&PolicyRegime> {
        self.regimes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::RegimeNotFound { id: id.to_string() })
    }
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}

/// Loads all regime files from the regimes directory, sorted by file name.
fn load_regimes(regimes_dir: &Path) -> EngineResult<Vec<PolicyRegime>> {
    let regimes_dir_str = regimes_dir.display().to_string();

    let entries = fs::read_dir(regimes_dir).map_err(|_| EngineError::ConfigNotFound {
        path: regimes_dir_str.clone(),
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|_| EngineError::ConfigNotFound {
            path: regimes_dir_str.clone(),
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "yaml") {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(EngineError::ConfigNotFound {
            path: format!("{} (no regime files found)", regimes_dir_str),
        });
    }

    paths.iter().map(|p| load_yaml::<PolicyRegime>(p)).collect()
}
