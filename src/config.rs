//! Project configuration for crudgen
//!
//! A project may carry a `crudgen.toml` at its root to change where artifacts are
//! written and which namespaces they declare. Every key is optional; anything left out
//! keeps the Laravel default.
//!
//! ```toml
//! [namespaces]
//! models = "Domain\\Models"
//!
//! [paths]
//! models = "src/Domain/Models"
//!
//! [runtime]
//! per_page = 25
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CrudError;
use crate::naming::CONTROLLER_MARKER;

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "crudgen.toml";

/// Full project configuration, loaded from `crudgen.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// PHP namespaces declared by generated classes
    pub namespaces: NamespaceConfig,
    /// Output locations, relative to the project root
    pub paths: PathConfig,
    /// Defaults baked into generated controllers
    pub runtime: RuntimeSettings,
}

/// PHP namespaces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamespaceConfig {
    pub models: String,
    pub controllers: String,
    pub requests: String,
    pub resources: String,
    /// Namespace holding `WebSuperController` and `ApiSuperController`
    pub base_controllers: String,
    /// Marker used by the reverse resolver to find the controllers root
    pub controller_marker: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            models: "App\\Models".to_string(),
            controllers: "App\\Http\\Controllers".to_string(),
            requests: "App\\Http\\Requests".to_string(),
            resources: "App\\Http\\Resources".to_string(),
            base_controllers: "App\\Http\\Controllers".to_string(),
            controller_marker: CONTROLLER_MARKER.to_string(),
        }
    }
}

/// Directories relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathConfig {
    pub models: PathBuf,
    pub controllers: PathBuf,
    pub requests: PathBuf,
    pub resources: PathBuf,
    pub migrations: PathBuf,
    pub views: PathBuf,
    pub layouts: PathBuf,
    pub routes: PathBuf,
    /// Where `publish-stubs` copies stubs and where overrides are read from
    pub stubs: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            models: PathBuf::from("app/Models"),
            controllers: PathBuf::from("app/Http/Controllers"),
            requests: PathBuf::from("app/Http/Requests"),
            resources: PathBuf::from("app/Http/Resources"),
            migrations: PathBuf::from("database/migrations"),
            views: PathBuf::from("resources/views"),
            layouts: PathBuf::from("resources/views/layouts"),
            routes: PathBuf::from("routes"),
            stubs: PathBuf::from("stubs/crud-generator"),
        }
    }
}

/// Runtime defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Page size used by the index actions
    pub per_page: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self { per_page: 10 }
    }
}

/// Load a configuration file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if the file exists and parses,
/// `Ok(None)` if it does not exist (not an error),
/// `Err` if it exists but cannot be read or parsed.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<ProjectConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read crudgen config: {}", config_path.display()))?;

    let config: ProjectConfig = toml::from_str(&contents).map_err(|e| CrudError::Config {
        path: config_path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve which config file applies
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. `crudgen.toml` in the project root
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "config file not found, falling back to project root");
    }

    let candidate = root.join(CONFIG_FILE_NAME);
    candidate.exists().then_some(candidate)
}

impl ProjectConfig {
    /// Resolve and load the configuration for `root`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file was found but is unreadable or invalid.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        match resolve_config_path(explicit_path, root) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading crudgen config");
                Ok(load_config(&path)?.unwrap_or_default())
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_defaults_follow_laravel_layout() {
        let config = ProjectConfig::default();
        assert_eq!(config.namespaces.models, "App\\Models");
        assert_eq!(config.paths.migrations, PathBuf::from("database/migrations"));
        assert_eq!(config.paths.stubs, PathBuf::from("stubs/crud-generator"));
        assert_eq!(config.runtime.per_page, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[namespaces]\nmodels = \"Domain\\\\Models\"\n\n[runtime]\nper_page = 25\n",
        )
        .unwrap();

        let config = ProjectConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.namespaces.models, "Domain\\Models");
        assert_eq!(config.namespaces.controllers, "App\\Http\\Controllers");
        assert_eq!(config.paths.models, PathBuf::from("app/Models"));
        assert_eq!(config.runtime.per_page, 25);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).unwrap().is_none());
        assert_eq!(ProjectConfig::load(None, dir.path()).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[runtime]\nper_page = \"many\"\n").unwrap();

        let err = ProjectConfig::load(None, dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CrudError>(),
            Some(CrudError::Config { .. })
        ));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[runtime]\nper_page = 5\n").unwrap();
        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "[runtime]\nper_page = 50\n").unwrap();

        assert_eq!(resolve_config_path(Some(&explicit), dir.path()), Some(explicit.clone()));
        let config = ProjectConfig::load(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.runtime.per_page, 50);
    }

    #[test]
    fn test_missing_explicit_path_falls_back_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[runtime]\nper_page = 5\n").unwrap();
        let resolved = resolve_config_path(Some(&dir.path().join("gone.toml")), dir.path());
        assert_eq!(resolved, Some(dir.path().join(CONFIG_FILE_NAME)));
    }
}
