use std::path::{Path, PathBuf};

use askama::Template;

use crate::config::{ProjectConfig, CONFIG_FILE_NAME};
use crate::error::CrudError;
use crate::generator::emit::{write_artifact, ArtifactStatus, WriteMode};
use crate::generator::project::generate::{ArtifactKind, ArtifactReport};
use crate::generator::stubs::BUILTIN_STUBS;

/// Template for the shared Blade layout every generated view extends
#[derive(Template)]
#[template(path = "layout.blade.php", escape = "none")]
pub struct LayoutTemplate {
    /// Fallback application name shown when `app.name` is unset
    pub app_name: String,
}

/// Template for the base class of generated page controllers
#[derive(Template)]
#[template(path = "WebSuperController.php.txt", escape = "none")]
pub struct WebSuperControllerTemplate {
    pub namespace: String,
    pub per_page: usize,
    /// Controllers-root marker, escaped for a single-quoted PHP string
    pub controller_marker: String,
}

/// Template for the base class of generated API controllers
#[derive(Template)]
#[template(path = "ApiSuperController.php.txt", escape = "none")]
pub struct ApiSuperControllerTemplate {
    pub namespace: String,
    pub per_page: usize,
}

/// Template for a fully spelled-out `crudgen.toml`
#[derive(Template)]
#[template(path = "crudgen.toml.txt", escape = "none")]
pub struct ConfigTomlTemplate<'a> {
    pub config: &'a ProjectConfig,
}

/// Publish the layout, both base controllers and a default `crudgen.toml`.
///
/// Each file is skipped if it already exists unless `force` is set.
pub fn install(root: &Path, config: &ProjectConfig, force: bool) -> Vec<ArtifactReport> {
    let mode = WriteMode { force, dry_run: false };
    let base_dir = root.join(&config.paths.controllers).join(base_controller_subdir(config));

    let assets: [(ArtifactKind, PathBuf, Result<String, askama::Error>); 4] = [
        (
            ArtifactKind::Layout,
            root.join(&config.paths.layouts).join("app.blade.php"),
            LayoutTemplate {
                app_name: "Laravel".to_string(),
            }
            .render(),
        ),
        (
            ArtifactKind::WebBaseController,
            base_dir.join("WebSuperController.php"),
            WebSuperControllerTemplate {
                namespace: config.namespaces.base_controllers.clone(),
                per_page: config.runtime.per_page,
                controller_marker: config.namespaces.controller_marker.replace('\\', "\\\\"),
            }
            .render(),
        ),
        (
            ArtifactKind::ApiBaseController,
            base_dir.join("ApiSuperController.php"),
            ApiSuperControllerTemplate {
                namespace: config.namespaces.base_controllers.clone(),
                per_page: config.runtime.per_page,
            }
            .render(),
        ),
        (
            ArtifactKind::ConfigFile,
            root.join(CONFIG_FILE_NAME),
            ConfigTomlTemplate { config }.render(),
        ),
    ];

    assets
        .into_iter()
        .map(|(kind, path, rendered)| {
            let status = rendered
                .map_err(CrudError::from)
                .and_then(|contents| write_artifact(&path, &contents, mode))
                .unwrap_or_else(|e| ArtifactStatus::Failed(e.to_string()));
            ArtifactReport { kind, path, status }
        })
        .collect()
}

/// Copy every built-in stub into the project's stubs directory for customization.
pub fn publish_stubs(root: &Path, config: &ProjectConfig, force: bool) -> Vec<ArtifactReport> {
    let mode = WriteMode { force, dry_run: false };
    let stub_dir = root.join(&config.paths.stubs);
    BUILTIN_STUBS
        .iter()
        .map(|stub| {
            let path = stub_dir.join(stub.name);
            let status = write_artifact(&path, stub.contents, mode)
                .unwrap_or_else(|e| ArtifactStatus::Failed(e.to_string()));
            ArtifactReport {
                kind: ArtifactKind::Stub,
                path,
                status,
            }
        })
        .collect()
}

/// Directory of the base-controller namespace relative to the controllers directory.
///
/// `App\Http\Controllers\Crud` with controllers at `App\Http\Controllers` → `Crud`.
fn base_controller_subdir(config: &ProjectConfig) -> PathBuf {
    let base = &config.namespaces.base_controllers;
    let relative = base
        .strip_prefix(config.namespaces.controllers.as_str())
        .unwrap_or("")
        .trim_start_matches('\\');
    relative.split('\\').filter(|s| !s.is_empty()).collect()
}
