use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::ProjectConfig;
use crate::error::CrudError;
use crate::fields::{parse_fields_with, FieldSpec, ParsePolicy};
use crate::generator::emit::{find_by_suffix, render, write_artifact, ArtifactStatus, FragmentMap, WriteMode};
use crate::generator::fragments::{compile, FragmentContext, FragmentKind};
use crate::generator::stubs::load_stub;
use crate::naming::{snake, title_label, NamingPlan};
use crate::routes::{is_registered, register, route_line, FsRouteFile, RouteOutcome, RouteStyle};

/// Every output the generator knows how to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Model,
    Migration,
    StoreRequest,
    UpdateRequest,
    Controller,
    ApiResource,
    ViewIndex,
    ViewCreate,
    ViewEdit,
    ViewShow,
    ViewForm,
    WebRoute,
    ApiRoute,
    Layout,
    WebBaseController,
    ApiBaseController,
    ConfigFile,
    Stub,
}

impl ArtifactKind {
    /// Stub rendered for this kind; `None` for routes and install assets
    pub fn stub_name(self) -> Option<&'static str> {
        Some(match self {
            ArtifactKind::Model => "model.stub",
            ArtifactKind::Migration => "migration.stub",
            ArtifactKind::StoreRequest => "request.store.stub",
            ArtifactKind::UpdateRequest => "request.update.stub",
            ArtifactKind::Controller => "controller.stub",
            ArtifactKind::ApiResource => "api_resource.stub",
            ArtifactKind::ViewIndex => "views/index.blade.stub",
            ArtifactKind::ViewCreate => "views/create.blade.stub",
            ArtifactKind::ViewEdit => "views/edit.blade.stub",
            ArtifactKind::ViewShow => "views/show.blade.stub",
            ArtifactKind::ViewForm => "views/_form.blade.stub",
            _ => return None,
        })
    }
}

/// Which parts of a scaffold to generate
///
/// Mirrors `--only`: each flag enables one group of artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    /// Model and migration
    pub model: bool,
    /// Store and update form requests
    pub request: bool,
    /// Controller, plus the API resource in API mode
    pub controller: bool,
    /// The five Blade views (page mode only)
    pub views: bool,
    /// Route registration
    pub routes: bool,
}

impl GenerationScope {
    /// Every artifact group, the default without `--only`
    pub fn all() -> Self {
        Self {
            model: true,
            request: true,
            controller: true,
            views: true,
            routes: true,
        }
    }

    /// No artifact groups; the starting point `--only` enables parts on
    pub fn none() -> Self {
        Self {
            model: false,
            request: false,
            controller: false,
            views: false,
            routes: false,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything `generate` needs besides the project configuration
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Hierarchical resource name, e.g. `Admin/Post`
    pub name: String,
    /// Field DSL, e.g. `title:string,body:text:nullable`
    pub fields: Option<String>,
    /// Project root every configured path is relative to
    pub root: PathBuf,
    /// Overwrite existing artifacts (route lines are still never duplicated)
    pub force: bool,
    /// Emit an API controller, resource and `api.php` route instead of pages
    pub api: bool,
    /// Add the `SoftDeletes` trait to the model and `softDeletes()` to the migration
    pub soft_deletes: bool,
    /// Add search to the index page; ignored in API mode
    pub search: bool,
    /// Which artifact groups to produce
    pub scope: GenerationScope,
    /// Render without writing; artifacts that would be written report `Planned`
    pub dry_run: bool,
    /// Reject field clauses with empty names instead of dropping them
    pub strict_fields: bool,
}

impl GenerateRequest {
    /// A page-mode request with every other switch off
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            fields: None,
            root: root.into(),
            force: false,
            api: false,
            soft_deletes: false,
            search: false,
            scope: GenerationScope::all(),
            dry_run: false,
            strict_fields: false,
        }
    }

    /// Set the field DSL
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode {
            force: self.force,
            dry_run: self.dry_run,
        }
    }
}

/// Outcome for one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

/// What a `generate` run produced
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub plan: NamingPlan,
    pub fields: Vec<FieldSpec>,
    pub artifacts: Vec<ArtifactReport>,
}

impl GenerationReport {
    /// Whether any artifact failed
    pub fn has_failures(&self) -> bool {
        self.artifacts.iter().any(|a| a.status.is_failure())
    }

    /// Report entry for `kind`, if it was attempted
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&ArtifactReport> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}

/// Generate a CRUD scaffold under `request.root`.
///
/// Artifacts are produced in a fixed order (model, migration, requests, controller,
/// resource, views, route). A failure is recorded against the artifact that caused it
/// and the remaining artifacts are still attempted; nothing is rolled back.
///
/// # Errors
///
/// Only planning errors abort the run: an empty resource name, or an empty field name
/// under `strict_fields`.
pub fn generate(request: &GenerateRequest, config: &ProjectConfig) -> Result<GenerationReport, CrudError> {
    let plan = NamingPlan::resolve(&request.name)?;
    let policy = if request.strict_fields {
        ParsePolicy::Strict
    } else {
        ParsePolicy::Lenient
    };
    let fields = parse_fields_with(request.fields.as_deref(), policy)?;

    tracing::info!(
        entity = %plan.entity_name,
        route_base = %plan.route_base,
        fields = fields.len(),
        api = request.api,
        "generating CRUD scaffold"
    );

    let emitter = Emitter {
        root: &request.root,
        stub_dir: request.root.join(&config.paths.stubs),
        mode: request.write_mode(),
    };
    let base = base_fragments(&plan, &fields, request, config);
    let mut artifacts = Vec::new();
    let scope = request.scope;

    if scope.model {
        let mut map = base.clone();
        map.insert("namespace".into(), config.namespaces.models.clone());
        map.insert("class".into(), plan.entity_name.clone());
        let path = config.paths.models.join(format!("{}.php", plan.entity_name));
        artifacts.push(emitter.emit(ArtifactKind::Model, &path, &map));

        let migrations_dir = request.root.join(&config.paths.migrations);
        let path = migration_path(&migrations_dir, &plan.table_name);
        artifacts.push(emitter.emit_absolute(ArtifactKind::Migration, &path, &base));
    }

    if scope.request {
        let dir = PathBuf::from(plan.qualify_dir(&config.paths.requests.to_string_lossy()));
        let namespace = plan.qualify_namespace(&config.namespaces.requests);
        for (kind, class) in [
            (ArtifactKind::StoreRequest, plan.store_request_class()),
            (ArtifactKind::UpdateRequest, plan.update_request_class()),
        ] {
            let mut map = base.clone();
            map.insert("namespace".into(), namespace.clone());
            map.insert("class".into(), class.clone());
            artifacts.push(emitter.emit(kind, &dir.join(format!("{class}.php")), &map));
        }
    }

    if scope.controller {
        let dir = PathBuf::from(plan.qualify_dir(&config.paths.controllers.to_string_lossy()));
        let mut map = base.clone();
        map.insert("namespace".into(), plan.qualify_namespace(&config.namespaces.controllers));
        map.insert("class".into(), plan.controller_class());
        let path = dir.join(format!("{}.php", plan.controller_class()));
        let stub = if request.api { "api_controller.stub" } else { "controller.stub" };
        artifacts.push(emitter.emit_stub(ArtifactKind::Controller, stub, &request.root.join(&path), &map));

        if request.api {
            let dir = PathBuf::from(plan.qualify_dir(&config.paths.resources.to_string_lossy()));
            let mut map = base.clone();
            map.insert("namespace".into(), plan.qualify_namespace(&config.namespaces.resources));
            map.insert("class".into(), plan.resource_class());
            let path = dir.join(format!("{}.php", plan.resource_class()));
            artifacts.push(emitter.emit(ArtifactKind::ApiResource, &path, &map));
        }
    }

    if scope.views && !request.api {
        let dir = config.paths.views.join(plan.view_dir());
        for (kind, file) in [
            (ArtifactKind::ViewIndex, "index.blade.php"),
            (ArtifactKind::ViewCreate, "create.blade.php"),
            (ArtifactKind::ViewEdit, "edit.blade.php"),
            (ArtifactKind::ViewShow, "show.blade.php"),
            (ArtifactKind::ViewForm, "_form.blade.php"),
        ] {
            artifacts.push(emitter.emit(kind, &dir.join(file), &base));
        }
    }

    if scope.routes {
        artifacts.push(register_route(&plan, request, config));
    }

    let report = GenerationReport {
        plan,
        fields,
        artifacts,
    };
    if report.has_failures() {
        tracing::error!("one or more artifacts failed");
    }
    Ok(report)
}

/// Placeholder values shared by every artifact of one run
pub fn base_fragments(
    plan: &NamingPlan,
    fields: &[FieldSpec],
    request: &GenerateRequest,
    config: &ProjectConfig,
) -> FragmentMap {
    let ctx = FragmentContext::new(&plan.route_base);
    let searchable = request.search && !request.api;
    let fragment = |kind: FragmentKind| compile(fields, kind, &ctx);
    let requests_ns = plan.qualify_namespace(&config.namespaces.requests);

    let mut map = FragmentMap::new();
    let mut put = |key: &str, value: String| {
        map.insert(key.to_string(), value);
    };

    put("table", plan.table_name.clone());
    put("model", plan.entity_name.clone());
    put("model_label", title_label(&snake(&plan.entity_name)));
    put("model_plural_label", title_label(&plan.table_name));
    put("model_variable", plan.model_variable());
    put("model_variable_plural", plan.model_variable_plural());
    put("model_namespace", format!("{}\\{}", config.namespaces.models, plan.entity_name));
    put("controller_namespace", plan.qualify_namespace(&config.namespaces.controllers));
    put("base_controller_namespace", config.namespaces.base_controllers.clone());
    put("store_request", plan.store_request_class());
    put("update_request", plan.update_request_class());
    put("store_request_namespace", format!("{requests_ns}\\{}", plan.store_request_class()));
    put("update_request_namespace", format!("{requests_ns}\\{}", plan.update_request_class()));
    put("resource_class", plan.resource_class());
    put(
        "resource_namespace",
        format!(
            "{}\\{}",
            plan.qualify_namespace(&config.namespaces.resources),
            plan.resource_class()
        ),
    );
    put("view_path", plan.view_path.clone());
    put("route_base", plan.route_base.clone());

    put("schema", fragment(FragmentKind::Schema));
    put("fillable", fragment(FragmentKind::Fillable));
    put("rules", fragment(FragmentKind::Rules));
    put("form_fields", fragment(FragmentKind::FormFields));
    put("table_headers", fragment(FragmentKind::TableHeaders));
    put("table_body", fragment(FragmentKind::TableBody));
    put("show_fields", fragment(FragmentKind::ShowFields));
    if searchable {
        put("search_logic", fragment(FragmentKind::SearchPredicate));
        put("search_input", fragment(FragmentKind::SearchInput));
    } else {
        put("search_logic", String::new());
        put("search_input", String::new());
    }

    if request.soft_deletes {
        put("soft_deletes_import", "use Illuminate\\Database\\Eloquent\\SoftDeletes;".to_string());
        put("soft_deletes_trait", ", SoftDeletes".to_string());
        put("soft_deletes", "$table->softDeletes();".to_string());
    } else {
        put("soft_deletes_import", String::new());
        put("soft_deletes_trait", String::new());
        put("soft_deletes", String::new());
    }

    map
}

/// Migration path for `table`: the existing `*_create_{table}_table.php` if one is
/// present, otherwise a new file stamped with the current local time.
pub fn migration_path(migrations_dir: &Path, table: &str) -> PathBuf {
    let suffix = format!("_create_{table}_table.php");
    if let Some(existing) = find_by_suffix(migrations_dir, &suffix) {
        tracing::debug!(path = %existing.display(), "found existing migration");
        return existing;
    }
    let stamp = chrono::Local::now().format("%Y_%m_%d_%H%M%S");
    migrations_dir.join(format!("{stamp}{suffix}"))
}

struct Emitter<'a> {
    root: &'a Path,
    stub_dir: PathBuf,
    mode: WriteMode,
}

impl Emitter<'_> {
    /// Emit `kind` with its default stub to `relative` under the project root
    fn emit(&self, kind: ArtifactKind, relative: &Path, fragments: &FragmentMap) -> ArtifactReport {
        self.emit_absolute(kind, &self.root.join(relative), fragments)
    }

    fn emit_absolute(&self, kind: ArtifactKind, path: &Path, fragments: &FragmentMap) -> ArtifactReport {
        match kind.stub_name() {
            Some(stub) => self.emit_stub(kind, stub, path, fragments),
            None => ArtifactReport {
                kind,
                path: path.to_path_buf(),
                status: ArtifactStatus::Failed(format!("{kind:?} has no stub")),
            },
        }
    }

    fn emit_stub(&self, kind: ArtifactKind, stub: &str, path: &Path, fragments: &FragmentMap) -> ArtifactReport {
        let status = if path.exists() && !self.mode.force {
            tracing::warn!(path = %path.display(), "file already exists, skipping (use --force to overwrite)");
            ArtifactStatus::Skipped
        } else {
            load_stub(stub, Some(&self.stub_dir))
                .and_then(|template| render(stub, &template, fragments))
                .and_then(|contents| write_artifact(path, &contents, self.mode))
                .unwrap_or_else(|e| {
                    tracing::error!(?kind, path = %path.display(), error = %e, "artifact failed");
                    ArtifactStatus::Failed(e.to_string())
                })
        };
        ArtifactReport {
            kind,
            path: path.to_path_buf(),
            status,
        }
    }
}

fn register_route(plan: &NamingPlan, request: &GenerateRequest, config: &ProjectConfig) -> ArtifactReport {
    let (style, kind) = if request.api {
        (RouteStyle::Api, ArtifactKind::ApiRoute)
    } else {
        (RouteStyle::Web, ArtifactKind::WebRoute)
    };
    let controller = format!(
        "{}\\{}",
        plan.qualify_namespace(&config.namespaces.controllers),
        plan.controller_class()
    );
    let line = route_line(style, &plan.route_base, &controller);
    let path = request.root.join(&config.paths.routes).join(style.file_name());
    let mut file = FsRouteFile::new(&path);

    let outcome = if request.dry_run {
        is_registered(&file, &line).map(|present| {
            if present {
                ArtifactStatus::Skipped
            } else {
                ArtifactStatus::Planned
            }
        })
    } else {
        register(&mut file, &line).map(|outcome| match outcome {
            RouteOutcome::Added => ArtifactStatus::Written,
            RouteOutcome::AlreadyPresent => ArtifactStatus::Skipped,
        })
    };
    let status = outcome.unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "route registration failed");
        ArtifactStatus::Failed(e.to_string())
    });

    ArtifactReport { kind, path, status }
}
