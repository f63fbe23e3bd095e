use crate::config::ProjectConfig;
use crate::fields::{parse_fields_with, ParsePolicy};
use crate::generator::fragments::{compile, FragmentContext, FragmentKind};
use crate::generator::{
    generate, install, publish_stubs, ArtifactReport, ArtifactStatus, GenerateRequest,
    GenerationScope,
};
use crate::logging::{init_logging_with_config, LogConfig};
use crate::naming::NamingPlan;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command-line interface for crudgen
///
/// Scaffolds CRUD resources into a Laravel project from a resource name and a
/// field DSL.
#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Convention-driven CRUD scaffolding", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level (overrides CRUDGEN_LOG_LEVEL)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate model, migration, requests, controller, views and route for a resource
    Generate {
        /// Resource name, optionally nested (e.g. `Post` or `Admin/Post`)
        name: String,

        /// Field DSL: `name:type:option,...` (e.g. `title:string,body:text:nullable`)
        #[arg(long)]
        fields: Option<String>,

        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Generate a JSON API controller, resource and api.php route instead of pages
        #[arg(long, default_value_t = false)]
        api: bool,

        /// Add soft deletes to the model and migration
        #[arg(long, default_value_t = false)]
        soft_deletes: bool,

        /// Add a search box and query over textual fields (page mode only)
        #[arg(long, default_value_t = false)]
        search: bool,

        /// Limit generation to specific parts (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyPart>>,

        /// Render everything but write nothing
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Reject field clauses with an empty name instead of dropping them
        #[arg(long, default_value_t = false)]
        strict_fields: bool,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Project root (default: current directory)
        #[arg(long, env = "CRUDGEN_ROOT")]
        root: Option<PathBuf>,

        /// Path to crudgen.toml
        /// If not provided, will auto-detect in the project root
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Publish the layout, base controllers and a default crudgen.toml
    Install {
        /// Overwrite existing files
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Project root (default: current directory)
        #[arg(long, env = "CRUDGEN_ROOT")]
        root: Option<PathBuf>,

        /// Path to crudgen.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Copy the built-in stubs into the project for customization
    PublishStubs {
        /// Overwrite previously published stubs
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Project root (default: current directory)
        #[arg(long, env = "CRUDGEN_ROOT")]
        root: Option<PathBuf>,

        /// Path to crudgen.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the naming plan and compiled fragments as JSON without writing anything
    Plan {
        /// Resource name, optionally nested
        name: String,

        /// Field DSL
        #[arg(long)]
        fields: Option<String>,
    },
}

/// Parts of a scaffold that can be generated selectively
///
/// Used with the `--only` flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyPart {
    /// Model and migration
    Model,
    /// Store and update form requests
    Request,
    /// Controller (and API resource in API mode)
    Controller,
    /// Blade views
    Views,
    /// Route registration
    Routes,
    /// Everything
    All,
}

/// Parse arguments, set up logging and execute the command
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the resource name or
/// field list is rejected. Per-artifact failures are reported and turned into a
/// non-zero exit code instead.
pub fn run_cli() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config = log_config.verbose();
    }
    init_logging_with_config(&log_config)?;
    execute(&cli)
}

/// Execute an already parsed command line
///
/// # Errors
///
/// See [`run_cli`].
pub fn execute(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Generate {
            name,
            fields,
            force,
            api,
            soft_deletes,
            search,
            only,
            dry_run,
            strict_fields,
            json,
            root,
            config,
        } => {
            let root = resolve_root(root.as_deref())?;
            let project_config = ProjectConfig::load(config.as_deref(), &root)?;
            let request = GenerateRequest {
                name: name.clone(),
                fields: fields.clone(),
                root,
                force: *force,
                api: *api,
                soft_deletes: *soft_deletes,
                search: *search,
                scope: map_only_to_scope(only.as_deref()),
                dry_run: *dry_run,
                strict_fields: *strict_fields,
            };
            let report = generate(&request, &project_config)
                .with_context(|| format!("Failed to generate scaffold for '{name}'"))?;

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                );
            } else {
                println!(
                    "🔧 {} ({})",
                    report.plan.entity_name,
                    if *api { "api" } else { "web" }
                );
                print_artifacts(&report.artifacts, &request.root);
            }
            Ok(exit_code(report.has_failures()))
        }
        Commands::Install {
            force,
            root,
            config,
        } => {
            let root = resolve_root(root.as_deref())?;
            let project_config = ProjectConfig::load(config.as_deref(), &root)?;
            let artifacts = install(&root, &project_config, *force);
            print_artifacts(&artifacts, &root);
            Ok(exit_code(artifacts.iter().any(|a| a.status.is_failure())))
        }
        Commands::PublishStubs {
            force,
            root,
            config,
        } => {
            let root = resolve_root(root.as_deref())?;
            let project_config = ProjectConfig::load(config.as_deref(), &root)?;
            let artifacts = publish_stubs(&root, &project_config, *force);
            print_artifacts(&artifacts, &root);
            Ok(exit_code(artifacts.iter().any(|a| a.status.is_failure())))
        }
        Commands::Plan { name, fields } => {
            let plan = NamingPlan::resolve(name)?;
            let fields = parse_fields_with(fields.as_deref(), ParsePolicy::Lenient)?;
            let ctx = FragmentContext::new(plan.route_base.clone());
            let fragments: BTreeMap<_, _> = FragmentKind::ALL
                .iter()
                .map(|kind| {
                    let key = serde_json::to_value(kind)
                        .ok()
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_else(|| format!("{kind:?}"));
                    (key, compile(&fields, *kind, &ctx))
                })
                .collect();
            let out = json!({
                "plan": plan,
                "controller_class": plan.controller_class(),
                "fields": fields,
                "fragments": fragments,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).context("Failed to serialize plan")?
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn resolve_root(root: Option<&Path>) -> anyhow::Result<PathBuf> {
    match root {
        Some(root) => Ok(root.to_path_buf()),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_artifacts(artifacts: &[ArtifactReport], root: &Path) {
    for artifact in artifacts {
        let path = artifact.path.strip_prefix(root).unwrap_or(&artifact.path);
        println!("{} {}", status_line(&artifact.status), path.display());
    }
}

fn status_line(status: &ArtifactStatus) -> String {
    match status {
        ArtifactStatus::Written => "✅ Created".to_string(),
        ArtifactStatus::Overwritten => "♻️  Overwritten".to_string(),
        ArtifactStatus::Skipped => "⚠️  Skipped (exists)".to_string(),
        ArtifactStatus::Planned => "📝 Would write".to_string(),
        ArtifactStatus::Failed(reason) => format!("❌ Failed ({reason})"),
    }
}

/// Convert CLI `--only` parts to a `GenerationScope` configuration
///
/// If `only` is `None` or contains `all`, every part is enabled. Otherwise only the
/// listed parts are.
pub(crate) fn map_only_to_scope(only: Option<&[OnlyPart]>) -> GenerationScope {
    let Some(parts) = only else {
        return GenerationScope::all();
    };
    // Start with nothing, then enable selected parts
    let mut scope = GenerationScope::none();
    for p in parts {
        match p {
            OnlyPart::Model => scope.model = true,
            OnlyPart::Request => scope.request = true,
            OnlyPart::Controller => scope.controller = true,
            OnlyPart::Views => scope.views = true,
            OnlyPart::Routes => scope.routes = true,
            OnlyPart::All => return GenerationScope::all(),
        }
    }
    scope
}
