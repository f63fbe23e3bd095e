//! # crudgen
//!
//! **crudgen** is a convention-driven CRUD scaffolding generator for Laravel projects.
//! One hierarchical resource name and a compact field DSL go in; a model, a migration,
//! two form requests, a resource controller, Blade views (or an API resource) and a
//! route registration come out.
//!
//! ## Overview
//!
//! Every identifier in a scaffold is derived from the resource name by fixed
//! conventions, so the generated files agree with each other without any extra
//! configuration:
//!
//! | Input         | Table   | Views / routes | Controller                                  |
//! |---------------|---------|----------------|---------------------------------------------|
//! | `Post`        | `posts` | `posts`        | `App\Http\Controllers\PostController`       |
//! | `Admin/Post`  | `posts` | `admin.posts`  | `App\Http\Controllers\Admin\PostController` |
//!
//! ## Architecture
//!
//! - **[`fields`]** - Field DSL parser (`title:string,body:text:nullable`)
//! - **[`naming`]** - Convention resolver: forward [`naming::NamingPlan`] and the reverse
//!   prefix resolver used by generated base controllers
//! - **[`generator`]** - Field-schema compiler, stubs, artifact emission, `install` and
//!   `publish_stubs`
//! - **[`routes`]** - Idempotent route-file registration
//! - **[`runtime`]** - Behavioural model of the generated base controllers
//! - **[`config`]** - `crudgen.toml` project configuration
//! - **[`cli`]** - The `crudgen` command line
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(crudgen)
//!     participant Naming as naming::NamingPlan
//!     participant Fields as fields::parse_fields
//!     participant Fragments as generator::fragments
//!     participant Emit as generator (stubs + emit)
//!     participant Routes as routes::register
//!     participant FS as File System
//!
//!     User->>CLI: crudgen generate Admin/Post --fields title:string
//!     CLI->>Naming: resolve("Admin/Post")
//!     CLI->>Fields: parse("title:string")
//!     CLI->>Fragments: compile(fields, kind)
//!     Fragments-->>Emit: fragment map
//!     Emit->>FS: model, migration, requests, controller, views
//!     Emit->>Routes: Route::resource('admin.posts', ...)
//!     Routes->>FS: append to routes/web.php (once)
//!     Emit-->>CLI: GenerationReport
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Publish the layout, base controllers and crudgen.toml once
//! crudgen install
//!
//! # Scaffold a resource
//! crudgen generate Admin/Post --fields "title:string,body:text:nullable,published:boolean" --search
//!
//! # See what would be derived, without writing anything
//! crudgen plan Admin/Post --fields title
//! ```
//!
//! Existing files are never overwritten unless `--force` is given, and a route line is
//! never added twice, so re-running a generation is safe.

pub mod cli;
pub mod config;
pub mod error;
pub mod fields;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod routes;
pub mod runtime;

pub use config::ProjectConfig;
pub use error::CrudError;
pub use fields::{parse_fields, parse_fields_with, FieldSpec, ParsePolicy};
pub use generator::{generate, GenerateRequest, GenerationReport};
pub use naming::{resolve_from_class_name, NamingPlan};
