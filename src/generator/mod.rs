//! # Generator Module
//!
//! Turns a resource name and a field DSL into a Laravel CRUD scaffold.
//!
//! ## Pipeline
//!
//! ```text
//! "Admin/Post" ──► NamingPlan ─┐
//!                              ├─► fragment map ──► stub ──► artifact file
//! "title:string" ─► fields ────┘                                 │
//!                                                                └─► route line
//! ```
//!
//! 1. **Naming** - [`crate::naming::NamingPlan`] derives every identifier once
//! 2. **Fragments** - [`fragments::compile`] turns fields into schema, rules and markup
//! 3. **Emission** - each stub is filled from the fragment map and written unless it
//!    already exists (`--force` overrides)
//! 4. **Routes** - one `Route::resource` / `Route::apiResource` line is registered
//!
//! ## Generated Structure
//!
//! For `crudgen generate Admin/Post --fields title:string`:
//!
//! ```text
//! app/Models/Post.php
//! database/migrations/2026_01_01_120000_create_posts_table.php
//! app/Http/Requests/Admin/StorePostRequest.php
//! app/Http/Requests/Admin/UpdatePostRequest.php
//! app/Http/Controllers/Admin/PostController.php
//! resources/views/admin/posts/{index,create,edit,show,_form}.blade.php
//! routes/web.php   (Route::resource('admin.posts', ...))
//! ```
//!
//! With `--api` the views are replaced by `app/Http/Resources/Admin/PostResource.php`
//! and the route goes to `routes/api.php`.
//!
//! ## Stubs and Templates
//!
//! Artifact stubs live in `stubs/` and are compiled into the binary; a project can
//! override any of them under `stubs/crud-generator/` (see `crudgen publish-stubs`).
//! Placeholders are `{{ key }}` with a lower snake_case key; a placeholder with no
//! value fails that artifact instead of leaking into the output.
//!
//! Install-time assets (layout, base controllers, `crudgen.toml`) are Askama templates
//! in `templates/`.
//!
//! ## Programmatic Usage
//!
//! ```rust,no_run
//! use crudgen::config::ProjectConfig;
//! use crudgen::generator::{generate, GenerateRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = GenerateRequest::new("Admin/Post", "/path/to/laravel-app")
//!     .with_fields("title:string,body:text:nullable");
//! let report = generate(&request, &ProjectConfig::default())?;
//! assert!(!report.has_failures());
//! # Ok(())
//! # }
//! ```

mod emit;
pub mod fragments;
mod project;
pub mod stubs;

pub use emit::{find_by_suffix, render, write_artifact, ArtifactStatus, FragmentMap, WriteMode};
pub use project::*;
