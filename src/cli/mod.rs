//! # CLI Module
//!
//! Command-line front end for the scaffold generator, shipped as the `crudgen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! crudgen generate Admin/Post --fields "title:string,body:text:nullable" --search
//! ```
//!
//! Options:
//! - `--fields <DSL>` - Field list (`name:type:option,...`)
//! - `--force` - Overwrite existing files
//! - `--api` - JSON API controller, resource and `api.php` route instead of pages
//! - `--soft-deletes` - Soft-deleting model and migration
//! - `--search` - Search box and query on the index page
//! - `--only <PARTS>` - Any of model, request, controller, views, routes, all
//! - `--dry-run` - Render without writing
//! - `--json` - Machine-readable report
//!
//! ### `install`
//!
//! Publishes the layout, the two base controllers and a default `crudgen.toml`.
//!
//! ### `publish-stubs`
//!
//! Copies the built-in stubs to the project stubs directory, where they take
//! precedence over the embedded copies.
//!
//! ### `plan`
//!
//! Prints the derived names and compiled fragments without touching the project.
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use crudgen::cli::{execute, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let code = execute(&cli)?;
//! ```

mod commands;


pub use commands::{execute, run_cli, Cli, Commands, OnlyPart};
