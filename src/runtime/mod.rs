//! # Runtime Module
//!
//! A Rust model of the base controllers that `crudgen install` publishes. Generated
//! controllers receive their view path and route base explicitly; this module
//! exercises the same contract so the generator and the runtime can be checked
//! against each other.
//!
//! - [`ControllerConfig`] holds the naming a controller needs, built from a
//!   [`NamingPlan`] or, as a fallback, from the controller's class name
//! - [`CrudHooks`] are the before/after extension points (all no-ops by default)
//! - [`RecordStore`] stands in for the ORM
//! - [`WebController`] and [`ApiController`] implement the resource actions

mod api;
mod store;
mod uploads;
mod web;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::RuntimeSettings;
use crate::naming::{plural_snake, resolve_from_class_name, Inflector, NamingPlan};

pub use api::{ApiController, ApiResponse, ResourceTransformer};
pub use store::{MemoryStore, Page, RecordStore};
pub use uploads::{handle_file_uploads, FileStore, MemoryFileStore, Submission, UploadedFile};
pub use web::{WebController, WebResponse};

/// Validated attribute values, keyed by column name
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// A persisted row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// Flash messages shown after each write action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessages {
    pub create: String,
    pub update: String,
    pub delete: String,
}

impl Default for FlashMessages {
    fn default() -> Self {
        Self {
            create: "Created successfully!".to_string(),
            update: "Updated successfully!".to_string(),
            delete: "Deleted successfully!".to_string(),
        }
    }
}

/// Per-controller naming and behaviour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Dotted view directory, e.g. `admin.posts`
    pub view_path: String,
    /// Dotted route name base, e.g. `admin.posts`
    pub route_base: String,
    /// Index page size; [`RuntimeSettings`] default until [`ControllerConfig::with_runtime`]
    pub per_page: usize,
    /// Route to redirect to after writes; defaults to `{route_base}.index`
    pub redirect_route: Option<String>,
    pub messages: FlashMessages,
    /// Folder uploaded files are stored under, e.g. `uploads/posts`
    pub upload_folder: String,
}

impl ControllerConfig {
    /// Configuration matching what the generator wrote for `plan`, with the default
    /// runtime settings
    pub fn from_plan(plan: &NamingPlan) -> Self {
        Self {
            view_path: plan.view_path.clone(),
            route_base: plan.route_base.clone(),
            per_page: RuntimeSettings::default().per_page,
            redirect_route: None,
            messages: FlashMessages::default(),
            upload_folder: format!("uploads/{}", plan.table_name),
        }
    }

    /// Derive the configuration from a controller's class name and its model's basename.
    ///
    /// Used when a controller does not carry explicit naming. For every controller the
    /// generator emits this agrees with [`ControllerConfig::from_plan`].
    pub fn from_class_name(
        fqcn: &str,
        marker: &str,
        model_basename: &str,
        inflector: &dyn Inflector,
    ) -> Self {
        let prefix = resolve_from_class_name(fqcn, marker);
        let plural = plural_snake(model_basename, inflector);
        let base = if prefix.is_empty() {
            plural.clone()
        } else {
            format!("{prefix}.{plural}")
        };
        Self {
            view_path: base.clone(),
            route_base: base,
            per_page: RuntimeSettings::default().per_page,
            redirect_route: None,
            messages: FlashMessages::default(),
            upload_folder: format!("uploads/{plural}"),
        }
    }

    /// Apply the project's `[runtime]` settings, as the published base controllers do
    pub fn with_runtime(self, settings: &RuntimeSettings) -> Self {
        self.with_per_page(settings.per_page)
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_redirect_route(mut self, route: impl Into<String>) -> Self {
        self.redirect_route = Some(route.into());
        self
    }

    /// View name for an action: `admin.posts.index`
    pub fn view(&self, action: &str) -> String {
        format!("{}.{action}", self.view_path)
    }

    /// Route name for an action: `admin.posts.store`
    pub fn route_name(&self, action: &str) -> String {
        format!("{}.{action}", self.route_base)
    }

    /// Where writes redirect to
    pub fn redirect_target(&self) -> String {
        self.redirect_route
            .clone()
            .unwrap_or_else(|| self.route_name("index"))
    }
}

/// Lifecycle extension points around writes
///
/// Every method defaults to a no-op, so a controller only overrides what it needs.
pub trait CrudHooks {
    /// Adjust validated data before a record is created
    fn before_create(&self, data: Attributes) -> Attributes {
        data
    }

    fn after_create(&self, _record: &Record) {}

    /// Adjust validated data before `existing` is updated
    fn before_update(&self, data: Attributes, _existing: &Record) -> Attributes {
        data
    }

    fn after_update(&self, _record: &Record) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CrudHooks for NoHooks {}
