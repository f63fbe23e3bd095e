use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::{camel, dotted_prefix, plural_snake, studly, EnglishInflector, Inflector};
use crate::error::CrudError;

static SEGMENT_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[/\\]+").expect("separator regex should be valid"));

/// Every name derived from one resource name
///
/// Built once per generation run by [`NamingPlan::resolve`]; every artifact reads its
/// identifiers from here so that they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamingPlan {
    /// Capitalized-words entity name, e.g. `Post`
    pub entity_name: String,
    /// Capitalized-words namespace components before the entity, e.g. `["Admin"]`
    pub namespace_segments: Vec<String>,
    /// Plural snake_case table, e.g. `posts`
    pub table_name: String,
    /// Dotted view directory, e.g. `admin.posts`
    pub view_path: String,
    /// Dotted route name base, e.g. `admin.posts`
    pub route_base: String,
}

impl NamingPlan {
    /// Resolve a raw resource name with the default English inflector.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::EmptyResourceName`] when nothing is left after trimming
    /// separators.
    pub fn resolve(raw_name: &str) -> Result<Self, CrudError> {
        Self::resolve_with(raw_name, &EnglishInflector)
    }

    /// Resolve a raw resource name with a caller-supplied inflector.
    ///
    /// # Errors
    ///
    /// Returns [`CrudError::EmptyResourceName`] when nothing is left after trimming
    /// separators.
    pub fn resolve_with(raw_name: &str, inflector: &dyn Inflector) -> Result<Self, CrudError> {
        let trimmed = raw_name.trim().trim_matches(|c| c == '/' || c == '\\');
        let mut segments: Vec<String> = SEGMENT_SEPARATORS
            .split(trimmed)
            .map(studly)
            .filter(|s| !s.is_empty())
            .collect();
        let entity_name = segments.pop().ok_or(CrudError::EmptyResourceName)?;

        let singular = inflector.singularize(&entity_name);
        if singular != entity_name {
            tracing::warn!(
                entity = %entity_name,
                suggestion = %singular,
                "resource names are conventionally singular"
            );
        }

        let plural = plural_snake(&entity_name, inflector);
        let view_path = join_dotted(&dotted_prefix(&segments), &plural);

        Ok(NamingPlan {
            table_name: plural,
            route_base: view_path.clone(),
            view_path,
            entity_name,
            namespace_segments: segments,
        })
    }

    /// Namespace components joined with `sep` (`Admin\V1` for `\\`), empty at the root
    pub fn namespace_joined(&self, sep: &str) -> String {
        self.namespace_segments.join(sep)
    }

    /// Snake-cased dotted prefix (`admin.v1`), the part of `view_path` before the entity
    pub fn prefix_dot(&self) -> String {
        dotted_prefix(&self.namespace_segments)
    }

    /// `PostController`
    pub fn controller_class(&self) -> String {
        format!("{}Controller", self.entity_name)
    }

    /// `StorePostRequest`
    pub fn store_request_class(&self) -> String {
        format!("Store{}Request", self.entity_name)
    }

    /// `UpdatePostRequest`
    pub fn update_request_class(&self) -> String {
        format!("Update{}Request", self.entity_name)
    }

    /// `PostResource`
    pub fn resource_class(&self) -> String {
        format!("{}Resource", self.entity_name)
    }

    /// `blogPost`
    pub fn model_variable(&self) -> String {
        camel(&self.entity_name)
    }

    /// `blogPosts`, built from the same plural as the table name
    pub fn model_variable_plural(&self) -> String {
        camel(&self.table_name)
    }

    /// Append namespace components to a base namespace: `App\Http\Controllers\Admin`
    pub fn qualify_namespace(&self, base: &str) -> String {
        if self.namespace_segments.is_empty() {
            base.to_string()
        } else {
            format!("{base}\\{}", self.namespace_joined("\\"))
        }
    }

    /// Append namespace components to a base directory: `app/Http/Controllers/Admin`
    pub fn qualify_dir(&self, base: &str) -> String {
        if self.namespace_segments.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{}", self.namespace_joined("/"))
        }
    }

    /// View directory relative to the views root: `admin/posts`
    pub fn view_dir(&self) -> String {
        self.view_path.replace('.', "/")
    }
}

fn join_dotted(prefix: &str, name: &str) -> String {
    format!("{prefix}.{name}").trim_matches('.').to_string()
}
