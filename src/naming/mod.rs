//! # Naming Module
//!
//! The convention resolver: every identifier a generated scaffold uses is derived
//! here, from one hierarchical resource name.
//!
//! ## Forward resolution
//!
//! ```text
//! "Admin/Post" ──► entity_name        Post
//!                  namespace_segments ["Admin"]
//!                  table_name         posts
//!                  view_path          admin.posts
//!                  route_base         admin.posts
//! ```
//!
//! `view_path` and `route_base` are built by the same function and are always equal.
//!
//! ## Reverse resolution
//!
//! [`resolve_from_class_name`] recovers the dotted prefix (`admin`) from a controller's
//! fully-qualified class name such as `App\Http\Controllers\Admin\PostController`.
//! It converts segments with the same [`snake`] helper the forward resolver uses, so
//! both directions agree for every resource the generator can emit.
//!
//! ## Case conversion
//!
//! Case conversion goes through `heck`; pluralization goes through an [`Inflector`]
//! ([`EnglishInflector`] by default).

mod inflector;
mod plan;
mod prefix;

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

pub use inflector::{EnglishInflector, Inflector};
pub use plan::NamingPlan;
pub use prefix::{resolve_from_class_name, CONTROLLER_MARKER};

/// Capitalized-words form: `blog_post` → `BlogPost`
pub fn studly(s: &str) -> String {
    s.to_pascal_case()
}

/// snake_case form: `BlogPost` → `blog_post`
pub fn snake(s: &str) -> String {
    s.to_snake_case()
}

/// camelCase form: `BlogPost` → `blogPost`
pub fn camel(s: &str) -> String {
    s.to_lower_camel_case()
}

/// Human label for a field name: `first_name` → `First Name`
pub fn title_label(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plural snake_case form of an entity, shared by table names and view/route bases.
pub(crate) fn plural_snake(entity: &str, inflector: &dyn Inflector) -> String {
    inflector.pluralize(&snake(entity))
}

/// Dot-join snake_cased segments, dropping empty ones.
pub(crate) fn dotted_prefix<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| snake(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}
