//! Error types shared by the parser, resolver and emitter.
//!
//! Plumbing code (file I/O orchestration, CLI) works with `anyhow::Result` and adds
//! context at each step; the variants here are the failures callers are expected to
//! match on.

use std::path::PathBuf;

use crate::fields::FieldParseError;

/// Domain errors raised while planning or emitting a CRUD scaffold
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// The resource name was empty once path separators were trimmed
    #[error("resource name is empty; expected something like `Post` or `Admin/Post`")]
    EmptyResourceName,

    /// A field clause was rejected under the strict parse policy
    #[error(transparent)]
    FieldParse(#[from] FieldParseError),

    /// A stub still contained placeholders after substitution
    #[error("stub `{stub}` left unresolved placeholder(s): {}", .names.join(", "))]
    UnresolvedPlaceholder {
        /// Stub file name
        stub: String,
        /// Placeholder keys that had no fragment
        names: Vec<String>,
    },

    /// Filesystem failure for a specific path
    #[error("{action} {path}: {source}")]
    Io {
        /// What was being attempted ("write", "create directory", ...)
        action: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The project configuration file could not be parsed
    #[error("invalid configuration in {path}: {message}")]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// An install-time template failed to render
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl CrudError {
    /// Wrap an I/O error with the action and path that produced it
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrudError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
