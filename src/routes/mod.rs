//! # Route Registrar
//!
//! Appends one resource route line per generated controller to the project's route
//! files. Registration is idempotent: a line already present anywhere in the file, as
//! an exact substring, is not appended again.
//!
//! ```text
//! routes/web.php  Route::resource('admin.posts', \App\Http\Controllers\Admin\PostController::class);
//! routes/api.php  Route::apiResource('posts', \App\Http\Controllers\PostController::class);
//! ```
//!
//! File access goes through [`RouteFile`] so the append logic can run against an
//! in-memory buffer in tests.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CrudError;

#[cfg(test)]
mod tests;

/// Contents written to a route file that does not exist yet
pub const ROUTE_FILE_HEADER: &str = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n\n";

/// Which route file and helper a resource is registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStyle {
    /// `Route::resource` in `web.php`
    Web,
    /// `Route::apiResource` in `api.php`
    Api,
}

impl RouteStyle {
    /// Route file name inside the routes directory
    pub fn file_name(self) -> &'static str {
        match self {
            RouteStyle::Web => "web.php",
            RouteStyle::Api => "api.php",
        }
    }

    fn helper(self) -> &'static str {
        match self {
            RouteStyle::Web => "resource",
            RouteStyle::Api => "apiResource",
        }
    }
}

/// Build the route line for a resource
///
/// `controller_fqcn` is the controller's namespace-qualified class name without a
/// leading backslash; the line always references it from the global namespace.
pub fn route_line(style: RouteStyle, route_base: &str, controller_fqcn: &str) -> String {
    format!(
        "Route::{}('{}', \\{}::class);",
        style.helper(),
        route_base,
        controller_fqcn.trim_start_matches('\\')
    )
}

/// Minimal access to one route file
pub trait RouteFile {
    /// Whether the file exists
    fn exists(&self) -> bool;
    /// Full current contents
    fn read_all(&self) -> Result<String, CrudError>;
    /// Create the file with `contents`
    fn create(&mut self, contents: &str) -> Result<(), CrudError>;
    /// Append `"\n" + line`
    fn append_line(&mut self, line: &str) -> Result<(), CrudError>;
}

/// Result of [`register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    /// The line was appended
    Added,
    /// The line was already in the file
    AlreadyPresent,
}

/// Whether `line` is already registered in `file`
///
/// # Errors
///
/// Propagates read failures.
pub fn is_registered(file: &dyn RouteFile, line: &str) -> Result<bool, CrudError> {
    if !file.exists() {
        return Ok(false);
    }
    Ok(file.read_all()?.contains(line))
}

/// Register `line` in `file`, creating the file with [`ROUTE_FILE_HEADER`] if needed.
///
/// # Errors
///
/// Propagates create, read and append failures.
pub fn register(file: &mut dyn RouteFile, line: &str) -> Result<RouteOutcome, CrudError> {
    if !file.exists() {
        tracing::info!("route file missing, creating it");
        file.create(ROUTE_FILE_HEADER)?;
    }
    if is_registered(file, line)? {
        tracing::warn!(route = line, "route already registered");
        return Ok(RouteOutcome::AlreadyPresent);
    }
    file.append_line(line)?;
    tracing::info!(route = line, "route registered");
    Ok(RouteOutcome::Added)
}

/// A route file on disk
#[derive(Debug, Clone)]
pub struct FsRouteFile {
    path: PathBuf,
}

impl FsRouteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RouteFile for FsRouteFile {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read_all(&self) -> Result<String, CrudError> {
        fs::read_to_string(&self.path).map_err(|e| CrudError::io("read", &self.path, e))
    }

    fn create(&mut self, contents: &str) -> Result<(), CrudError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| CrudError::io("create directory", parent, e))?;
        }
        fs::write(&self.path, contents).map_err(|e| CrudError::io("write", &self.path, e))
    }

    fn append_line(&mut self, line: &str) -> Result<(), CrudError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| CrudError::io("open", &self.path, e))?;
        write!(file, "\n{line}").map_err(|e| CrudError::io("append to", &self.path, e))
    }
}

/// An in-memory route file; `None` means the file does not exist
#[derive(Debug, Clone, Default)]
pub struct MemoryRouteFile {
    pub contents: Option<String>,
}

impl MemoryRouteFile {
    /// A route file that already holds `contents`
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }
}

impl RouteFile for MemoryRouteFile {
    fn exists(&self) -> bool {
        self.contents.is_some()
    }

    fn read_all(&self) -> Result<String, CrudError> {
        self.contents.clone().ok_or_else(|| {
            CrudError::io(
                "read",
                "<memory>",
                std::io::Error::new(std::io::ErrorKind::NotFound, "route file does not exist"),
            )
        })
    }

    fn create(&mut self, contents: &str) -> Result<(), CrudError> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn append_line(&mut self, line: &str) -> Result<(), CrudError> {
        let buffer = self.contents.get_or_insert_with(String::new);
        buffer.push('\n');
        buffer.push_str(line);
        Ok(())
    }
}
