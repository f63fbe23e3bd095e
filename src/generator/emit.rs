//! Placeholder substitution and artifact writes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::error::CrudError;

/// `{{ key }}` or `{{key}}` where key is a lower snake_case identifier.
///
/// Blade output such as `{{ $record->title }}` or `{{ route('x') }}` does not match.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([a-z][a-z0-9_]*)\s*\}\}").expect("placeholder regex should be valid")
});

/// Placeholder key → substituted text
pub type FragmentMap = BTreeMap<String, String>;

/// Outcome of emitting one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactStatus {
    /// Created a file that did not exist
    Written,
    /// Replaced an existing file (`--force`)
    Overwritten,
    /// Left an existing file or route untouched
    Skipped,
    /// Rendered but not written (`--dry-run`)
    Planned,
    /// Rendering or writing failed; other artifacts were still attempted
    Failed(String),
}

impl ArtifactStatus {
    /// Whether this outcome should make the run exit non-zero
    pub fn is_failure(&self) -> bool {
        matches!(self, ArtifactStatus::Failed(_))
    }
}

/// Substitute every placeholder in `template` from `fragments`.
///
/// Values are inserted verbatim and are not scanned again, so fragments may contain
/// Blade braces.
///
/// # Errors
///
/// Returns [`CrudError::UnresolvedPlaceholder`] listing each key that had no fragment.
pub fn render(stub_name: &str, template: &str, fragments: &FragmentMap) -> Result<String, CrudError> {
    let mut missing: Vec<String> = Vec::new();
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let key = &caps[1];
        match fragments.get(key) {
            Some(value) => value.clone(),
            None => {
                if !missing.iter().any(|m| m == key) {
                    missing.push(key.to_string());
                }
                caps[0].to_string()
            }
        }
    });
    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(CrudError::UnresolvedPlaceholder {
            stub: stub_name.to_string(),
            names: missing,
        })
    }
}

/// How [`write_artifact`] treats existing files
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteMode {
    /// Replace existing files
    pub force: bool,
    /// Report what would happen without touching the filesystem
    pub dry_run: bool,
}

/// Write `contents` to `path`, honouring skip-if-exists and dry runs.
///
/// Parent directories are created as needed.
///
/// # Errors
///
/// Returns [`CrudError::Io`] when the directory or file cannot be written.
pub fn write_artifact(path: &Path, contents: &str, mode: WriteMode) -> Result<ArtifactStatus, CrudError> {
    let exists = path.exists();
    if exists && !mode.force {
        tracing::warn!(path = %path.display(), "file already exists, skipping (use --force to overwrite)");
        return Ok(ArtifactStatus::Skipped);
    }
    if mode.dry_run {
        tracing::debug!(path = %path.display(), bytes = contents.len(), "dry run, not writing");
        return Ok(ArtifactStatus::Planned);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CrudError::io("create directory", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| CrudError::io("write", path, e))?;
    tracing::info!(path = %path.display(), overwritten = exists, "wrote artifact");
    Ok(if exists {
        ArtifactStatus::Overwritten
    } else {
        ArtifactStatus::Written
    })
}

/// Find an existing file in `dir` whose name ends with `suffix`.
///
/// Used for timestamped migrations, whose full name changes on every run.
pub fn find_by_suffix(dir: &Path, suffix: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}
