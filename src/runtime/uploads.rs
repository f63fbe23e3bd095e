use std::collections::BTreeMap;

use crate::error::CrudError;

use super::Attributes;

/// A file received with a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub original_name: String,
    pub contents: Vec<u8>,
}

impl UploadedFile {
    pub fn new(original_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            original_name: original_name.into(),
            contents: contents.into(),
        }
    }
}

/// Validated data plus any uploaded files, keyed by input name
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub data: Attributes,
    pub files: BTreeMap<String, UploadedFile>,
}

impl Submission {
    pub fn with_file(mut self, key: impl Into<String>, file: UploadedFile) -> Self {
        self.files.insert(key.into(), file);
        self
    }
}

impl From<Attributes> for Submission {
    fn from(data: Attributes) -> Self {
        Self {
            data,
            files: BTreeMap::new(),
        }
    }
}

/// Storage backend for uploaded files
pub trait FileStore {
    /// Persist `file` under `folder` and return the stored path
    fn store(&mut self, folder: &str, file: &UploadedFile) -> std::io::Result<String>;
}

/// Store each upload whose key is present in the validated data, replacing the value
/// with the stored path.
///
/// Files for keys the validator did not keep are ignored.
///
/// # Errors
///
/// Returns [`CrudError::Io`] if the file store fails.
pub fn handle_file_uploads(
    submission: Submission,
    folder: &str,
    store: &mut dyn FileStore,
) -> Result<Attributes, CrudError> {
    let Submission { mut data, files } = submission;
    for (key, file) in &files {
        if !data.contains_key(key) {
            tracing::debug!(key = %key, "ignoring upload without a validated field");
            continue;
        }
        let path = store
            .store(folder, file)
            .map_err(|e| CrudError::io("store upload", folder, e))?;
        data.insert(key.clone(), serde_json::Value::String(path));
    }
    Ok(data)
}

/// Keeps uploads in memory, naming them `{folder}/{n}-{original_name}`
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    pub stored: BTreeMap<String, Vec<u8>>,
}

impl FileStore for MemoryFileStore {
    fn store(&mut self, folder: &str, file: &UploadedFile) -> std::io::Result<String> {
        let path = format!("{folder}/{}-{}", self.stored.len() + 1, file.original_name);
        self.stored.insert(path.clone(), file.contents.clone());
        Ok(path)
    }
}
