use serde_json::{json, Value};

use crate::error::CrudError;

use super::{
    handle_file_uploads, ControllerConfig, CrudHooks, FileStore, MemoryFileStore, NoHooks, Page,
    Record, RecordStore, Submission,
};

/// Shapes records for JSON output, the counterpart of a generated API resource
pub trait ResourceTransformer {
    fn transform(&self, record: &Record) -> Value;
}

/// Status code and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn not_found() -> Self {
        Self::new(404, json!({ "message": "Not Found" }))
    }
}

/// Resource controller for JSON endpoints
pub struct ApiController<S, H = NoHooks> {
    pub config: ControllerConfig,
    pub records: S,
    pub hooks: H,
    resource: Option<Box<dyn ResourceTransformer>>,
    files: Box<dyn FileStore>,
}

impl<S: RecordStore> ApiController<S, NoHooks> {
    pub fn new(config: ControllerConfig, store: S) -> Self {
        Self::with_hooks(config, store, NoHooks)
    }
}

impl<S: RecordStore, H: CrudHooks> ApiController<S, H> {
    pub fn with_hooks(config: ControllerConfig, store: S, hooks: H) -> Self {
        Self {
            config,
            records: store,
            hooks,
            resource: None,
            files: Box::new(MemoryFileStore::default()),
        }
    }

    /// Wrap every response record with `resource`
    pub fn with_resource(mut self, resource: Box<dyn ResourceTransformer>) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_file_store(mut self, files: Box<dyn FileStore>) -> Self {
        self.files = files;
        self
    }

    pub fn index(&self, page: usize) -> ApiResponse {
        let page = self.records.latest_page(page, self.config.per_page);
        ApiResponse::new(200, self.page_body(&page))
    }

    pub fn show(&self, id: u64) -> ApiResponse {
        match self.records.find(id) {
            Some(record) => ApiResponse::new(200, self.record_body(&record)),
            None => ApiResponse::not_found(),
        }
    }

    /// # Errors
    ///
    /// Fails only if an uploaded file cannot be stored.
    pub fn store(&mut self, input: impl Into<Submission>) -> Result<ApiResponse, CrudError> {
        let data = handle_file_uploads(input.into(), &self.config.upload_folder, self.files.as_mut())?;
        let data = self.hooks.before_create(data);
        let record = self.records.create(data);
        self.hooks.after_create(&record);
        Ok(ApiResponse::new(201, self.record_body(&record)))
    }

    /// # Errors
    ///
    /// Fails only if an uploaded file cannot be stored.
    pub fn update(&mut self, id: u64, input: impl Into<Submission>) -> Result<ApiResponse, CrudError> {
        let Some(existing) = self.records.find(id) else {
            return Ok(ApiResponse::not_found());
        };
        let data = handle_file_uploads(input.into(), &self.config.upload_folder, self.files.as_mut())?;
        let data = self.hooks.before_update(data, &existing);
        let Some(record) = self.records.update(id, data) else {
            return Ok(ApiResponse::not_found());
        };
        self.hooks.after_update(&record);
        Ok(ApiResponse::new(200, self.record_body(&record)))
    }

    pub fn destroy(&mut self, id: u64) -> ApiResponse {
        if self.records.delete(id) {
            ApiResponse::new(204, Value::Null)
        } else {
            ApiResponse::not_found()
        }
    }

    fn record_body(&self, record: &Record) -> Value {
        match &self.resource {
            Some(resource) => json!({ "data": resource.transform(record) }),
            None => serde_json::to_value(record).unwrap_or(Value::Null),
        }
    }

    fn page_body(&self, page: &Page) -> Value {
        match &self.resource {
            Some(resource) => json!({
                "data": page.records.iter().map(|r| resource.transform(r)).collect::<Vec<_>>(),
                "meta": { "current_page": page.page, "per_page": page.per_page, "total": page.total },
            }),
            None => serde_json::to_value(page).unwrap_or(Value::Null),
        }
    }
}
