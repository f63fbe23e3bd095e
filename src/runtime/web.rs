use serde_json::{json, Value};

use crate::error::CrudError;

use super::{
    handle_file_uploads, ControllerConfig, CrudHooks, FileStore, MemoryFileStore, NoHooks,
    RecordStore, Submission,
};

/// What a page action asks the framework to do
#[derive(Debug, Clone, PartialEq)]
pub enum WebResponse {
    /// Render `view` with `data`
    View { view: String, data: Value },
    /// Redirect to a named route with a success flash
    Redirect { route: String, flash: String },
    NotFound,
}

/// Resource controller for Blade pages
pub struct WebController<S, H = NoHooks> {
    pub config: ControllerConfig,
    pub records: S,
    pub hooks: H,
    files: Box<dyn FileStore>,
}

impl<S: RecordStore> WebController<S, NoHooks> {
    pub fn new(config: ControllerConfig, store: S) -> Self {
        Self::with_hooks(config, store, NoHooks)
    }
}

impl<S: RecordStore, H: CrudHooks> WebController<S, H> {
    pub fn with_hooks(config: ControllerConfig, store: S, hooks: H) -> Self {
        Self {
            config,
            records: store,
            hooks,
            files: Box::new(MemoryFileStore::default()),
        }
    }

    /// Replace the upload backend
    pub fn with_file_store(mut self, files: Box<dyn FileStore>) -> Self {
        self.files = files;
        self
    }

    pub fn index(&self, page: usize) -> WebResponse {
        let records = self.records.latest_page(page, self.config.per_page);
        self.render("index", json!({ "records": records }))
    }

    pub fn create(&self) -> WebResponse {
        self.render("create", Value::Null)
    }

    pub fn show(&self, id: u64) -> WebResponse {
        match self.records.find(id) {
            Some(record) => self.render("show", json!({ "record": record })),
            None => WebResponse::NotFound,
        }
    }

    pub fn edit(&self, id: u64) -> WebResponse {
        match self.records.find(id) {
            Some(record) => self.render("edit", json!({ "record": record })),
            None => WebResponse::NotFound,
        }
    }

    /// # Errors
    ///
    /// Fails only if an uploaded file cannot be stored.
    pub fn store(&mut self, input: impl Into<Submission>) -> Result<WebResponse, CrudError> {
        let data = handle_file_uploads(input.into(), &self.config.upload_folder, self.files.as_mut())?;
        let data = self.hooks.before_create(data);
        let record = self.records.create(data);
        self.hooks.after_create(&record);
        Ok(self.redirect(self.config.messages.create.clone()))
    }

    /// # Errors
    ///
    /// Fails only if an uploaded file cannot be stored.
    pub fn update(&mut self, id: u64, input: impl Into<Submission>) -> Result<WebResponse, CrudError> {
        let Some(existing) = self.records.find(id) else {
            return Ok(WebResponse::NotFound);
        };
        let data = handle_file_uploads(input.into(), &self.config.upload_folder, self.files.as_mut())?;
        let data = self.hooks.before_update(data, &existing);
        let Some(record) = self.records.update(id, data) else {
            return Ok(WebResponse::NotFound);
        };
        self.hooks.after_update(&record);
        Ok(self.redirect(self.config.messages.update.clone()))
    }

    pub fn destroy(&mut self, id: u64) -> WebResponse {
        if self.records.delete(id) {
            self.redirect(self.config.messages.delete.clone())
        } else {
            WebResponse::NotFound
        }
    }

    fn render(&self, action: &str, data: Value) -> WebResponse {
        WebResponse::View {
            view: self.config.view(action),
            data,
        }
    }

    fn redirect(&self, flash: String) -> WebResponse {
        WebResponse::Redirect {
            route: self.config.redirect_target(),
            flash,
        }
    }
}
