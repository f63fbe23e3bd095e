#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::rc::Rc;

use askama::Template;
use serde_json::{json, Value};

use super::*;
use crate::config::ProjectConfig;
use crate::generator::WebSuperControllerTemplate;
use crate::naming::{EnglishInflector, NamingPlan, CONTROLLER_MARKER};

fn attrs(pairs: &[(&str, Value)]) -> Attributes {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

fn posts_config() -> ControllerConfig {
    ControllerConfig::from_plan(&NamingPlan::resolve("Admin/Post").unwrap())
}

#[test]
fn test_config_from_plan() {
    let config = posts_config();
    assert_eq!(config.view("index"), "admin.posts.index");
    assert_eq!(config.route_name("store"), "admin.posts.store");
    assert_eq!(config.redirect_target(), "admin.posts.index");
    assert_eq!(config.per_page, 10);
    assert_eq!(config.upload_folder, "uploads/posts");
}

#[test]
fn test_config_from_class_name_agrees_with_plan() {
    for (raw, fqcn) in [
        ("Admin/Post", "App\\Http\\Controllers\\Admin\\PostController"),
        ("Post", "App\\Http\\Controllers\\PostController"),
        ("Shop/V2/OrderItem", "App\\Http\\Controllers\\Shop\\V2\\OrderItemController"),
        ("Person", "App\\Http\\Controllers\\PersonController"),
    ] {
        let plan = NamingPlan::resolve(raw).unwrap();
        let derived =
            ControllerConfig::from_class_name(fqcn, CONTROLLER_MARKER, &plan.entity_name, &EnglishInflector);
        assert_eq!(derived, ControllerConfig::from_plan(&plan), "{raw}");
    }
}

#[test]
fn test_config_from_class_name_without_marker() {
    let config = ControllerConfig::from_class_name(
        "Vendor\\Admin\\PostController",
        CONTROLLER_MARKER,
        "Post",
        &EnglishInflector,
    );
    assert_eq!(config.view_path, "posts");
}

#[test]
fn test_config_follows_project_page_size() {
    let mut project = ProjectConfig::default();
    project.runtime.per_page = 25;
    let plan = NamingPlan::resolve("Admin/Post").unwrap();

    let config = ControllerConfig::from_plan(&plan).with_runtime(&project.runtime);
    assert_eq!(config.per_page, 25);

    let derived = ControllerConfig::from_class_name(
        "App\\Http\\Controllers\\Admin\\PostController",
        CONTROLLER_MARKER,
        "Post",
        &EnglishInflector,
    )
    .with_runtime(&project.runtime);
    assert_eq!(derived, config);

    let rendered = WebSuperControllerTemplate {
        namespace: project.namespaces.base_controllers.clone(),
        per_page: project.runtime.per_page,
        controller_marker: project.namespaces.controller_marker.replace('\\', "\\\\"),
    }
    .render()
    .unwrap();
    assert!(rendered.contains(&format!("protected int $perPage = {};", config.per_page)));

    let mut controller = WebController::new(config, MemoryStore::new());
    for i in 0..30 {
        controller.store(attrs(&[("n", json!(i))])).unwrap();
    }
    match controller.index(1) {
        WebResponse::View { data, .. } => {
            assert_eq!(data["records"]["records"].as_array().unwrap().len(), 25);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_custom_redirect_route() {
    let config = posts_config().with_redirect_route("dashboard");
    assert_eq!(config.redirect_target(), "dashboard");
    assert_eq!(config.route_name("index"), "admin.posts.index");
}

#[test]
fn test_memory_store_pages_newest_first() {
    let mut store = MemoryStore::new();
    for i in 1..=5 {
        store.create(attrs(&[("n", json!(i))]));
    }
    let first = store.latest_page(1, 2);
    assert_eq!(first.records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5, 4]);
    assert_eq!(first.total, 5);
    let last = store.latest_page(3, 2);
    assert_eq!(last.records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    assert!(store.latest_page(4, 2).records.is_empty());
    assert_eq!(store.latest_page(0, 2).page, 1);
}

#[test]
fn test_web_controller_actions() {
    let mut controller = WebController::new(posts_config(), MemoryStore::new());

    assert_eq!(
        controller.create(),
        WebResponse::View {
            view: "admin.posts.create".into(),
            data: Value::Null
        }
    );

    let created = controller.store(attrs(&[("title", json!("Hello"))])).unwrap();
    assert_eq!(
        created,
        WebResponse::Redirect {
            route: "admin.posts.index".into(),
            flash: "Created successfully!".into()
        }
    );

    match controller.show(1) {
        WebResponse::View { view, data } => {
            assert_eq!(view, "admin.posts.show");
            assert_eq!(data["record"]["title"], "Hello");
            assert_eq!(data["record"]["id"], 1);
        }
        other => panic!("unexpected {other:?}"),
    }

    match controller.index(1) {
        WebResponse::View { view, data } => {
            assert_eq!(view, "admin.posts.index");
            assert_eq!(data["records"]["total"], 1);
        }
        other => panic!("unexpected {other:?}"),
    }

    let updated = controller.update(1, attrs(&[("title", json!("Changed"))])).unwrap();
    assert!(matches!(updated, WebResponse::Redirect { ref flash, .. } if flash == "Updated successfully!"));
    assert_eq!(controller.records.find(1).unwrap().attributes["title"], "Changed");

    assert!(matches!(controller.edit(1), WebResponse::View { ref view, .. } if view == "admin.posts.edit"));
    assert!(matches!(controller.destroy(1), WebResponse::Redirect { .. }));
    assert_eq!(controller.show(1), WebResponse::NotFound);
    assert_eq!(controller.destroy(1), WebResponse::NotFound);
    assert_eq!(controller.update(1, Attributes::new()).unwrap(), WebResponse::NotFound);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Rc<RefCell<Vec<String>>>,
}

impl CrudHooks for RecordingHooks {
    fn before_create(&self, mut data: Attributes) -> Attributes {
        self.events.borrow_mut().push("before_create".into());
        data.insert("slug".into(), json!("generated"));
        data
    }

    fn after_create(&self, record: &Record) {
        self.events.borrow_mut().push(format!("after_create:{}", record.id));
    }

    fn before_update(&self, data: Attributes, existing: &Record) -> Attributes {
        self.events.borrow_mut().push(format!("before_update:{}", existing.id));
        data
    }

    fn after_update(&self, record: &Record) {
        self.events.borrow_mut().push(format!("after_update:{}", record.id));
    }
}

#[test]
fn test_hooks_run_around_writes() {
    let hooks = RecordingHooks::default();
    let events = Rc::clone(&hooks.events);
    let mut controller = WebController::with_hooks(posts_config(), MemoryStore::new(), hooks);

    controller.store(attrs(&[("title", json!("A"))])).unwrap();
    controller.update(1, attrs(&[("title", json!("B"))])).unwrap();

    assert_eq!(
        *events.borrow(),
        vec!["before_create", "after_create:1", "before_update:1", "after_update:1"]
    );
    assert_eq!(controller.records.find(1).unwrap().attributes["slug"], "generated");
}

struct TitleOnly;

impl ResourceTransformer for TitleOnly {
    fn transform(&self, record: &Record) -> Value {
        json!({ "id": record.id, "title": record.attributes.get("title") })
    }
}

#[test]
fn test_api_controller_status_codes() {
    let mut controller = ApiController::new(posts_config(), MemoryStore::new());

    let created = controller.store(attrs(&[("title", json!("Hello")), ("body", json!("x"))])).unwrap();
    assert_eq!(created.status, 201);
    assert_eq!(created.body["title"], "Hello");

    assert_eq!(controller.show(1).status, 200);
    assert_eq!(controller.show(2).status, 404);
    assert_eq!(controller.update(1, attrs(&[("title", json!("New"))])).unwrap().body["title"], "New");
    assert_eq!(controller.index(1).body["total"], 1);

    let deleted = controller.destroy(1);
    assert_eq!(deleted.status, 204);
    assert_eq!(deleted.body, Value::Null);
    assert_eq!(controller.destroy(1).status, 404);
}

#[test]
fn test_api_controller_uses_resource_transformer() {
    let mut controller =
        ApiController::new(posts_config(), MemoryStore::new()).with_resource(Box::new(TitleOnly));
    controller.store(attrs(&[("title", json!("Hello")), ("body", json!("hidden"))])).unwrap();

    let shown = controller.show(1);
    assert_eq!(shown.body, json!({ "data": { "id": 1, "title": "Hello" } }));

    let index = controller.index(1);
    assert_eq!(index.body["data"][0]["title"], "Hello");
    assert_eq!(index.body["meta"]["per_page"], 10);
    assert!(index.body["data"][0].get("body").is_none());
}

#[test]
fn test_file_uploads_replace_validated_keys_only() {
    let mut files = MemoryFileStore::default();
    let submission = Submission::from(attrs(&[("title", json!("T")), ("cover", Value::Null)]))
        .with_file("cover", UploadedFile::new("cover.png", b"png".to_vec()))
        .with_file("stray", UploadedFile::new("stray.txt", b"x".to_vec()));

    let data = handle_file_uploads(submission, "uploads/posts", &mut files).unwrap();

    assert_eq!(data["cover"], "uploads/posts/1-cover.png");
    assert!(!data.contains_key("stray"));
    assert_eq!(files.stored.len(), 1);
    assert_eq!(files.stored["uploads/posts/1-cover.png"], b"png".to_vec());
}

struct FailingFiles;

impl FileStore for FailingFiles {
    fn store(&mut self, _folder: &str, _file: &UploadedFile) -> std::io::Result<String> {
        Err(std::io::Error::other("disk full"))
    }
}

#[test]
fn test_controller_store_with_upload() {
    let mut controller = WebController::new(posts_config(), MemoryStore::new());
    let submission = Submission::from(attrs(&[("cover", Value::Null)]))
        .with_file("cover", UploadedFile::new("a.jpg", b"jpg".to_vec()));
    controller.store(submission).unwrap();
    assert_eq!(controller.records.find(1).unwrap().attributes["cover"], "uploads/posts/1-a.jpg");

    let mut failing = WebController::new(posts_config(), MemoryStore::new()).with_file_store(Box::new(FailingFiles));
    let submission = Submission::from(attrs(&[("cover", Value::Null)]))
        .with_file("cover", UploadedFile::new("a.jpg", b"jpg".to_vec()));
    assert!(failing.store(submission).is_err());
    assert!(failing.records.is_empty());
}
