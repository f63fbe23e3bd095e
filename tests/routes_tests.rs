#![allow(clippy::unwrap_used, clippy::expect_used)]

use crudgen::routes::{
    is_registered, register, route_line, FsRouteFile, MemoryRouteFile, RouteOutcome, RouteStyle,
    ROUTE_FILE_HEADER,
};
use std::fs;

#[test]
fn test_registration_preserves_hand_written_routes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("web.php");
    let existing = "<?php\n\nuse Illuminate\\Support\\Facades\\Route;\n\nRoute::get('/', fn () => view('welcome'));\n";
    fs::write(&path, existing).unwrap();

    let mut file = FsRouteFile::new(&path);
    let posts = route_line(RouteStyle::Web, "admin.posts", "App\\Http\\Controllers\\Admin\\PostController");
    let tags = route_line(RouteStyle::Web, "tags", "App\\Http\\Controllers\\TagController");

    assert_eq!(register(&mut file, &posts).unwrap(), RouteOutcome::Added);
    assert_eq!(register(&mut file, &tags).unwrap(), RouteOutcome::Added);
    assert_eq!(register(&mut file, &posts).unwrap(), RouteOutcome::AlreadyPresent);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with(existing));
    assert_eq!(contents.matches(&posts).count(), 1);
    assert!(contents.find(&posts).unwrap() < contents.find(&tags).unwrap());
}

#[test]
fn test_api_route_file_created_with_header() {
    let mut file = MemoryRouteFile::default();
    let line = route_line(RouteStyle::Api, "posts", "App\\Http\\Controllers\\PostController");
    assert!(!is_registered(&file, &line).unwrap());

    register(&mut file, &line).unwrap();
    let contents = file.contents.unwrap();
    assert!(contents.starts_with(ROUTE_FILE_HEADER));
    assert!(contents.contains("Route::apiResource('posts', \\App\\Http\\Controllers\\PostController::class);"));
    assert_eq!(RouteStyle::Api.file_name(), "api.php");
}
