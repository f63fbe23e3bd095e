#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

const POST_CONTROLLER: &str = "App\\Http\\Controllers\\Admin\\PostController";

#[test]
fn test_route_lines() {
    assert_eq!(
        route_line(RouteStyle::Web, "admin.posts", POST_CONTROLLER),
        "Route::resource('admin.posts', \\App\\Http\\Controllers\\Admin\\PostController::class);"
    );
    assert_eq!(
        route_line(RouteStyle::Api, "posts", "\\App\\Http\\Controllers\\PostController"),
        "Route::apiResource('posts', \\App\\Http\\Controllers\\PostController::class);"
    );
}

#[test]
fn test_register_appends_once() {
    let mut file = MemoryRouteFile::with_contents("<?php\n");
    let line = route_line(RouteStyle::Web, "admin.posts", POST_CONTROLLER);

    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::Added);
    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::AlreadyPresent);

    let contents = file.contents.unwrap();
    assert_eq!(contents.matches(&line).count(), 1);
    assert_eq!(contents, format!("<?php\n\n{line}"));
}

#[test]
fn test_register_creates_missing_file_with_header() {
    let mut file = MemoryRouteFile::default();
    let line = route_line(RouteStyle::Api, "posts", "App\\Http\\Controllers\\PostController");

    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::Added);
    assert_eq!(file.contents.unwrap(), format!("{ROUTE_FILE_HEADER}\n{line}"));
}

#[test]
fn test_presence_is_an_exact_substring_match() {
    let existing = "Route::resource('posts', \\App\\Http\\Controllers\\PostController::class); // keep";
    let mut file = MemoryRouteFile::with_contents(existing);
    let line = route_line(RouteStyle::Web, "posts", "App\\Http\\Controllers\\PostController");
    assert!(is_registered(&file, &line).unwrap());
    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::AlreadyPresent);

    let other = route_line(RouteStyle::Web, "admin.posts", POST_CONTROLLER);
    assert!(!is_registered(&file, &other).unwrap());
}

#[test]
fn test_missing_file_is_not_registered() {
    let file = MemoryRouteFile::default();
    assert!(!is_registered(&file, "anything").unwrap());
}

#[test]
fn test_fs_route_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes").join("web.php");
    let mut file = FsRouteFile::new(&path);
    let line = route_line(RouteStyle::Web, "posts", "App\\Http\\Controllers\\PostController");

    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::Added);
    assert_eq!(register(&mut file, &line).unwrap(), RouteOutcome::AlreadyPresent);

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.starts_with(ROUTE_FILE_HEADER));
    assert!(on_disk.ends_with(&format!("\n{line}")));
    assert_eq!(file.path(), path.as_path());
}
