use super::dotted_prefix;

/// Marker that identifies the controllers root inside a fully-qualified class name
pub const CONTROLLER_MARKER: &str = "Http\\Controllers\\";

/// Recover the dotted view/route prefix from a controller's fully-qualified name.
///
/// ```text
/// App\Http\Controllers\Admin\V1\PostController => "admin.v1"
/// App\Http\Controllers\PostController          => ""
/// Vendor\Other\PostController                  => ""   (marker absent)
/// ```
///
/// Segments may be separated by `\` or `/`. The last segment (the controller class)
/// is dropped and the rest are snake_cased with the helper the forward resolver uses.
pub fn resolve_from_class_name(fqcn: &str, marker: &str) -> String {
    if marker.is_empty() {
        return String::new();
    }
    let Some(pos) = fqcn.find(marker) else {
        return String::new();
    };
    let after = &fqcn[pos + marker.len()..];
    let mut segments: Vec<&str> = after
        .split(|c| c == '\\' || c == '/')
        .filter(|s| !s.is_empty())
        .collect();
    segments.pop();
    dotted_prefix(&segments)
}
