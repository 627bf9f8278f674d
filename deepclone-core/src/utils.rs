//! Shared helpers for dotted type and namespace paths.

/// Split a dotted path into its segments, dropping empty ones.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join path segments with dots.
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

/// Fully-qualified name of a type (e.g. `Demo.Models.Person`).
pub fn qualified_name<S: AsRef<str>>(namespace: &[S], name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", join_path(namespace), name)
    }
}
