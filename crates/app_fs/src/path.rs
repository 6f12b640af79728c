//! Lexical path helpers
//!
//! These never touch the filesystem: `..` is resolved against the textual
//! components, so a symlinked directory's parent is the parent as written.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Join a segment onto a base path
pub fn join_path(base: &str, segment: &str) -> String {
    Path::new(base).join(segment).to_string_lossy().to_string()
}

/// Resolve `.` and `..` components without consulting the filesystem
///
/// `..` never climbs above a root or drive prefix, so the parent of `/` is `/`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = PathBuf::new();

    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        ".".to_string()
    } else {
        normalized.to_string_lossy().to_string()
    }
}

/// Append the platform separator unless the path already ends with one
pub fn with_trailing_separator(path: &str) -> String {
    if path.ends_with(MAIN_SEPARATOR) || path.ends_with('/') {
        path.to_string()
    } else {
        format!("{}{}", path, MAIN_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_parent_of_nested_path() {
        let joined = join_path("/a/b", "..");
        assert_eq!(normalize_path(&joined), "/a");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_parent_of_root_is_root() {
        let joined = join_path("/", "..");
        assert_eq!(normalize_path(&joined), "/");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(normalize_path("/home/./user/../docs/"), "/home/docs");
        assert_eq!(normalize_path("a/../.."), "..");
        assert_eq!(normalize_path("a/.."), ".");
    }

    #[cfg(windows)]
    #[test]
    fn test_parent_of_drive_root() {
        let joined = join_path("C:\\", "..");
        assert_eq!(normalize_path(&joined), "C:\\");
        assert_eq!(normalize_path("C:\\Users\\me\\.."), "C:\\Users");
    }

    #[test]
    fn test_trailing_separator() {
        let with = with_trailing_separator("docs");
        assert!(with.ends_with(MAIN_SEPARATOR));
        assert_eq!(with_trailing_separator(&with), with);
    }
}
