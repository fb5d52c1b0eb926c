//! Filesystem path helpers.

use std::path::{Path, PathBuf};

/// Normalize a path to an absolute form.
///
/// Canonicalizes when the path exists. Otherwise relative paths are joined
/// onto the current directory and absolute paths are returned as-is.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("icons");
        std::fs::create_dir(&nested).unwrap();

        let normalized = normalize_path(&dir.path().join("icons/../icons"));
        assert_eq!(normalized, nested.canonicalize().unwrap());
    }

    #[test]
    fn test_normalize_missing_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("not-yet-created");
        assert_eq!(normalize_path(&missing), missing);
    }

    #[test]
    fn test_normalize_missing_relative() {
        let normalized = normalize_path(Path::new("surely-missing-output-dir"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("surely-missing-output-dir"));
    }
}
