//! Path normalization and file checks.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use directories::BaseDirs;

use crate::error::{IngestError, Result};

/// Expands a leading `~` to the current user's home directory.
///
/// `~user` forms and paths without a leading tilde are returned unchanged,
/// as is everything when no home directory can be determined.
pub fn expand_user(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(raw),
    };
    let Some(dirs) = BaseDirs::new() else {
        return PathBuf::from(raw);
    };
    let home = dirs.home_dir();
    let rest = rest.trim_start_matches(['/', '\\']);
    if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    }
}

/// Expands a required path input, failing when it is empty.
pub fn required_path(raw: &str, input: &'static str) -> Result<PathBuf> {
    if raw.trim().is_empty() {
        return Err(IngestError::MissingInput { input });
    }
    Ok(expand_user(raw))
}

/// Fails with [`IngestError::FileNotFound`] unless `path` is an existing file.
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Current modification time of `path`.
pub fn modified_time(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| IngestError::read(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_user_passthrough() {
        assert_eq!(expand_user("/abs/file.txt"), PathBuf::from("/abs/file.txt"));
        assert_eq!(expand_user("rel/file.txt"), PathBuf::from("rel/file.txt"));
        assert_eq!(expand_user("~other/x.txt"), PathBuf::from("~other/x.txt"));
    }

    #[test]
    fn test_expand_user_home() {
        let Some(dirs) = BaseDirs::new() else {
            return;
        };
        assert_eq!(expand_user("~"), dirs.home_dir());
        assert_eq!(
            expand_user("~/prompts/a.txt"),
            dirs.home_dir().join("prompts/a.txt")
        );
    }

    #[test]
    fn test_required_path_rejects_empty() {
        let err = required_path("  ", "file_path").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingInput { input: "file_path" }
        ));
    }

    #[test]
    fn test_require_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(require_file(&file).is_ok());
        assert!(matches!(
            require_file(dir.path()),
            Err(IngestError::FileNotFound { .. })
        ));
        assert!(matches!(
            require_file(&dir.path().join("missing.txt")),
            Err(IngestError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_modified_time_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = modified_time(&dir.path().join("missing.txt"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
