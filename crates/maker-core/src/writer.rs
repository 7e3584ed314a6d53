//! Writing generated files to disk

use crate::error::{MakerError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Overwritten,
    /// Target existed and overwriting was not allowed
    Skipped,
}

/// Write `contents` to `path`, creating parent directories as needed
pub fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<WriteOutcome> {
    let existed = path.exists();
    if existed && !overwrite {
        return Ok(WriteOutcome::Skipped);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| MakerError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| MakerError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Written
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("src/Book/src/Entity/Book.php");

        assert_eq!(write_file(&path, "<?php\n", false).unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<?php\n");
    }

    #[test]
    fn test_existing_file_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Book.php");
        fs::write(&path, "old").unwrap();

        assert_eq!(write_file(&path, "new", false).unwrap(), WriteOutcome::Skipped);
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");

        assert_eq!(write_file(&path, "new", true).unwrap(), WriteOutcome::Overwritten);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = write_file(&blocker.join("Book.php"), "x", false);
        assert!(matches!(result, Err(MakerError::Write { .. })));
    }
}
