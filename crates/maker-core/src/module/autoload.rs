//! PSR-4 registration table loaded from composer.json

use crate::error::{MakerError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A composer psr-4 entry: a single directory or a list of candidates
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Psr4Paths {
    Single(String),
    Multiple(Vec<String>),
}

impl Psr4Paths {
    fn first(&self) -> Option<&str> {
        match self {
            Psr4Paths::Single(path) => Some(path.as_str()),
            Psr4Paths::Multiple(paths) => paths.first().map(String::as_str),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct AutoloadSection {
    #[serde(default, rename = "psr-4")]
    psr4: BTreeMap<String, Psr4Paths>,
}

#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    autoload: AutoloadSection,
    #[serde(default, rename = "autoload-dev")]
    autoload_dev: AutoloadSection,
}

/// Registered namespace prefixes mapped to their source directories.
///
/// Prefixes are stored with exactly one trailing backslash.
#[derive(Debug, Clone, Default)]
pub struct AutoloadTable {
    prefixes: BTreeMap<String, PathBuf>,
}

impl AutoloadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a prefix. The first registration of a prefix wins.
    pub fn insert(&mut self, prefix: &str, path: impl Into<PathBuf>) {
        self.prefixes
            .entry(normalize_prefix(prefix))
            .or_insert_with(|| path.into());
    }

    pub fn with(mut self, prefix: &str, path: impl Into<PathBuf>) -> Self {
        self.insert(prefix, path);
        self
    }

    pub fn get(&self, prefix: &str) -> Option<&Path> {
        self.prefixes.get(prefix).map(PathBuf::as_path)
    }

    /// Registered prefixes in sorted order
    pub fn modules(&self) -> Vec<&str> {
        self.prefixes.keys().map(String::as_str).collect()
    }

    /// Load `autoload.psr-4` and `autoload-dev.psr-4` from a composer.json file.
    ///
    /// Relative directories are resolved against the file's parent directory.
    pub fn from_composer_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MakerError::Autoload {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));

        Self::from_composer_str(&content, base_dir).map_err(|e| match e {
            MakerError::Autoload { reason, .. } => MakerError::Autoload {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn from_composer_str(content: &str, base_dir: &Path) -> Result<Self> {
        let composer: ComposerJson =
            serde_json::from_str(content).map_err(|e| MakerError::Autoload {
                path: PathBuf::from("composer.json"),
                reason: e.to_string(),
            })?;

        let mut table = Self::new();
        for section in [&composer.autoload, &composer.autoload_dev] {
            for (prefix, paths) in &section.psr4 {
                if let Some(dir) = paths.first() {
                    table.insert(prefix, base_dir.join(dir));
                }
            }
        }

        Ok(table)
    }
}

/// `Api\Book` and `Api\Book\\` both become `Api\Book\`
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('\\');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\\", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COMPOSER: &str = r#"{
        "name": "dotkernel/api",
        "autoload": {
            "psr-4": {
                "Api\\App\\": "src/App/src/",
                "Api\\Book\\": ["src/Book/src/", "legacy/Book/"],
                "Core\\User\\": "src/Core/src/User/src"
            }
        },
        "autoload-dev": {
            "psr-4": {
                "ApiTest\\Unit\\": "test/Unit/",
                "Api\\App\\": "shadowed/"
            }
        }
    }"#;

    #[test]
    fn test_parse_composer_psr4() {
        let table = AutoloadTable::from_composer_str(COMPOSER, Path::new("/project")).unwrap();

        assert_eq!(
            table.get("Api\\App\\"),
            Some(Path::new("/project/src/App/src/"))
        );
        assert_eq!(
            table.get("Api\\Book\\"),
            Some(Path::new("/project/src/Book/src/"))
        );
        assert!(table.get("ApiTest\\Unit\\").is_some());
        assert_eq!(
            table.modules(),
            vec!["ApiTest\\Unit\\", "Api\\App\\", "Api\\Book\\", "Core\\User\\"]
        );
    }

    #[test]
    fn test_missing_autoload_section_is_empty() {
        let table = AutoloadTable::from_composer_str("{}", Path::new(".")).unwrap();
        assert!(table.modules().is_empty());
    }

    #[test]
    fn test_malformed_composer_json() {
        let result = AutoloadTable::from_composer_str("{ nope", Path::new("."));
        assert!(matches!(result, Err(MakerError::Autoload { .. })));
    }

    #[test]
    fn test_from_composer_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("composer.json");
        std::fs::write(&path, COMPOSER).unwrap();

        let table = AutoloadTable::from_composer_file(&path).unwrap();
        assert_eq!(
            table.get("Core\\User\\"),
            Some(dir.path().join("src/Core/src/User/src").as_path())
        );

        let missing = AutoloadTable::from_composer_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(MakerError::Autoload { .. })));
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("Api\\Book"), "Api\\Book\\");
        assert_eq!(normalize_prefix("\\Api\\Book\\\\"), "Api\\Book\\");
        assert_eq!(normalize_prefix(""), "");
    }
}
