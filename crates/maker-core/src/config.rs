//! Project configuration (`.dot-maker.yaml`)

use crate::error::{MakerError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file looked up at the project root
pub const CONFIG_FILE: &str = ".dot-maker.yaml";

/// Environment variable overriding the stub directory
pub const STUBS_ENV: &str = "DOT_MAKER_STUBS";

fn default_composer() -> PathBuf {
    PathBuf::from("composer.json")
}

fn default_stubs() -> PathBuf {
    PathBuf::from("stubs/dot-maker")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MakerConfig {
    /// composer.json holding the PSR-4 autoload table
    #[serde(default = "default_composer")]
    pub composer: PathBuf,

    /// Project stub overrides
    #[serde(default = "default_stubs")]
    pub stubs: PathBuf,

    /// Namespace of the shared App module; derived from the resolved module when unset
    #[serde(default)]
    pub app_namespace: Option<String>,

    /// Emit `declare(strict_types=1);`
    #[serde(default = "default_true")]
    pub strict_types: bool,

    /// Prefer DI attributes over generated factories
    #[serde(default)]
    pub annotated: bool,
}

impl Default for MakerConfig {
    fn default() -> Self {
        Self {
            composer: default_composer(),
            stubs: default_stubs(),
            app_namespace: None,
            strict_types: true,
            annotated: false,
        }
    }
}

impl MakerConfig {
    /// Read `.dot-maker.yaml` from `project_dir`, falling back to defaults when the file
    /// is absent. The `DOT_MAKER_STUBS` environment variable wins over the file.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config = Self::from_file(&project_dir.join(CONFIG_FILE))?;
        Ok(config.with_stubs_override(std::env::var(STUBS_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| MakerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_yaml(&content, path)
    }

    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        // An empty file deserializes to null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| MakerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn with_stubs_override(mut self, stubs: Option<String>) -> Self {
        if let Some(stubs) = stubs.filter(|s| !s.trim().is_empty()) {
            self.stubs = PathBuf::from(stubs);
        }
        self
    }

    pub fn composer_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.composer)
    }

    pub fn stubs_dir(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.stubs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = MakerConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, MakerConfig::default());
        assert_eq!(config.composer, PathBuf::from("composer.json"));
        assert!(config.strict_types);
        assert!(!config.annotated);
    }

    #[test]
    fn test_partial_file() {
        let yaml = "annotated: true\napp_namespace: Core\\App\n";
        let config = MakerConfig::from_yaml(yaml, Path::new(CONFIG_FILE)).unwrap();
        assert!(config.annotated);
        assert_eq!(config.app_namespace.as_deref(), Some("Core\\App"));
        assert_eq!(config.stubs, PathBuf::from("stubs/dot-maker"));
    }

    #[test]
    fn test_malformed_file() {
        let result = MakerConfig::from_yaml("strict_types: [", Path::new(CONFIG_FILE));
        assert!(matches!(result, Err(MakerError::Config { .. })));
    }

    #[test]
    fn test_stubs_override() {
        let config = MakerConfig::default().with_stubs_override(Some("custom/stubs".into()));
        assert_eq!(config.stubs_dir(Path::new("/p")), PathBuf::from("/p/custom/stubs"));

        let config = MakerConfig::default().with_stubs_override(Some("  ".into()));
        assert_eq!(config.stubs, PathBuf::from("stubs/dot-maker"));
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "composer: api/composer.json\n").unwrap();
        let config = MakerConfig::from_file(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(
            config.composer_path(dir.path()),
            dir.path().join("api/composer.json")
        );
    }
}
