//! Error types for component generation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MakerError {
    #[error(
        "Module not found for {fqcn}. Register its namespace under \"autoload\".\"psr-4\" in composer.json and run `composer dump-autoload`"
    )]
    ModuleNotFound { fqcn: String },

    #[error("Unknown {registry} '{key}'. Expected one of: {expected}")]
    UnknownType {
        registry: &'static str,
        key: String,
        expected: String,
    },

    #[error("Component already exists: {}", path.display())]
    DuplicateComponent { path: PathBuf },

    #[error("Invalid name '{name}': names must start with a letter or underscore and contain only letters, digits and underscores")]
    InvalidIdentifier { name: String },

    #[error("Stub template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid artifact state: {0}")]
    InvalidArtifactState(String),

    #[error("Failed to load autoload table from {}: {reason}", path.display())]
    Autoload { path: PathBuf, reason: String },

    #[error("Failed to load configuration from {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, MakerError>;
