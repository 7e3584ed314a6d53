//! Placeholder templates
//!
//! Stubs are plain text with `{{KEY}}` markers. A project may override any bundled
//! stub by placing a file with the same name in its stub directory.

use crate::error::{MakerError, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub type Placeholders = BTreeMap<String, String>;

/// Stubs compiled into the binary
const BUNDLED: &[(&str, &str)] = &[
    ("alias-registration.stub", include_str!("../stubs/alias-registration.stub")),
    ("collection.stub", include_str!("../stubs/collection.stub")),
    ("command-registration.stub", include_str!("../stubs/command-registration.stub")),
    ("factory-registration.stub", include_str!("../stubs/factory-registration.stub")),
    ("middleware-pipe.stub", include_str!("../stubs/middleware-pipe.stub")),
    ("route.stub", include_str!("../stubs/route.stub")),
];

/// Where a stub was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubSource {
    Override(PathBuf),
    Bundled(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct StubRenderer {
    override_dir: Option<PathBuf>,
}

impl StubRenderer {
    pub fn new(override_dir: Option<PathBuf>) -> Self {
        Self { override_dir }
    }

    /// Renderer that only knows the bundled stubs
    pub fn bundled() -> Self {
        Self::default()
    }

    pub fn bundled_stubs() -> &'static [(&'static str, &'static str)] {
        BUNDLED
    }

    /// Project override first, bundled default second
    pub fn source(&self, name: &str) -> Result<StubSource> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(name);
            if path.is_file() {
                return Ok(StubSource::Override(path));
            }
        }

        BUNDLED
            .iter()
            .find(|(stub, _)| *stub == name)
            .map(|(_, content)| StubSource::Bundled(content))
            .ok_or_else(|| MakerError::TemplateNotFound {
                name: name.to_string(),
            })
    }

    pub fn load(&self, name: &str) -> Result<String> {
        match self.source(name)? {
            StubSource::Override(path) => {
                std::fs::read_to_string(&path).map_err(|source| MakerError::Read { path, source })
            }
            StubSource::Bundled(content) => Ok(content.to_string()),
        }
    }

    pub fn render(&self, name: &str, placeholders: &Placeholders) -> Result<String> {
        Ok(fill(&self.load(name)?, placeholders))
    }
}

/// Build a placeholder map from key/value pairs
pub fn placeholders<K, V, I>(pairs: I) -> Placeholders
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Replace every `{{KEY}}` whose key is present in `placeholders`.
///
/// Matches are taken left to right straight from the template, so substituted values
/// are never re-scanned. Unknown markers and stray braces are left untouched.
pub fn fill(template: &str, placeholders: &Placeholders) -> String {
    let mut tokens: Vec<(String, &str)> = placeholders
        .iter()
        .map(|(key, value)| (format!("{{{{{}}}}}", key), value.as_str()))
        .collect();
    // Longest first so a key never shadows a longer one at the same position
    tokens.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match tokens.iter().find(|(token, _)| candidate.starts_with(token.as_str())) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &candidate[token.len()..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
