//! Module resolution
//!
//! Maps a fully-qualified class name onto the registered PSR-4 module that owns it.
//! Modules may be registered two, three or four namespace segments deep
//! (`Api\Book\`, `Api\Core\Book\`, ...), so the resolver tests each depth against the
//! autoload table and keeps the most specific registered prefix.

pub mod autoload;

pub use autoload::AutoloadTable;

use crate::component::Component;
use crate::error::{MakerError, Result};
use std::path::{Path, PathBuf};

/// Candidate prefix depths, shallowest first
const CANDIDATE_DEPTHS: [usize; 3] = [2, 3, 4];

/// A registered module that owns a class name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Matched prefix with trailing backslash, e.g. `Api\Book\`
    fqmn: String,
    /// Last prefix segment, e.g. `Book`
    name: String,
    /// Prefix minus its last segment, e.g. `Api`
    namespace: String,
    path: PathBuf,
}

impl Module {
    pub fn new(fqmn: &str, path: impl Into<PathBuf>) -> Self {
        let fqmn = autoload::normalize_prefix(fqmn);
        let trimmed = fqmn.trim_end_matches('\\');
        let (namespace, name) = match trimmed.rsplit_once('\\') {
            Some((namespace, name)) => (namespace.to_string(), name.to_string()),
            None => (String::new(), trimmed.to_string()),
        };

        Self {
            fqmn,
            name,
            namespace,
            path: path.into(),
        }
    }

    pub fn fqmn(&self) -> &str {
        &self.fqmn
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First segment of the module prefix (`Api` for `Api\Core\Book\`)
    pub fn root_namespace(&self) -> &str {
        self.fqmn.split('\\').next().unwrap_or_default()
    }

    /// The part of `fqcn` below the module prefix: `Entity\BookStore` for
    /// `Api\Book\Entity\BookStore` in module `Api\Book\`
    pub fn residual<'a>(&self, fqcn: &'a str) -> &'a str {
        let fqcn = fqcn.trim_start_matches('\\');
        if fqcn.trim_end_matches('\\') == self.fqmn.trim_end_matches('\\') {
            return "";
        }
        fqcn.strip_prefix(self.fqmn.as_str()).unwrap_or(fqcn)
    }

    /// Namespace below the module: `namespace_for(["Handler", "BookStore"])` is
    /// `Api\Book\Handler\BookStore`
    pub fn namespace_for<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let mut namespace = self.fqmn.trim_end_matches('\\').to_string();
        for segment in segments {
            let segment = segment.as_ref().trim_matches('\\');
            if !segment.is_empty() {
                namespace.push('\\');
                namespace.push_str(segment);
            }
        }
        namespace
    }

    /// Source file for a component owned by this module
    pub fn file_path(&self, component: &Component) -> PathBuf {
        let mut path = self.path.clone();
        let namespace = format!("{}\\", component.namespace().trim_matches('\\'));
        let relative = namespace
            .strip_prefix(self.fqmn.as_str())
            .unwrap_or(namespace.as_str());
        for segment in relative.split('\\').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.php", component.class_name()));
        path
    }
}

/// Find the module that owns `fqcn`.
///
/// Candidate prefixes are built from the first two, three and four namespace
/// segments. The longest candidate registered in `table` wins; when none is
/// registered the lookup fails with [`MakerError::ModuleNotFound`].
pub fn resolve(fqcn: &str, table: &AutoloadTable) -> Result<Module> {
    let segments: Vec<&str> = fqcn.split('\\').filter(|s| !s.is_empty()).collect();

    let mut matched: Option<(String, &Path)> = None;
    for depth in CANDIDATE_DEPTHS {
        if segments.len() < depth {
            break;
        }
        let candidate = format!("{}\\", segments[..depth].join("\\"));
        if let Some(path) = table.get(&candidate) {
            matched = Some((candidate, path));
        }
    }

    match matched {
        Some((prefix, path)) => Ok(Module::new(&prefix, path)),
        None => Err(MakerError::ModuleNotFound {
            fqcn: fqcn.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AutoloadTable {
        AutoloadTable::new()
            .with("Api\\", "/project/src")
            .with("Api\\Module\\", "/project/src/Module/src")
            .with("Api\\Core\\User\\", "/project/src/Core/src/User/src")
            .with("Api\\Core\\", "/project/src/Core/src")
    }

    #[test]
    fn test_resolve_two_segment_module() {
        let module = resolve("Api\\Module\\Entity\\Foo", &table()).unwrap();
        assert_eq!(module.fqmn(), "Api\\Module\\");
        assert_eq!(module.name(), "Module");
        assert_eq!(module.namespace(), "Api");
        assert_eq!(module.path(), Path::new("/project/src/Module/src"));
    }

    #[test]
    fn test_resolve_prefers_longest_registered_prefix() {
        let module = resolve("Api\\Core\\User\\Entity\\User", &table()).unwrap();
        assert_eq!(module.fqmn(), "Api\\Core\\User\\");
        assert_eq!(module.name(), "User");
        assert_eq!(module.namespace(), "Api\\Core");
    }

    #[test]
    fn test_resolve_four_segment_module() {
        let table = AutoloadTable::new().with("Api\\Core\\Admin\\Log\\", "/log");
        let module = resolve("Api\\Core\\Admin\\Log\\Entity\\Entry", &table).unwrap();
        assert_eq!(module.fqmn(), "Api\\Core\\Admin\\Log\\");
    }

    #[test]
    fn test_resolve_fails_on_empty_table() {
        let err = resolve("Api\\Module\\Entity\\Foo", &AutoloadTable::new()).unwrap_err();
        match err {
            MakerError::ModuleNotFound { fqcn } => assert_eq!(fqcn, "Api\\Module\\Entity\\Foo"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_short_fqcn_fails() {
        assert!(matches!(
            resolve("Foo", &table()),
            Err(MakerError::ModuleNotFound { .. })
        ));
        assert!(matches!(
            resolve("", &table()),
            Err(MakerError::ModuleNotFound { .. })
        ));
    }

    #[test]
    fn test_single_segment_prefix_is_never_a_candidate() {
        let table = AutoloadTable::new().with("Api\\", "/project/src");
        assert!(resolve("Api\\Book\\Entity\\Book", &table).is_err());
    }

    #[test]
    fn test_residual_and_paths() {
        let module = Module::new("Api\\Book\\", "/project/src/Book/src");
        assert_eq!(
            module.residual("\\Api\\Book\\Entity\\BookStore"),
            "Entity\\BookStore"
        );
        assert_eq!(
            module.namespace_for(&["Handler", "BookStore"]),
            "Api\\Book\\Handler\\BookStore"
        );

        let component = Component::new("Api\\Book\\Handler\\BookStore", "GetBookStoreHandler");
        assert_eq!(
            module.file_path(&component),
            PathBuf::from("/project/src/Book/src/Handler/BookStore/GetBookStoreHandler.php")
        );

        let root = Component::new("Api\\Book", "ConfigProvider");
        assert_eq!(
            module.file_path(&root),
            PathBuf::from("/project/src/Book/src/ConfigProvider.php")
        );
    }
}
