//! `use` statement registry

use std::collections::BTreeSet;

/// Class, function and constant imports of one file.
///
/// Entries are keyed by their rendered line, so adding the same import twice is a
/// no-op. The sets keep entries sorted; rendering never touches stored state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Import {
    classes: BTreeSet<String>,
    functions: BTreeSet<String>,
    constants: BTreeSet<String>,
}

impl Import {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class_use(&mut self, fqcn: &str, alias: Option<&str>) -> &mut Self {
        let fqcn = fqcn.trim_start_matches('\\');
        let line = match alias {
            Some(alias) if !alias.is_empty() => format!("use {} as {};", fqcn, alias),
            _ => format!("use {};", fqcn),
        };
        self.classes.insert(line);
        self
    }

    pub fn add_function_use(&mut self, name: &str) -> &mut Self {
        self.functions
            .insert(format!("use function {};", name.trim_start_matches('\\')));
        self
    }

    pub fn add_constant_use(&mut self, name: &str) -> &mut Self {
        self.constants
            .insert(format!("use const {};", name.trim_start_matches('\\')));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.constants.is_empty()
    }

    /// Class uses, function uses and constant uses as blank-line separated blocks
    pub fn render(&self) -> String {
        [&self.classes, &self.functions, &self.constants]
            .iter()
            .filter(|group| !group.is_empty())
            .map(|group| group.iter().cloned().collect::<Vec<_>>().join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
