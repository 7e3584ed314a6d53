//! Plan and write components for one project
//!
//! [`Project`] ties the configuration, the composer autoload table and the stub
//! renderer together. Applying a plan writes the requested component first; linked
//! artifacts are attempted one by one afterwards and a failure in one of them is
//! recorded in the [`Report`] without undoing anything already written.

use crate::config::MakerConfig;
use crate::entity::{FieldKind, RelationKind};
use crate::error::{MakerError, Result};
use crate::generator::{self, Artifact, ComponentKind, Context, Plan, Request};
use crate::module::{self, AutoloadTable, Module};
use crate::registry::Registry;
use crate::stub::StubRenderer;
use crate::writer::{self, WriteOutcome};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: MakerConfig,
    table: AutoloadTable,
    stubs: StubRenderer,
}

impl Project {
    /// Load `.dot-maker.yaml` and the composer autoload table below `root`
    pub fn load(root: &Path) -> Result<Self> {
        let config = MakerConfig::load(root)?;
        let table = AutoloadTable::from_composer_file(&config.composer_path(root))?;
        Ok(Self::new(root, config, table))
    }

    pub fn new(root: &Path, config: MakerConfig, table: AutoloadTable) -> Self {
        let stubs = StubRenderer::new(Some(config.stubs_dir(root)));
        Self {
            root: root.to_path_buf(),
            config,
            table,
            stubs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &MakerConfig {
        &self.config
    }

    pub fn table(&self) -> &AutoloadTable {
        &self.table
    }

    pub fn stubs(&self) -> &StubRenderer {
        &self.stubs
    }

    pub fn resolve(&self, fqcn: &str) -> Result<Module> {
        module::resolve(fqcn, &self.table)
    }

    /// Resolve the request's module and render everything it produces
    pub fn plan(&self, request: &Request, annotated: bool) -> Result<Plan> {
        let module = self.resolve(&request.fqcn)?;
        let ctx = Context::new(&module, &self.config, &self.stubs, annotated);
        generator::plan(request, &ctx)
    }

    /// The requested component's file, if it already exists
    pub fn conflict<'a>(&self, plan: &'a Plan) -> Option<&'a Path> {
        plan.primary()
            .map(|artifact| artifact.path.as_path())
            .filter(|path| path.exists())
    }

    /// Write `plan` to disk.
    ///
    /// An existing requested component is an error unless `force` is set. Linked
    /// artifacts that already exist are left alone.
    pub fn apply(&self, plan: &Plan, force: bool) -> Result<Report> {
        let primary = plan
            .primary()
            .ok_or_else(|| MakerError::InvalidArtifactState("plan has no component".to_string()))?;

        if !force {
            if let Some(path) = self.conflict(plan) {
                return Err(MakerError::DuplicateComponent {
                    path: path.to_path_buf(),
                });
            }
        }

        let mut report = Report::default();
        let outcome = writer::write_file(&primary.path, &primary.contents, force)?;
        report.push(primary, Status::from(outcome));

        for artifact in plan.linked() {
            let status = match writer::write_file(&artifact.path, &artifact.contents, false) {
                Ok(outcome) => Status::from(outcome),
                Err(e) => Status::Failed(e.to_string()),
            };
            report.push(artifact, status);
        }

        Ok(report)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Written,
    Overwritten,
    /// Linked artifact already present
    Kept,
    Failed(String),
}

impl From<WriteOutcome> for Status {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Written => Status::Written,
            WriteOutcome::Overwritten => Status::Overwritten,
            WriteOutcome::Skipped => Status::Kept,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: ComponentKind,
    pub fqcn: String,
    pub path: PathBuf,
    pub status: Status,
}

/// What happened to each artifact of an applied plan
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub entries: Vec<Entry>,
}

impl Report {
    fn push(&mut self, artifact: &Artifact, status: Status) {
        self.entries.push(Entry {
            kind: artifact.kind,
            fqcn: artifact.component.fqcn(),
            path: artifact.path.clone(),
            status,
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, Status::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// One line per artifact
    pub fn lines(&self, root: &Path) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                let path = entry.path.strip_prefix(root).unwrap_or(&entry.path);
                let status = match &entry.status {
                    Status::Written => "created".green().to_string(),
                    Status::Overwritten => "overwritten".yellow().to_string(),
                    Status::Kept => "exists, kept".dimmed().to_string(),
                    Status::Failed(reason) => format!("{} ({})", "failed".red(), reason),
                };
                format!("{:<10} {} [{}]", entry.kind.label(), path.display(), status)
            })
            .collect()
    }

    pub fn print(&self, root: &Path) {
        println!();
        for line in self.lines(root) {
            println!("  {} {}", "->".blue(), line);
        }
    }
}

/// Numbered manual wiring steps
pub fn print_next_steps(steps: &[String]) {
    if steps.is_empty() {
        return;
    }

    println!();
    println!("  {}", "Next steps".cyan().bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        let mut lines = step.lines();
        if let Some(first) = lines.next() {
            println!("  {}.  {}", i + 1, first);
        }
        for line in lines {
            println!("      {}", line);
        }
        println!();
    }
}

/// Copy the bundled stubs into the project's override directory
pub fn publish_stubs(root: &Path, overwrite: bool) -> anyhow::Result<()> {
    use anyhow::Context as _;

    let config = MakerConfig::load(root).context("Failed to load configuration")?;
    let target = config.stubs_dir(root);

    println!(
        "{}",
        format!("Publishing stubs to {}...", target.display())
            .cyan()
            .bold()
    );
    println!();

    let mut published = 0;
    for (name, content) in StubRenderer::bundled_stubs() {
        print!("  {} {}...", "->".blue(), name);
        let outcome = writer::write_file(&target.join(name), content, overwrite)
            .with_context(|| format!("Failed to publish {}", name))?;
        match outcome {
            WriteOutcome::Skipped => println!(" {}", "exists, skipped".yellow()),
            _ => {
                println!(" {}", "done".green());
                published += 1;
            }
        }
    }

    println!();
    println!(
        "{} {} stub(s) in {}",
        "Published".green().bold(),
        published,
        target.display()
    );

    Ok(())
}

/// Registry contents shown by `dot-maker kinds`
pub fn registries() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (ComponentKind::NAME, ComponentKind::keys()),
        (FieldKind::NAME, FieldKind::keys()),
        (RelationKind::NAME, RelationKind::keys()),
    ]
}

pub fn print_kinds() {
    for (name, keys) in registries() {
        println!("{}", format!("{}s", name).cyan().bold());
        for key in keys {
            println!("  {}", key);
        }
        println!();
    }
}
