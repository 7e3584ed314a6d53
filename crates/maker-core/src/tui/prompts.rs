//! Charm-style CLI prompts using cliclack

use crate::entity::{Field, Relation};
use crate::error::MakerError;
use crate::generator::{ComponentKind, Plan, Request};
use crate::registry::Registry;
use crate::workflow::{self, Project, Report, Status};
use anyhow::Result;
use console::style;
use std::path::{Path, PathBuf};

/// CLI arguments for the make command
#[derive(Debug, Clone, Default)]
pub struct MakeArgs {
    /// Kind of component to generate
    pub kind: Option<ComponentKind>,

    /// Fully-qualified class name of the component
    pub fqcn: Option<String>,

    /// Entity fields (`name:type[:nullable][:unique][:length=N]`)
    pub fields: Vec<Field>,

    /// Entity relations (`name:kind:Target[:option]...`)
    pub relations: Vec<Relation>,

    /// Project root holding composer.json
    pub project_dir: Option<PathBuf>,

    /// Register through DI attributes instead of generated factories
    pub annotated: bool,

    /// Overwrite the requested component if it exists
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the make command with interactive prompts
pub fn run(args: MakeArgs) -> Result<()> {
    cliclack::intro("dot-maker")?;

    // Step 1: Load configuration and the autoload table
    let root = project_root(&args);
    let project = load_project(&root)?;

    // Step 2: Select kind and class
    let kind = select_kind(&args)?;
    let fqcn = select_fqcn(&args, kind)?;

    // Step 3: Collect entity fields and relations
    let mut request = Request::new(kind, fqcn);
    if kind == ComponentKind::Entity {
        collect_members(&args, &mut request)?;
    }

    // Step 4: Render everything
    let annotated = args.annotated || project.config().annotated;
    let plan = plan(&project, &request, annotated)?;

    // Step 5: Check for an existing component
    let force = confirm_overwrite(&project, &plan, &args)?;

    // Step 6: Write files
    let report = project.apply(&plan, force)?;
    log_report(&report, project.root())?;

    // Step 7: Show wiring steps
    workflow::print_next_steps(&plan.instructions);

    if report.has_failures() {
        cliclack::outro_cancel("Some linked files could not be written")?;
        anyhow::bail!(
            "{} linked file(s) failed; the requested component was kept.",
            report.failures().count()
        );
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

fn project_root(args: &MakeArgs) -> PathBuf {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match &args.project_dir {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    }
}

fn load_project(root: &Path) -> Result<Project> {
    let spinner = cliclack::spinner();
    spinner.start("Reading composer.json...");

    match Project::load(root) {
        Ok(project) => {
            spinner.stop(format!(
                "{} module(s) registered",
                project.table().modules().len()
            ));
            Ok(project)
        }
        Err(e) => {
            spinner.stop("Failed to load project");
            Err(e.into())
        }
    }
}

fn select_kind(args: &MakeArgs) -> Result<ComponentKind> {
    if let Some(kind) = args.kind {
        return Ok(kind);
    }
    if args.yes {
        anyhow::bail!("A component kind is required in --yes mode.");
    }

    let mut select = cliclack::select("What do you want to make?");
    for kind in ComponentKind::ALL {
        select = select.item(*kind, kind.label(), kind.key());
    }

    Ok(select.interact()?)
}

fn select_fqcn(args: &MakeArgs, kind: ComponentKind) -> Result<String> {
    if let Some(fqcn) = &args.fqcn {
        return Ok(fqcn.clone());
    }
    if args.yes {
        anyhow::bail!("A class name is required in --yes mode.");
    }

    let placeholder = format!(
        "Api\\Book\\{}",
        crate::generator::with_suffix("BookStore", kind.suffix())
    );
    let fqcn: String = cliclack::input("Fully-qualified class name")
        .placeholder(&placeholder)
        .validate(|input: &String| {
            let segments: Vec<&str> = input.trim().trim_matches('\\').split('\\').collect();
            if segments.len() < 3 {
                return Err("Use Vendor\\Module\\ClassName".to_string());
            }
            segments
                .iter()
                .try_for_each(|segment| crate::naming::validate_identifier(segment).map(|_| ()))
                .map_err(|e| e.to_string())
        })
        .interact()?;

    Ok(fqcn.trim().to_string())
}

fn collect_members(args: &MakeArgs, request: &mut Request) -> Result<()> {
    request.fields.extend(args.fields.iter().cloned());
    request.relations.extend(args.relations.iter().cloned());

    if args.yes || !args.fields.is_empty() || !args.relations.is_empty() {
        return Ok(());
    }

    loop {
        let spec: String = cliclack::input("Add a field (name:type[:nullable], empty to finish)")
            .placeholder("title:string")
            .required(false)
            .validate(|input: &String| match input.trim() {
                "" => Ok(()),
                spec => Field::parse(spec).map(|_| ()).map_err(|e| e.to_string()),
            })
            .interact()?;
        if spec.trim().is_empty() {
            break;
        }
        request.fields.push(Field::parse(spec.trim())?);
    }

    let add_relations: bool = cliclack::confirm("Add relations?")
        .initial_value(false)
        .interact()?;
    if !add_relations {
        return Ok(());
    }

    loop {
        let spec: String = cliclack::input("Add a relation (name:kind:Target, empty to finish)")
            .placeholder("books:one_to_many:Book")
            .required(false)
            .validate(|input: &String| match input.trim() {
                "" => Ok(()),
                spec => Relation::parse(spec).map(|_| ()).map_err(|e| e.to_string()),
            })
            .interact()?;
        if spec.trim().is_empty() {
            break;
        }
        request.relations.push(Relation::parse(spec.trim())?);
    }

    Ok(())
}

fn plan(project: &Project, request: &Request, annotated: bool) -> Result<Plan> {
    match project.plan(request, annotated) {
        Ok(plan) => Ok(plan),
        Err(e @ MakerError::ModuleNotFound { .. }) => {
            let modules = project.table().modules();
            if modules.is_empty() {
                cliclack::log::warning("composer.json registers no psr-4 namespaces")?;
            } else {
                cliclack::log::info(format!("Registered modules: {}", modules.join(", ")))?;
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Whether the requested component may be overwritten
fn confirm_overwrite(project: &Project, plan: &Plan, args: &MakeArgs) -> Result<bool> {
    let Some(path) = project.conflict(plan) else {
        return Ok(args.force);
    };
    if args.force {
        cliclack::log::warning(format!("Overwriting {}", display(path, project.root())))?;
        return Ok(true);
    }
    if args.yes {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            display(path, project.root())
        );
    }

    let confirm: bool = cliclack::confirm(format!(
        "{} already exists. Overwrite it?",
        display(path, project.root())
    ))
    .initial_value(false)
    .interact()?;

    if !confirm {
        anyhow::bail!("Generation cancelled.");
    }

    Ok(true)
}

fn display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn log_report(report: &Report, root: &Path) -> Result<()> {
    for entry in &report.entries {
        let line = format!(
            "{} {}",
            entry.kind.label(),
            style(display(&entry.path, root)).dim()
        );
        match &entry.status {
            Status::Written => cliclack::log::success(format!("Created {}", line))?,
            Status::Overwritten => cliclack::log::warning(format!("Overwrote {}", line))?,
            Status::Kept => cliclack::log::info(format!("Kept existing {}", line))?,
            Status::Failed(reason) => {
                cliclack::log::error(format!("Failed {}: {}", line, reason))?
            }
        }
    }

    Ok(())
}
