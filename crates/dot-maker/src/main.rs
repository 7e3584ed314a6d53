//! dot-maker CLI - Component generator for Dotkernel-style PHP projects

use anyhow::Result;
use clap::{Parser, Subcommand};
use maker_core::{workflow, ComponentKind, Field, MakeArgs, Registry, Relation};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dot-maker")]
#[command(about = "Generate entities, services, handlers and friends for PHP modules")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a component and the files it depends on
    Make(CliMakeArgs),
    /// Copy the bundled stubs into the project for customization
    PublishStubs(PublishStubsArgs),
    /// List component kinds, field types and relation types
    Kinds,
}

#[derive(Parser, Debug)]
pub struct CliMakeArgs {
    /// Component kind (entity, repository, service, interface, handler, middleware, command, factory, collection)
    pub kind: Option<String>,

    /// Fully-qualified class name, e.g. Api\Book\BookStore
    pub fqcn: Option<String>,

    /// Entity field as name:type[:nullable][:unique][:length=N] (repeatable)
    #[arg(long = "field")]
    pub fields: Vec<String>,

    /// Entity relation as name:kind:Target[:option] (repeatable)
    #[arg(long = "relation")]
    pub relations: Vec<String>,

    /// Project root holding composer.json
    #[arg(short = 'd', long = "project-dir")]
    pub project_dir: Option<PathBuf>,

    /// Register through DI attributes instead of generating factories
    #[arg(short, long)]
    pub annotated: bool,

    /// Overwrite the component if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl TryFrom<CliMakeArgs> for MakeArgs {
    type Error = anyhow::Error;

    fn try_from(args: CliMakeArgs) -> Result<Self> {
        let kind = args
            .kind
            .as_deref()
            .map(ComponentKind::from_key)
            .transpose()?;
        let fields = args
            .fields
            .iter()
            .map(|spec| Field::parse(spec))
            .collect::<maker_core::Result<Vec<_>>>()?;
        let relations = args
            .relations
            .iter()
            .map(|spec| Relation::parse(spec))
            .collect::<maker_core::Result<Vec<_>>>()?;

        Ok(MakeArgs {
            kind,
            fqcn: args.fqcn,
            fields,
            relations,
            project_dir: args.project_dir,
            annotated: args.annotated,
            force: args.force,
            yes: args.yes,
        })
    }
}

#[derive(Parser, Debug)]
pub struct PublishStubsArgs {
    /// Project root holding .dot-maker.yaml
    #[arg(short = 'd', long = "project-dir")]
    pub project_dir: Option<PathBuf>,

    /// Replace stubs that were already published
    #[arg(short, long)]
    pub overwrite: bool,
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Make(make_args)) => {
            let result = maker_core::run(make_args.try_into()?);

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::PublishStubs(publish_args)) => {
            let root = match publish_args.project_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            workflow::publish_stubs(&root, publish_args.overwrite)
        }
        Some(Command::Kinds) => {
            workflow::print_kinds();
            Ok(())
        }
        None => {
            // No subcommand provided, default to an interactive make
            let result = maker_core::run(MakeArgs::default());

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
