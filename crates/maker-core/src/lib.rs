//! Maker Core - Shared library for the `dot-maker` component generator
//!
//! Generates entities, repositories, services, handlers, middleware, commands and
//! factories for layered PHP applications whose modules are registered as PSR-4
//! prefixes in `composer.json`.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - naming, class identity, module resolution, code
//!   builders, entity field/relation registries and stub rendering. Pure functions and
//!   values; nothing here prints or touches the terminal.
//! - **Layer 2: Workflow Orchestration** - [`workflow::Project`] loads configuration and
//!   the autoload table, plans a component and writes the plan to disk.
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use maker_core::{generator, module, AutoloadTable, ComponentKind, Request};
//!
//! let table = AutoloadTable::from_composer_file(Path::new("composer.json"))?;
//! let module = module::resolve("Api\\Book\\Service\\BookStoreService", &table)?;
//! let ctx = generator::Context::new(&module, &config, &stubs, false);
//! let plan = generator::plan(&Request::new(ComponentKind::Service, "Api\\Book\\BookStore"), &ctx)?;
//! ```

pub mod code;
pub mod component;
pub mod config;
pub mod entity;
pub mod error;
pub mod generator;
pub mod module;
pub mod naming;
pub mod registry;
pub mod stub;
pub mod workflow;
pub mod writer;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use component::Component;
pub use config::MakerConfig;
pub use entity::{Field, FieldKind, Relation, RelationKind};
pub use error::{MakerError, Result};
pub use generator::{Artifact, ComponentKind, Plan, Request};
pub use module::{AutoloadTable, Module};
pub use registry::Registry;
pub use stub::StubRenderer;
pub use workflow::{Project, Report};

#[cfg(feature = "tui")]
pub use tui::{run, MakeArgs};
