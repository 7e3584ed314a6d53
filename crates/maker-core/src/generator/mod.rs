//! Component generation
//!
//! Every component kind has a generator that turns a resolved [`Component`] into a
//! rendered file plus the linked artifacts it needs (repository, interface, factory,
//! collection). Generators only build text: the [`Plan`] they fill is written by the
//! caller, parent first.

pub mod collection;
pub mod command;
pub mod entity;
pub mod factory;
pub mod handler;
pub mod interface;
pub mod middleware;
pub mod repository;
pub mod service;

use crate::code::{ClassFile, InterfaceFile};
use crate::component::Component;
use crate::config::MakerConfig;
use crate::entity::{Field, Relation};
use crate::error::{MakerError, Result};
use crate::module::Module;
use crate::naming;
use crate::stub::{Placeholders, StubRenderer};
use std::path::PathBuf;

crate::closed_registry! {
    /// Kinds of component the `make` command accepts
    pub enum ComponentKind: "component kind" {
        Entity => "entity",
        Repository => "repository",
        Service => "service",
        Interface => "interface",
        Handler => "handler",
        Middleware => "middleware",
        Command => "command",
        Factory => "factory",
        Collection => "collection",
    }
}

impl ComponentKind {
    /// Directory, and namespace segment, below the module root
    pub fn directory(&self) -> &'static str {
        match self {
            ComponentKind::Entity => "Entity",
            ComponentKind::Repository => "Repository",
            ComponentKind::Service | ComponentKind::Interface => "Service",
            ComponentKind::Handler => "Handler",
            ComponentKind::Middleware => "Middleware",
            ComponentKind::Command => "Command",
            ComponentKind::Factory => "Factory",
            ComponentKind::Collection => "Collection",
        }
    }

    /// Class-name suffix, appended when the requested name lacks it
    pub fn suffix(&self) -> &'static str {
        match self {
            ComponentKind::Entity => "",
            ComponentKind::Repository => "Repository",
            ComponentKind::Service => "Service",
            ComponentKind::Interface => "Interface",
            ComponentKind::Handler => "Handler",
            ComponentKind::Middleware => "Middleware",
            ComponentKind::Command => "Command",
            ComponentKind::Factory => "Factory",
            ComponentKind::Collection => "Collection",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComponentKind::Entity => "Entity",
            ComponentKind::Interface => "Interface",
            other => other.suffix(),
        }
    }

    /// Guess the kind of an existing class from its name; anything without a known
    /// suffix is an entity
    pub fn from_class_name(class_name: &str) -> Self {
        [
            ComponentKind::Repository,
            ComponentKind::Service,
            ComponentKind::Interface,
            ComponentKind::Handler,
            ComponentKind::Middleware,
            ComponentKind::Command,
            ComponentKind::Factory,
            ComponentKind::Collection,
        ]
        .into_iter()
        .find(|kind| class_name.len() > kind.suffix().len() && class_name.ends_with(kind.suffix()))
        .unwrap_or(ComponentKind::Entity)
    }
}

/// `BookStore` + `Service` = `BookStoreService`; names already carrying the suffix are kept
pub fn with_suffix(class_name: &str, suffix: &str) -> String {
    if class_name.ends_with(suffix) {
        class_name.to_string()
    } else {
        format!("{}{}", class_name, suffix)
    }
}

/// `BookStoreService` - `Service` = `BookStore`
pub fn without_suffix<'a>(class_name: &'a str, suffix: &str) -> &'a str {
    match class_name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem,
        _ => class_name,
    }
}

/// Everything a generator needs to know about the target project
#[derive(Debug, Clone)]
pub struct Context<'a> {
    module: &'a Module,
    stubs: &'a StubRenderer,
    app_namespace: String,
    strict_types: bool,
    annotated: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        module: &'a Module,
        config: &MakerConfig,
        stubs: &'a StubRenderer,
        annotated: bool,
    ) -> Self {
        let app_namespace = config
            .app_namespace
            .as_deref()
            .map(|ns| ns.trim_matches('\\').to_string())
            .unwrap_or_else(|| format!("{}\\App", module.root_namespace()));

        Self {
            module,
            stubs,
            app_namespace,
            strict_types: config.strict_types,
            annotated,
        }
    }

    pub fn module(&self) -> &Module {
        self.module
    }

    pub fn stubs(&self) -> &StubRenderer {
        self.stubs
    }

    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    pub fn app_namespace(&self) -> &str {
        &self.app_namespace
    }

    /// A class from the shared App module, e.g. `app("Entity", "AbstractEntity")`
    pub fn app(&self, segment: &str, class_name: &str) -> Component {
        Component::new(format!("{}\\{}", self.app_namespace, segment), class_name)
    }

    /// `Api\Book\` + `Handler\BookStore\` + class name
    pub fn component<S: AsRef<str>>(
        &self,
        kind: ComponentKind,
        sub: &[S],
        class_name: &str,
    ) -> Component {
        let mut segments = vec![kind.directory().to_string()];
        segments.extend(sub.iter().map(|s| s.as_ref().to_string()));
        Component::new(self.module.namespace_for(&segments), class_name)
    }

    /// Namespace segments between the kind directory and the class name
    pub fn sub_namespace(&self, kind: ComponentKind, component: &Component) -> Vec<String> {
        let base = format!("{}\\", self.module.namespace_for(&[kind.directory()]));
        let namespace = format!("{}\\", component.namespace());
        namespace
            .strip_prefix(base.as_str())
            .map(|rest| {
                rest.split('\\')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Place the requested class name into this module's layout for `kind`.
    ///
    /// The kind directory is prefixed unless the name below the module already starts
    /// with it; interfaces keep whatever directory they were given and default to
    /// `Service`. The kind suffix is appended when missing.
    pub fn identify(&self, kind: ComponentKind, fqcn: &str) -> Result<Component> {
        let residual = self.module.residual(fqcn);
        let mut segments: Vec<&str> = residual.split('\\').filter(|s| !s.is_empty()).collect();
        let class_name = segments.pop().ok_or_else(|| MakerError::InvalidIdentifier {
            name: fqcn.to_string(),
        })?;

        naming::validate_identifier(class_name)?;
        for segment in &segments {
            naming::validate_identifier(segment)?;
        }

        let keeps_layout = match kind {
            ComponentKind::Interface => !segments.is_empty(),
            _ => segments.first() == Some(&kind.directory()),
        };

        let mut namespace: Vec<&str> = Vec::new();
        if !keeps_layout {
            namespace.push(kind.directory());
        }
        namespace.extend(segments);

        Ok(Component::new(
            self.module.namespace_for(&namespace),
            with_suffix(class_name, kind.suffix()),
        ))
    }

    pub fn path(&self, component: &Component) -> PathBuf {
        self.module.file_path(component)
    }

    pub fn exists(&self, component: &Component) -> bool {
        self.path(component).is_file()
    }

    pub fn class_file(&self, component: &Component) -> ClassFile {
        let mut file = ClassFile::new(component.clone());
        file.strict_types(self.strict_types);
        file
    }

    pub fn interface_file(&self, component: &Component) -> InterfaceFile {
        let mut file = InterfaceFile::new(component.clone());
        file.strict_types(self.strict_types);
        file
    }

    /// `\Api\Book\ConfigProvider`
    pub fn config_provider(&self) -> String {
        format!("\\{}", self.module.namespace_for(&["ConfigProvider"]))
    }

    /// `\Api\Book\RoutesDelegator`
    pub fn routes_delegator(&self) -> String {
        format!("\\{}", self.module.namespace_for(&["RoutesDelegator"]))
    }

    /// Existing service interface whose resource name best matches `stem`.
    ///
    /// `BookStoreImport` tries `BookStoreImportServiceInterface`, then
    /// `BookStoreServiceInterface`, then `BookServiceInterface`.
    pub fn existing_service(&self, stem: &str) -> Option<Component> {
        let words = naming::words(stem);
        let sub: [&str; 0] = [];
        (1..=words.len()).rev().find_map(|count| {
            let resource = naming::to_pascal_case(&words[..count].join("_"));
            let interface = self.component(
                ComponentKind::Interface,
                &sub,
                &format!("{}ServiceInterface", resource),
            );
            self.exists(&interface).then_some(interface)
        })
    }

    pub fn render_stub(&self, name: &str, placeholders: &Placeholders) -> Result<String> {
        Ok(self.stubs.render(name, placeholders)?.trim_end().to_string())
    }
}

/// Fully-qualified name with a leading backslash, as written in config files
pub fn absolute(component: &Component) -> String {
    format!("\\{}", component.fqcn())
}

/// Validate, then render
pub(crate) fn finish(file: &ClassFile) -> Result<String> {
    file.validate()?;
    Ok(file.render())
}

/// One file the plan wants written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ComponentKind,
    pub component: Component,
    pub path: PathBuf,
    pub contents: String,
    /// Generated alongside the requested component rather than requested directly
    pub linked: bool,
}

/// Rendered artifacts, requested component first, plus the manual wiring steps
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub artifacts: Vec<Artifact>,
    pub instructions: Vec<String>,
}

impl Plan {
    pub fn primary(&self) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| !a.linked)
    }

    pub fn linked(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(|a| a.linked)
    }

    pub fn artifact(&self, kind: ComponentKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    pub(crate) fn push(
        &mut self,
        ctx: &Context,
        kind: ComponentKind,
        component: &Component,
        contents: String,
        linked: bool,
    ) {
        self.artifacts.push(Artifact {
            kind,
            component: component.clone(),
            path: ctx.path(component),
            contents,
            linked,
        });
    }

    pub(crate) fn instruct(&mut self, instruction: String) {
        if !self.instructions.contains(&instruction) {
            self.instructions.push(instruction);
        }
    }
}

/// What to generate
#[derive(Debug, Clone)]
pub struct Request {
    pub kind: ComponentKind,
    pub fqcn: String,
    pub fields: Vec<Field>,
    pub relations: Vec<Relation>,
}

impl Request {
    pub fn new(kind: ComponentKind, fqcn: impl Into<String>) -> Self {
        Self {
            kind,
            fqcn: fqcn.into(),
            fields: Vec::new(),
            relations: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }
}

/// Build the full plan for `request`
pub fn plan(request: &Request, ctx: &Context) -> Result<Plan> {
    let component = ctx.identify(request.kind, &request.fqcn)?;
    let mut plan = Plan::default();

    match request.kind {
        ComponentKind::Entity => entity::plan(
            ctx,
            &component,
            &request.fields,
            &request.relations,
            &mut plan,
        )?,
        ComponentKind::Repository => repository::plan(ctx, &component, &mut plan)?,
        ComponentKind::Service => service::plan(ctx, &component, &mut plan)?,
        ComponentKind::Interface => interface::plan(ctx, &component, &mut plan)?,
        ComponentKind::Handler => handler::plan(ctx, &component, &mut plan)?,
        ComponentKind::Middleware => middleware::plan(ctx, &component, &mut plan)?,
        ComponentKind::Command => command::plan(ctx, &component, &mut plan)?,
        ComponentKind::Factory => factory::plan(ctx, &component, &mut plan)?,
        ComponentKind::Collection => collection::plan(ctx, &component, &mut plan)?,
    }

    Ok(plan)
}
