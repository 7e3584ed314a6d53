//! Full class file assembly

use super::{indent, Constructor, Decorator, DocBlock, Import, Method, Property};
use crate::component::Component;
use crate::error::{MakerError, Result};
use std::collections::HashSet;

/// One PHP class file.
///
/// Render order is fixed: opening tag, strict-types declaration, namespace, imports,
/// doc comment, class attributes, signature, then the body with traits, properties,
/// constructor and methods. Members keep insertion order.
#[derive(Debug, Clone)]
pub struct ClassFile {
    component: Component,
    strict_types: bool,
    imports: Import,
    doc: Option<DocBlock>,
    decorators: Vec<Decorator>,
    is_final: bool,
    is_readonly: bool,
    is_abstract: bool,
    extends: Option<String>,
    implements: Vec<String>,
    traits: Vec<String>,
    properties: Vec<Property>,
    constructor: Option<Constructor>,
    methods: Vec<Method>,
}

impl ClassFile {
    pub fn new(component: Component) -> Self {
        Self {
            component,
            strict_types: true,
            imports: Import::new(),
            doc: None,
            decorators: Vec::new(),
            is_final: false,
            is_readonly: false,
            is_abstract: false,
            extends: None,
            implements: Vec::new(),
            traits: Vec::new(),
            properties: Vec::new(),
            constructor: None,
            methods: Vec::new(),
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn strict_types(&mut self, enabled: bool) -> &mut Self {
        self.strict_types = enabled;
        self
    }

    /// Import `component` unless it lives in this file's namespace
    pub fn add_use(&mut self, component: &Component) -> &mut Self {
        if component.namespace().is_empty()
            || component.namespace() != self.component.namespace()
        {
            self.imports.add_class_use(&component.fqcn(), None);
        }
        self
    }

    pub fn add_use_as(&mut self, fqcn: &str, alias: &str) -> &mut Self {
        self.imports.add_class_use(fqcn, Some(alias));
        self
    }

    pub fn add_function_use(&mut self, name: &str) -> &mut Self {
        self.imports.add_function_use(name);
        self
    }

    pub fn add_constant_use(&mut self, name: &str) -> &mut Self {
        self.imports.add_constant_use(name);
        self
    }

    pub fn doc(&mut self, text: &str) -> &mut Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    pub fn decorator(&mut self, decorator: impl Into<Decorator>) -> &mut Self {
        self.decorators.push(decorator.into());
        self
    }

    pub fn set_final(&mut self) -> &mut Self {
        self.is_final = true;
        self
    }

    pub fn set_readonly(&mut self) -> &mut Self {
        self.is_readonly = true;
        self
    }

    pub fn set_abstract(&mut self) -> &mut Self {
        self.is_abstract = true;
        self
    }

    pub fn extends(&mut self, parent: &Component) -> &mut Self {
        self.add_use(parent);
        self.extends = Some(parent.class_name().to_string());
        self
    }

    /// Implemented interfaces are de-duplicated by name
    pub fn implements(&mut self, interface: &Component) -> &mut Self {
        self.add_use(interface);
        let name = interface.class_name().to_string();
        if !self.implements.contains(&name) {
            self.implements.push(name);
        }
        self
    }

    /// Traits are de-duplicated by their `use` line
    pub fn use_trait(&mut self, trait_component: &Component) -> &mut Self {
        self.add_use(trait_component);
        let line = format!("use {};", trait_component.class_name());
        if !self.traits.contains(&line) {
            self.traits.push(line);
        }
        self
    }

    pub fn property(&mut self, property: Property) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn constructor(&mut self, constructor: Constructor) -> &mut Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    /// Reject states the builders accept silently: a promoted constructor property
    /// that is also declared in the property list, duplicate property names and
    /// duplicate method names.
    pub fn validate(&self) -> Result<()> {
        let mut properties = HashSet::new();
        for property in &self.properties {
            if !properties.insert(property.name()) {
                return Err(MakerError::InvalidArtifactState(format!(
                    "{}: property ${} is declared more than once",
                    self.component.class_name(),
                    property.name()
                )));
            }
        }

        if let Some(constructor) = &self.constructor {
            constructor.validate()?;
            if let Some(promoted) = constructor
                .promoted()
                .iter()
                .find(|p| properties.contains(p.name()))
            {
                return Err(MakerError::InvalidArtifactState(format!(
                    "{}: ${} is both a promoted constructor property and a declared property",
                    self.component.class_name(),
                    promoted.name()
                )));
            }
        }

        let mut methods = HashSet::new();
        for method in &self.methods {
            if !methods.insert(method.name()) {
                return Err(MakerError::InvalidArtifactState(format!(
                    "{}: method {}() is declared more than once",
                    self.component.class_name(),
                    method.name()
                )));
            }
        }

        Ok(())
    }

    fn signature(&self) -> String {
        let mut parts = Vec::new();
        if self.is_final {
            parts.push("final".to_string());
        }
        if self.is_readonly {
            parts.push("readonly".to_string());
        }
        if self.is_abstract {
            parts.push("abstract".to_string());
        }
        parts.push(format!("class {}", self.component.class_name()));
        if let Some(parent) = &self.extends {
            parts.push(format!("extends {}", parent));
        }
        if !self.implements.is_empty() {
            parts.push(format!("implements {}", self.implements.join(", ")));
        }
        parts.join(" ")
    }

    fn body(&self) -> String {
        let mut sections = Vec::new();

        if !self.traits.is_empty() {
            sections.push(self.traits.join("\n"));
        }
        if !self.properties.is_empty() {
            sections.push(
                self.properties
                    .iter()
                    .map(Property::render)
                    .collect::<Vec<_>>()
                    .join("\n\n"),
            );
        }

        let mut functions = Vec::new();
        if let Some(constructor) = &self.constructor {
            functions.push(constructor.render());
        }
        functions.extend(self.methods.iter().map(Method::render));
        if !functions.is_empty() {
            sections.push(functions.join("\n\n"));
        }

        sections.join("\n\n")
    }

    pub fn render(&self) -> String {
        let mut out = render_header(&self.component, self.strict_types, &self.imports);

        if let Some(doc) = &self.doc {
            out.push_str(&doc.render());
            out.push('\n');
        }
        for decorator in &self.decorators {
            out.push_str(&decorator.render());
            out.push('\n');
        }

        out.push_str(&self.signature());
        out.push_str("\n{\n");
        let body = self.body();
        if !body.is_empty() {
            out.push_str(&indent(&body, 1));
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}

/// Opening tag, strict-types marker, namespace and imports, each followed by a blank line
pub(crate) fn render_header(component: &Component, strict_types: bool, imports: &Import) -> String {
    let mut out = String::from("<?php\n\n");
    if strict_types {
        out.push_str("declare(strict_types=1);\n\n");
    }
    if !component.namespace().is_empty() {
        out.push_str(&format!("namespace {};\n\n", component.namespace()));
    }
    if !imports.is_empty() {
        out.push_str(&imports.render());
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Attribute, Parameter};

    fn component() -> Component {
        Component::new("Api\\Book\\Service", "BookStoreService")
    }

    #[test]
    fn test_empty_class() {
        let file = ClassFile::new(component());
        assert_eq!(
            file.render(),
            "<?php\n\ndeclare(strict_types=1);\n\nnamespace Api\\Book\\Service;\n\nclass BookStoreService\n{\n}\n"
        );
    }

    #[test]
    fn test_full_class_layout() {
        let mut file = ClassFile::new(component());
        file.doc("Book store service")
            .decorator(Attribute::new("Service"))
            .set_final()
            .extends(&Component::new("Api\\App\\Service", "AbstractService"))
            .implements(&Component::new("Api\\Book\\Service", "BookStoreServiceInterface"))
            .implements(&Component::new("Api\\Book\\Service", "BookStoreServiceInterface"))
            .use_trait(&Component::new("Api\\App\\Service", "LoggerTrait"))
            .use_trait(&Component::new("Api\\App\\Service", "LoggerTrait"))
            .property(Property::new("cache", "array").default_value("[]"))
            .constructor(
                Constructor::new().promote(Property::new("bookStoreRepository", "BookStoreRepository")),
            )
            .method(
                crate::code::Method::new("getRepository")
                    .returns("BookStoreRepository")
                    .body("return $this->bookStoreRepository;"),
            )
            .add_use(&Component::new("Api\\Book\\Repository", "BookStoreRepository"));

        let expected = r#"<?php

declare(strict_types=1);

namespace Api\Book\Service;

use Api\App\Service\AbstractService;
use Api\App\Service\LoggerTrait;
use Api\Book\Repository\BookStoreRepository;

/**
 * Book store service
 */
#[Service]
final class BookStoreService extends AbstractService implements BookStoreServiceInterface
{
    use LoggerTrait;

    protected array $cache = [];

    public function __construct(
        protected BookStoreRepository $bookStoreRepository,
    ) {
    }

    public function getRepository(): BookStoreRepository
    {
        return $this->bookStoreRepository;
    }
}
"#;
        assert_eq!(file.render(), expected);
        assert_eq!(file.render(), file.render());
    }

    #[test]
    fn test_no_strict_types_and_modifiers() {
        let mut file = ClassFile::new(Component::new("Api\\Book\\Entity", "Money"));
        file.strict_types(false).set_readonly().set_abstract();
        assert_eq!(
            file.render(),
            "<?php\n\nnamespace Api\\Book\\Entity;\n\nreadonly abstract class Money\n{\n}\n"
        );
    }

    #[test]
    fn test_global_class_imported() {
        let mut file = ClassFile::new(component());
        file.add_use(&Component::from_fqcn("DateTimeImmutable"))
            .add_function_use("sprintf");
        assert!(file
            .render()
            .contains("use DateTimeImmutable;\n\nuse function sprintf;\n\nclass"));
    }

    #[test]
    fn test_validate_promoted_and_declared_property() {
        let mut file = ClassFile::new(component());
        file.property(Property::new("bookStoreRepository", "BookStoreRepository"))
            .constructor(
                Constructor::new().promote(Property::new("bookStoreRepository", "BookStoreRepository")),
            );
        assert!(matches!(
            file.validate(),
            Err(MakerError::InvalidArtifactState(_))
        ));
    }

    #[test]
    fn test_validate_duplicate_methods() {
        let mut file = ClassFile::new(component());
        file.method(crate::code::Method::new("a"))
            .method(crate::code::Method::new("a").parameter(Parameter::new("x", "int")));
        assert!(file.validate().is_err());

        let mut ok = ClassFile::new(component());
        ok.method(crate::code::Method::new("a"));
        assert!(ok.validate().is_ok());
    }
}
