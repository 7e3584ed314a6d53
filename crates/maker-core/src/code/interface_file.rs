//! Interface file assembly

use super::class_file::render_header;
use super::{indent, Declaration, DocBlock, Import};
use crate::component::Component;

#[derive(Debug, Clone)]
pub struct InterfaceFile {
    component: Component,
    strict_types: bool,
    imports: Import,
    doc: Option<DocBlock>,
    extends: Vec<String>,
    declarations: Vec<Declaration>,
}

impl InterfaceFile {
    pub fn new(component: Component) -> Self {
        Self {
            component,
            strict_types: true,
            imports: Import::new(),
            doc: None,
            extends: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn strict_types(&mut self, enabled: bool) -> &mut Self {
        self.strict_types = enabled;
        self
    }

    pub fn add_use(&mut self, component: &Component) -> &mut Self {
        if component.namespace().is_empty()
            || component.namespace() != self.component.namespace()
        {
            self.imports.add_class_use(&component.fqcn(), None);
        }
        self
    }

    pub fn doc(&mut self, text: &str) -> &mut Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    pub fn extends(&mut self, parent: &Component) -> &mut Self {
        self.add_use(parent);
        let name = parent.class_name().to_string();
        if !self.extends.contains(&name) {
            self.extends.push(name);
        }
        self
    }

    pub fn declaration(&mut self, declaration: Declaration) -> &mut Self {
        self.declarations.push(declaration);
        self
    }

    pub fn render(&self) -> String {
        let mut out = render_header(&self.component, self.strict_types, &self.imports);

        if let Some(doc) = &self.doc {
            out.push_str(&doc.render());
            out.push('\n');
        }

        out.push_str(&format!("interface {}", self.component.class_name()));
        if !self.extends.is_empty() {
            out.push_str(&format!(" extends {}", self.extends.join(", ")));
        }
        out.push_str("\n{\n");

        if !self.declarations.is_empty() {
            let body = self
                .declarations
                .iter()
                .map(Declaration::render)
                .collect::<Vec<_>>()
                .join("\n\n");
            out.push_str(&indent(&body, 1));
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }
}
