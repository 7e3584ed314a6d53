//! Class methods

use super::{render_function, return_suffix, Decorator, DocBlock, Parameter, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    name: String,
    visibility: Visibility,
    is_static: bool,
    parameters: Vec<Parameter>,
    decorators: Vec<Decorator>,
    body: String,
    return_type: String,
    nullable: bool,
    doc: Option<DocBlock>,
    multiline: bool,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            parameters: Vec::new(),
            decorators: Vec::new(),
            body: String::new(),
            return_type: String::new(),
            nullable: false,
            doc: None,
            multiline: false,
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn set_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn decorator(mut self, decorator: impl Into<Decorator>) -> Self {
        self.decorators.push(decorator.into());
        self
    }

    /// Body text relative to the method's braces
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn nullable_return(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    /// Put each parameter on its own line
    pub fn multiline_parameters(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(doc) = &self.doc {
            lines.push(doc.render());
        }
        lines.extend(self.decorators.iter().map(Decorator::render));

        let mut head = String::from(self.visibility.as_str());
        if self.is_static {
            head.push_str(" static");
        }
        head.push_str(" function ");
        head.push_str(&self.name);

        let parameters: Vec<String> = self.parameters.iter().map(Parameter::render).collect();
        lines.push(render_function(
            &head,
            &parameters,
            self.multiline,
            &return_suffix(&self.return_type, self.nullable),
            &self.body,
        ));

        lines.join("\n")
    }
}
