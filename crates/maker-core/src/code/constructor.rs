//! `__construct` with promoted properties

use super::{render_function, Decorator, DocBlock, Inject, Parameter, Property, Visibility};
use crate::error::{MakerError, Result};
use std::collections::HashSet;

pub const CONSTRUCTOR_NAME: &str = "__construct";

/// A constructor never declares a return type. Promoted properties render before
/// ordinary parameters; any parameter puts the list on multiple lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructor {
    visibility: Visibility,
    decorators: Vec<Decorator>,
    promoted: Vec<Property>,
    parameters: Vec<Parameter>,
    body: String,
    doc: Option<DocBlock>,
}

impl Constructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn promote(mut self, property: Property) -> Self {
        self.promoted.push(property);
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

    pub fn inject(self, inject: Inject) -> Self {
        self.decorator(inject)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    pub fn promoted(&self) -> &[Property] {
        &self.promoted
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Reject parameter lists that declare the same name twice
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let names = self
            .promoted
            .iter()
            .map(Property::name)
            .chain(self.parameters.iter().map(Parameter::name));
        for name in names {
            if !seen.insert(name) {
                return Err(MakerError::InvalidArtifactState(format!(
                    "constructor parameter ${} is declared more than once",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(doc) = &self.doc {
            lines.push(doc.render());
        }
        lines.extend(self.decorators.iter().map(Decorator::render));

        let parameters: Vec<String> = self
            .promoted
            .iter()
            .map(Property::render_promoted)
            .chain(self.parameters.iter().map(Parameter::render))
            .collect();

        let head = format!("{} function {}", self.visibility.as_str(), CONSTRUCTOR_NAME);
        lines.push(render_function(&head, &parameters, true, "", &self.body));

        lines.join("\n")
    }
}
