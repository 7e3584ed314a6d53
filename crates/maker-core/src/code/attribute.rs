//! PHP attributes rendered above classes, methods and properties

use super::INDENT;

/// An inline attribute: `#[Name]` or `#[Name(arg, arg)]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    arguments: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// Append a raw argument (`entity: Book::class`, `"book_store"`, ...)
    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self) -> String {
        if self.arguments.is_empty() {
            format!("#[{}]", self.name)
        } else {
            format!("#[{}({})]", self.name, self.arguments.join(", "))
        }
    }
}

/// Dependency-injection attribute listing one container key per constructor
/// parameter, one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inject {
    arguments: Vec<String>,
}

impl Inject {
    pub const NAME: &'static str = "Inject";
    pub const FQCN: &'static str = "Dot\\DependencyInjection\\Attribute\\Inject";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    pub fn render(&self) -> String {
        if self.arguments.is_empty() {
            return format!("#[{}]", Self::NAME);
        }

        let mut out = format!("#[{}(\n", Self::NAME);
        for argument in &self.arguments {
            out.push_str(INDENT);
            out.push_str(argument);
            out.push_str(",\n");
        }
        out.push_str(")]");
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decorator {
    Attribute(Attribute),
    Inject(Inject),
}

impl Decorator {
    pub fn render(&self) -> String {
        match self {
            Decorator::Attribute(attribute) => attribute.render(),
            Decorator::Inject(inject) => inject.render(),
        }
    }
}

impl From<Attribute> for Decorator {
    fn from(attribute: Attribute) -> Self {
        Decorator::Attribute(attribute)
    }
}

impl From<Inject> for Decorator {
    fn from(inject: Inject) -> Self {
        Decorator::Inject(inject)
    }
}
