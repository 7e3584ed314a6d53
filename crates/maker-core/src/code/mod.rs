//! Code assembly
//!
//! Builders that assemble one PHP source file from structured parts. Every builder
//! accumulates its parts first and then renders once; `render()` never mutates the
//! builder, so rendering twice yields identical text.
//!
//! Everything renders at column zero. Containers indent their children with
//! [`indent`], four spaces per level.

pub mod attribute;
pub mod class_file;
pub mod constructor;
pub mod declaration;
pub mod import;
pub mod interface_file;
pub mod method;
pub mod parameter;
pub mod property;

pub use attribute::{Attribute, Decorator, Inject};
pub use class_file::ClassFile;
pub use constructor::Constructor;
pub use declaration::Declaration;
pub use import::Import;
pub use interface_file::InterfaceFile;
pub use method::Method;
pub use parameter::Parameter;
pub use property::Property;

pub const INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// A `/** ... */` comment block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    lines: Vec<String>,
}

impl DocBlock {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(|l| l.trim_end().to_string()).collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("/**\n");
        for line in &self.lines {
            if line.is_empty() {
                out.push_str(" *\n");
            } else {
                out.push_str(" * ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str(" */");
        out
    }
}

/// Indent every non-empty line of `text` by `level` steps
pub fn indent(text: &str, level: usize) -> String {
    let prefix = INDENT.repeat(level);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shared layout for functions with a body.
///
/// `head` is everything before the parameter list (`public function handle`),
/// `return_type` is the rendered `: Type` suffix or empty.
pub(crate) fn render_function(
    head: &str,
    parameters: &[String],
    multiline: bool,
    return_type: &str,
    body: &str,
) -> String {
    let mut out = String::new();

    if parameters.is_empty() {
        out.push_str(&format!("{}(){}\n{{\n", head, return_type));
    } else if multiline {
        out.push_str(head);
        out.push_str("(\n");
        for parameter in parameters {
            out.push_str(INDENT);
            out.push_str(parameter);
            out.push_str(",\n");
        }
        out.push_str(&format!("){} {{\n", return_type));
    } else {
        out.push_str(&format!(
            "{}({}){}\n{{\n",
            head,
            parameters.join(", "),
            return_type
        ));
    }

    let body = body.trim_end();
    if !body.is_empty() {
        out.push_str(&indent(body, 1));
        out.push('\n');
    }
    out.push('}');
    out
}

/// `: ?Type`, or nothing for an empty type
pub(crate) fn return_suffix(return_type: &str, nullable: bool) -> String {
    match (return_type.is_empty(), nullable) {
        (true, _) => String::new(),
        (false, true) => format!(": ?{}", return_type),
        (false, false) => format!(": {}", return_type),
    }
}
