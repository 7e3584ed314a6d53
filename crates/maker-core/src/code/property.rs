//! Class properties, including constructor-promoted ones

use super::{Attribute, DocBlock, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    type_name: String,
    nullable: bool,
    default: Option<String>,
    visibility: Visibility,
    is_static: bool,
    readonly: bool,
    doc: Option<DocBlock>,
    attributes: Vec<Attribute>,
}

impl Property {
    /// A `protected` property. `name` may carry a leading `$`.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: name.trim_start_matches('$').to_string(),
            type_name: type_name.into(),
            nullable: false,
            default: None,
            visibility: Visibility::Protected,
            is_static: false,
            readonly: false,
            doc: None,
            attributes: Vec::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn set_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Raw default-value literal
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn doc(mut self, text: &str) -> Self {
        self.doc = Some(DocBlock::new(text));
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// `visibility [static] [readonly] [?]Type $name [= default]` without terminator
    fn declaration(&self) -> String {
        let mut parts = vec![self.visibility.as_str().to_string()];
        if self.is_static {
            parts.push("static".to_string());
        }
        if self.readonly {
            parts.push("readonly".to_string());
        }
        if !self.type_name.is_empty() {
            let nullable = if self.nullable { "?" } else { "" };
            parts.push(format!("{}{}", nullable, self.type_name));
        }
        parts.push(format!("${}", self.name));

        let mut out = parts.join(" ");
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }

    /// Class-body form, with doc comment and attributes above the declaration
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if let Some(doc) = &self.doc {
            lines.push(doc.render());
        }
        lines.extend(self.attributes.iter().map(Attribute::render));
        lines.push(format!("{};", self.declaration()));
        lines.join("\n")
    }

    /// Constructor-parameter form: no terminator, no doc comment
    pub fn render_promoted(&self) -> String {
        self.declaration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_property() {
        assert_eq!(Property::new("title", "string").render(), "protected string $title;");
        assert_eq!(
            Property::new("$tags", "array")
                .visibility(Visibility::Private)
                .default_value("[]")
                .render(),
            "private array $tags = [];"
        );
    }

    #[test]
    fn test_modifiers_order() {
        assert_eq!(
            Property::new("instance", "self")
                .visibility(Visibility::Public)
                .set_static()
                .readonly()
                .nullable()
                .default_value("null")
                .render(),
            "public static readonly ?self $instance = null;"
        );
    }

    #[test]
    fn test_property_with_doc_and_attribute() {
        let property = Property::new("title", "string")
            .doc("@var string")
            .attribute(Attribute::new("ORM\\Column").argument("type: \"string\""));
        assert_eq!(
            property.render(),
            "/**\n * @var string\n */\n#[ORM\\Column(type: \"string\")]\nprotected string $title;"
        );
    }

    #[test]
    fn test_promoted_form() {
        let property = Property::new("bookStoreService", "BookStoreServiceInterface").readonly();
        assert_eq!(
            property.render_promoted(),
            "protected readonly BookStoreServiceInterface $bookStoreService"
        );
    }
}
