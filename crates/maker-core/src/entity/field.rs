//! Scalar entity fields

use crate::code::Attribute;
use crate::component::Component;
use crate::error::{MakerError, Result};
use crate::naming;
use crate::registry::Registry;

crate::closed_registry! {
    /// Column types an entity field can be declared with
    pub enum FieldKind: "field type" {
        String => "string",
        Text => "text",
        Integer => "integer",
        SmallInt => "smallint",
        BigInt => "bigint",
        Float => "float",
        Decimal => "decimal",
        Boolean => "boolean",
        Date => "date",
        DateImmutable => "date_immutable",
        DateTime => "datetime",
        DateTimeImmutable => "datetime_immutable",
        Time => "time",
        TimeImmutable => "time_immutable",
        Json => "json",
        SimpleArray => "simple_array",
        Binary => "binary",
        Blob => "blob",
        Guid => "guid",
        Object => "object",
    }
}

/// Storage and language mapping of a field kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSpec {
    /// Doctrine type name
    pub storage: &'static str,
    /// PHP property type
    pub php_type: &'static str,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

const fn spec(storage: &'static str, php_type: &'static str) -> TypeSpec {
    TypeSpec {
        storage,
        php_type,
        length: None,
        precision: None,
        scale: None,
    }
}

impl FieldKind {
    pub fn spec(&self) -> TypeSpec {
        match self {
            FieldKind::String => TypeSpec {
                length: Some(191),
                ..spec("string", "string")
            },
            FieldKind::Text => spec("text", "string"),
            FieldKind::Integer => spec("integer", "int"),
            FieldKind::SmallInt => spec("smallint", "int"),
            FieldKind::BigInt => spec("bigint", "int"),
            FieldKind::Float => spec("float", "float"),
            FieldKind::Decimal => TypeSpec {
                precision: Some(10),
                scale: Some(2),
                ..spec("decimal", "string")
            },
            FieldKind::Boolean => spec("boolean", "bool"),
            FieldKind::Date => spec("date", "DateTime"),
            FieldKind::DateImmutable => spec("date_immutable", "DateTimeImmutable"),
            FieldKind::DateTime => spec("datetime", "DateTime"),
            FieldKind::DateTimeImmutable => spec("datetime_immutable", "DateTimeImmutable"),
            FieldKind::Time => spec("time", "DateTime"),
            FieldKind::TimeImmutable => spec("time_immutable", "DateTimeImmutable"),
            FieldKind::Json => spec("json", "array"),
            FieldKind::SimpleArray => spec("simple_array", "array"),
            FieldKind::Binary => TypeSpec {
                length: Some(255),
                ..spec("binary", "mixed")
            },
            FieldKind::Blob => spec("blob", "mixed"),
            FieldKind::Guid => spec("guid", "string"),
            FieldKind::Object => spec("object", "object"),
        }
    }

    /// Global class the PHP type refers to, if any
    pub fn php_class(&self) -> Option<Component> {
        match self.spec().php_type {
            "DateTime" | "DateTimeImmutable" => Some(Component::from_fqcn(self.spec().php_type)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    nullable: bool,
    unique: bool,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
}

impl Field {
    /// A field with the kind's default length, precision and scale
    pub fn new(name: &str, kind: FieldKind) -> Result<Self> {
        naming::validate_identifier(name)?;
        let spec = kind.spec();
        Ok(Self {
            name: name.to_string(),
            kind,
            nullable: false,
            unique: false,
            length: spec.length,
            precision: spec.precision,
            scale: spec.scale,
        })
    }

    /// Parse `name:type[:nullable][:unique][:length=N]`
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let kind = FieldKind::from_key(parts.next().unwrap_or("string"))?;
        let mut field = Self::new(name, kind)?;

        for flag in parts {
            field = match flag {
                "nullable" => field.nullable(),
                "unique" => field.unique(),
                other => match other.strip_prefix("length=").and_then(|n| n.parse().ok()) {
                    Some(length) => field.length(length),
                    None => {
                        return Err(MakerError::UnknownType {
                            registry: "field option",
                            key: other.to_string(),
                            expected: "nullable, unique, length=N".to_string(),
                        })
                    }
                },
            };
        }

        Ok(field)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn php_type(&self) -> &'static str {
        self.kind.spec().php_type
    }

    /// `#[ORM\Column(name: "published_at", type: "datetime_immutable", nullable: true)]`
    pub fn column_attribute(&self) -> Attribute {
        let mut attribute = Attribute::new("ORM\\Column")
            .argument(format!("name: \"{}\"", naming::to_snake_case(&self.name)))
            .argument(format!("type: \"{}\"", self.kind.spec().storage));

        if let Some(length) = self.length {
            attribute = attribute.argument(format!("length: {}", length));
        }
        if let Some(precision) = self.precision {
            attribute = attribute.argument(format!("precision: {}", precision));
        }
        if let Some(scale) = self.scale {
            attribute = attribute.argument(format!("scale: {}", scale));
        }
        if self.nullable {
            attribute = attribute.argument("nullable: true");
        }
        if self.unique {
            attribute = attribute.argument("unique: true");
        }
        attribute
    }
}
