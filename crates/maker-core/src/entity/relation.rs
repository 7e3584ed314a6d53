//! Associations between entities

use crate::code::Attribute;
use crate::component::Component;
use crate::error::{MakerError, Result};
use crate::naming;
use crate::registry::Registry;

crate::closed_registry! {
    pub enum RelationKind: "relation type" {
        OneToOne => "one_to_one",
        OneToMany => "one_to_many",
        ManyToOne => "many_to_one",
        ManyToMany => "many_to_many",
    }
}

crate::closed_registry! {
    pub enum FetchMode: "fetch mode" {
        Lazy => "lazy",
        Eager => "eager",
        ExtraLazy => "extra_lazy",
    }
}

impl RelationKind {
    pub fn attribute_name(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "ORM\\OneToOne",
            RelationKind::OneToMany => "ORM\\OneToMany",
            RelationKind::ManyToOne => "ORM\\ManyToOne",
            RelationKind::ManyToMany => "ORM\\ManyToMany",
        }
    }

    pub fn is_to_many(&self) -> bool {
        matches!(self, RelationKind::OneToMany | RelationKind::ManyToMany)
    }
}

impl FetchMode {
    pub fn doctrine_name(&self) -> &'static str {
        match self {
            FetchMode::Lazy => "LAZY",
            FetchMode::Eager => "EAGER",
            FetchMode::ExtraLazy => "EXTRA_LAZY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    name: String,
    kind: RelationKind,
    target: String,
    mapped_by: Option<String>,
    inversed_by: Option<String>,
    cascade: Vec<String>,
    fetch: Option<FetchMode>,
    orphan_removal: bool,
}

impl Relation {
    /// `target` is a fully-qualified class name or a class name in the owner's namespace
    pub fn new(name: &str, kind: RelationKind, target: &str) -> Result<Self> {
        naming::validate_identifier(name)?;
        let target = target.trim_matches('\\');
        let class_name = target.rsplit('\\').next().unwrap_or(target);
        naming::validate_identifier(class_name)?;

        Ok(Self {
            name: name.to_string(),
            kind,
            target: target.to_string(),
            mapped_by: None,
            inversed_by: None,
            cascade: Vec::new(),
            fetch: None,
            orphan_removal: false,
        })
    }

    /// Parse `name:kind:Target[:option]...` where options are `mappedBy=x`,
    /// `inversedBy=x`, `cascade=persist|remove`, `fetch=eager` and `orphanRemoval`
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let kind = RelationKind::from_key(parts.next().unwrap_or_default())?;
        let target = parts.next().unwrap_or_default();
        let mut relation = Self::new(name, kind, target)?;

        for option in parts {
            let (key, value) = option.split_once('=').unwrap_or((option, ""));
            relation = match key {
                "mappedBy" => relation.mapped_by(value),
                "inversedBy" => relation.inversed_by(value),
                "cascade" => value.split('|').fold(relation, |r, c| r.cascade(c)),
                "fetch" => relation.fetch(FetchMode::from_key(value)?),
                "orphanRemoval" => relation.orphan_removal(),
                other => {
                    return Err(MakerError::UnknownType {
                        registry: "relation option",
                        key: other.to_string(),
                        expected: "mappedBy, inversedBy, cascade, fetch, orphanRemoval".to_string(),
                    })
                }
            };
        }

        Ok(relation)
    }

    pub fn mapped_by(mut self, property: &str) -> Self {
        self.mapped_by = Some(property.to_string());
        self
    }

    pub fn inversed_by(mut self, property: &str) -> Self {
        self.inversed_by = Some(property.to_string());
        self
    }

    pub fn cascade(mut self, operation: &str) -> Self {
        if !operation.is_empty() && !self.cascade.iter().any(|c| c == operation) {
            self.cascade.push(operation.to_string());
        }
        self
    }

    pub fn fetch(mut self, fetch: FetchMode) -> Self {
        self.fetch = Some(fetch);
        self
    }

    pub fn orphan_removal(mut self) -> Self {
        self.orphan_removal = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Target entity, resolved against the owning entity's namespace
    pub fn target(&self, owner: &Component) -> Component {
        if self.target.contains('\\') {
            Component::from_fqcn(&self.target)
        } else {
            owner.sibling(self.target.as_str())
        }
    }

    /// The mapping attribute followed by its join column or join table
    pub fn attributes(&self, owner: &Component) -> Vec<Attribute> {
        let target = self.target(owner);
        let mut mapping = Attribute::new(self.kind.attribute_name())
            .argument(format!("targetEntity: {}", target.class_string()));

        // One-to-many is always the inverse side
        let mapped_by = match (self.kind, &self.mapped_by) {
            (_, Some(mapped_by)) => Some(mapped_by.clone()),
            (RelationKind::OneToMany, None) => Some(owner.property_name()),
            _ => None,
        };
        if let Some(mapped_by) = &mapped_by {
            mapping = mapping.argument(format!("mappedBy: \"{}\"", mapped_by));
        }
        if let Some(inversed_by) = &self.inversed_by {
            mapping = mapping.argument(format!("inversedBy: \"{}\"", inversed_by));
        }
        if !self.cascade.is_empty() {
            let operations: Vec<String> = self.cascade.iter().map(|c| format!("\"{}\"", c)).collect();
            mapping = mapping.argument(format!("cascade: [{}]", operations.join(", ")));
        }
        if let Some(fetch) = self.fetch {
            mapping = mapping.argument(format!("fetch: \"{}\"", fetch.doctrine_name()));
        }
        if self.orphan_removal {
            mapping = mapping.argument("orphanRemoval: true");
        }

        let mut attributes = vec![mapping];
        if mapped_by.is_none() {
            match self.kind {
                RelationKind::OneToOne | RelationKind::ManyToOne => {
                    attributes.push(
                        Attribute::new("ORM\\JoinColumn")
                            .argument(format!(
                                "name: \"{}_uuid\"",
                                naming::to_snake_case(&self.name)
                            ))
                            .argument("referencedColumnName: \"uuid\""),
                    );
                }
                RelationKind::ManyToMany => {
                    attributes.push(Attribute::new("ORM\\JoinTable").argument(format!(
                        "name: \"{}_{}\"",
                        owner.snake_case(),
                        naming::to_snake_case(&self.name)
                    )));
                }
                RelationKind::OneToMany => {}
            }
        }

        attributes
    }
}
