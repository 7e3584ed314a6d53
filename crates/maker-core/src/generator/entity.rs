//! Doctrine entities
//!
//! An entity extends the App module's `AbstractEntity`, records its timestamps through
//! `TimestampsTrait` and points back at its repository. Every field and relation adds
//! a mapped property, accessors and an entry in `getArrayCopy()`.

use super::{finish, repository, ComponentKind, Context, Plan};
use crate::code::{Attribute, ClassFile, Constructor, Method, Parameter, Property};
use crate::component::Component;
use crate::entity::{Field, Relation};
use crate::error::Result;
use crate::naming;

/// `mixed` already admits null and cannot take a `?`
fn nullable_type(php_type: &str) -> bool {
    php_type != "mixed"
}

fn add_field(file: &mut ClassFile, field: &Field, methods: &mut Vec<Method>, copy: &mut Vec<String>) {
    let php_type = field.php_type();
    if let Some(class) = field.kind().php_class() {
        file.add_use(&class);
    }

    let nullable = field.is_nullable() && nullable_type(php_type);
    let mut property = Property::new(field.name(), php_type).attribute(field.column_attribute());
    let mut parameter = Parameter::new(field.name(), php_type);
    let mut getter = Method::new(naming::getter_name(field.name())).returns(php_type);
    if nullable {
        property = property.nullable();
        parameter = parameter.nullable();
        getter = getter.nullable_return();
    }
    if field.is_nullable() {
        property = property.default_value("null");
    }
    file.property(property);

    methods.push(getter.body(format!("return $this->{};", field.name())));
    methods.push(
        Method::new(naming::setter_name(field.name()))
            .parameter(parameter)
            .returns("self")
            .body(format!(
                "$this->{name} = ${name};\n\nreturn $this;",
                name = field.name()
            )),
    );

    copy.push(format!(
        "'{}' => $this->{}(),",
        field.name(),
        naming::getter_name(field.name())
    ));
}

fn add_relation(
    file: &mut ClassFile,
    owner: &Component,
    relation: &Relation,
    methods: &mut Vec<Method>,
    copy: &mut Vec<String>,
    initializers: &mut Vec<String>,
) {
    let target = relation.target(owner);
    file.add_use(&target);
    let name = relation.name();
    let getter = naming::getter_name(name);

    let mut property = if relation.kind().is_to_many() {
        Property::new(name, "Collection")
    } else {
        Property::new(name, target.class_name())
            .nullable()
            .default_value("null")
    };
    for attribute in relation.attributes(owner) {
        property = property.attribute(attribute);
    }
    file.property(property);

    if relation.kind().is_to_many() {
        file.add_use(&Component::from_fqcn("Doctrine\\Common\\Collections\\ArrayCollection"))
            .add_use(&Component::from_fqcn("Doctrine\\Common\\Collections\\Collection"));
        initializers.push(format!("$this->{} = new ArrayCollection();", name));

        let singular = naming::singularize(name);
        let item = format!("${}", naming::lcfirst(&singular));
        methods.push(
            Method::new(getter.as_str())
                .returns("Collection")
                .body(format!("return $this->{};", name)),
        );
        methods.push(
            Method::new(format!("add{}", naming::ucfirst(&singular)))
                .parameter(Parameter::new(naming::lcfirst(&singular), target.class_name()))
                .returns("self")
                .body(format!(
                    "if (! $this->{name}->contains({item})) {{\n    $this->{name}->add({item});\n}}\n\nreturn $this;"
                )),
        );
        methods.push(
            Method::new(format!("remove{}", naming::ucfirst(&singular)))
                .parameter(Parameter::new(naming::lcfirst(&singular), target.class_name()))
                .returns("self")
                .body(format!(
                    "$this->{name}->removeElement({item});\n\nreturn $this;"
                )),
        );
        copy.push(format!("'{}' => $this->{}()->toArray(),", name, getter));
    } else {
        methods.push(
            Method::new(getter.as_str())
                .returns(target.class_name())
                .nullable_return()
                .body(format!("return $this->{};", name)),
        );
        methods.push(
            Method::new(naming::setter_name(name))
                .parameter(Parameter::new(name, target.class_name()).nullable())
                .returns("self")
                .body(format!("$this->{name} = ${name};\n\nreturn $this;")),
        );
        copy.push(format!("'{}' => $this->{}()?->getArrayCopy(),", name, getter));
    }
}

pub fn render(
    ctx: &Context,
    entity: &Component,
    fields: &[Field],
    relations: &[Relation],
) -> Result<String> {
    let repository = repository::component_for(ctx, entity);

    let mut file = ctx.class_file(entity);
    file.add_use(&repository)
        .add_use_as("Doctrine\\ORM\\Mapping", "ORM")
        .decorator(
            Attribute::new("ORM\\Entity")
                .argument(format!("repositoryClass: {}", repository.class_string())),
        )
        .decorator(
            Attribute::new("ORM\\Table").argument(format!("name: \"{}\"", entity.snake_case())),
        )
        .decorator(Attribute::new("ORM\\HasLifecycleCallbacks"))
        .extends(&ctx.app("Entity", "AbstractEntity"))
        .use_trait(&ctx.app("Entity", "TimestampsTrait"));

    let mut methods = Vec::new();
    let mut copy = vec!["'uuid' => $this->getUuid()->toString(),".to_string()];
    let mut initializers = Vec::new();

    for field in fields {
        add_field(&mut file, field, &mut methods, &mut copy);
    }
    for relation in relations {
        add_relation(&mut file, entity, relation, &mut methods, &mut copy, &mut initializers);
    }
    copy.push("'created' => $this->getCreated(),".to_string());
    copy.push("'updated' => $this->getUpdated(),".to_string());

    let mut constructor_body = vec!["parent::__construct();".to_string()];
    if !initializers.is_empty() {
        constructor_body.push(initializers.join("\n"));
    }
    constructor_body.push("$this->created();".to_string());
    file.constructor(Constructor::new().body(constructor_body.join("\n\n")));

    for method in methods {
        file.method(method);
    }

    let entries: Vec<String> = copy.iter().map(|line| format!("    {}", line)).collect();
    file.method(
        Method::new("getArrayCopy")
            .returns("array")
            .body(format!("return [\n{}\n];", entries.join("\n"))),
    );

    finish(&file)
}

pub fn plan(
    ctx: &Context,
    entity: &Component,
    fields: &[Field],
    relations: &[Relation],
    plan: &mut Plan,
) -> Result<()> {
    plan.push(
        ctx,
        ComponentKind::Entity,
        entity,
        render(ctx, entity, fields, relations)?,
        false,
    );
    repository::link(ctx, entity, plan)
}
