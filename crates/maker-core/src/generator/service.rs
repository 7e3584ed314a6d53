//! Services and their interfaces
//!
//! A service wraps the entity's repository. The service class and its interface are
//! built from one operation list so the two can never drift apart.

use super::{absolute, factory, finish, with_suffix, without_suffix, ComponentKind, Context, Plan};
use crate::code::{Constructor, Declaration, Inject, Method, Parameter, Property};
use crate::component::Component;
use crate::error::Result;
use crate::stub::placeholders;

/// One public service method
struct Operation {
    name: String,
    parameters: Vec<Parameter>,
    returns: String,
    doc: Option<&'static str>,
    body: String,
}

impl Operation {
    fn method(&self) -> Method {
        let mut method = Method::new(self.name.as_str()).returns(self.returns.as_str());
        for parameter in &self.parameters {
            method = method.parameter(parameter.clone());
        }
        if let Some(doc) = self.doc {
            method = method.doc(doc);
        }
        method.body(self.body.as_str())
    }

    fn declaration(&self) -> Declaration {
        let mut declaration = Declaration::new(self.name.as_str()).returns(self.returns.as_str());
        for parameter in &self.parameters {
            declaration = declaration.parameter(parameter.clone());
        }
        if let Some(doc) = self.doc {
            declaration = declaration.doc(doc);
        }
        declaration
    }
}

fn operations(entity: &Component, repository: &Component) -> Vec<Operation> {
    let class = entity.class_name();
    let variable = entity.variable();
    let field = format!("$this->{}", repository.property_name());

    vec![
        Operation {
            name: entity.delete_name(),
            parameters: vec![Parameter::new(entity.property_name(), class)],
            returns: "void".to_string(),
            doc: None,
            body: format!("{}->deleteResource({});", field, variable),
        },
        Operation {
            name: entity.finder_name(),
            parameters: vec![Parameter::new("uuid", "string")],
            returns: class.to_string(),
            doc: Some("@throws NotFoundException"),
            body: format!(
                "{variable} = {field}->find($uuid);\n\
                 if (! {variable} instanceof {class}) {{\n    \
                 throw new NotFoundException(sprintf('{class} with uuid \"%s\" not found.', $uuid));\n\
                 }}\n\n\
                 return {variable};"
            ),
        },
        Operation {
            name: entity.collection_getter_name(),
            parameters: vec![Parameter::new("params", "array").default_value("[]")],
            returns: "QueryBuilder".to_string(),
            doc: None,
            body: format!(
                "return {}->{}($params);",
                field,
                entity.collection_getter_name()
            ),
        },
        Operation {
            name: "getRepository".to_string(),
            parameters: Vec::new(),
            returns: repository.class_name().to_string(),
            doc: None,
            body: format!("return {};", field),
        },
        Operation {
            name: entity.save_name(),
            parameters: vec![
                Parameter::new("data", "array"),
                Parameter::new(entity.property_name(), class)
                    .nullable()
                    .default_value("null"),
            ],
            returns: class.to_string(),
            doc: None,
            body: format!(
                "if (! {variable} instanceof {class}) {{\n    \
                 {variable} = new {class}();\n\
                 }}\n\n\
                 {variable}->exchangeArray($data);\n\n\
                 {field}->saveResource({variable});\n\n\
                 return {variable};"
            ),
        },
    ]
}

/// Entity wrapped by a service: `BookStoreService` wraps `BookStore`
pub fn entity_for(ctx: &Context, service: &Component) -> Component {
    let sub = ctx.sub_namespace(ComponentKind::Service, service);
    ctx.component(ComponentKind::Entity, &sub, stem(service))
}

pub fn repository_for(ctx: &Context, service: &Component) -> Component {
    let sub = ctx.sub_namespace(ComponentKind::Service, service);
    ctx.component(
        ComponentKind::Repository,
        &sub,
        &with_suffix(stem(service), ComponentKind::Repository.suffix()),
    )
}

/// `Service\BookStoreServiceInterface` for `Service\BookStoreService`
pub fn interface_for(service: &Component) -> Component {
    service.sibling(with_suffix(
        service.class_name(),
        ComponentKind::Interface.suffix(),
    ))
}

fn stem(service: &Component) -> &str {
    let name = without_suffix(service.class_name(), ComponentKind::Interface.suffix());
    without_suffix(name, ComponentKind::Service.suffix())
}

pub fn render(ctx: &Context, service: &Component) -> Result<String> {
    let entity = entity_for(ctx, service);
    let repository = repository_for(ctx, service);
    let interface = interface_for(service);

    let mut file = ctx.class_file(service);
    file.add_use(&ctx.app("Exception", "NotFoundException"))
        .add_use(&entity)
        .add_use(&Component::from_fqcn("Doctrine\\ORM\\QueryBuilder"))
        .add_function_use("sprintf")
        .implements(&interface);

    let mut constructor = Constructor::new().promote(Property::new(
        repository.property_name(),
        repository.class_name(),
    ));
    if ctx.is_annotated() {
        file.add_use(&Component::from_fqcn(Inject::FQCN));
        constructor = constructor.inject(Inject::new().argument(repository.class_string()));
    }
    file.add_use(&repository).constructor(constructor);

    for operation in operations(&entity, &repository) {
        file.method(operation.method());
    }

    finish(&file)
}

pub fn render_interface(ctx: &Context, interface: &Component) -> Result<String> {
    let entity = entity_for(ctx, interface);
    let repository = repository_for(ctx, interface);

    let mut file = ctx.interface_file(interface);
    file.add_use(&ctx.app("Exception", "NotFoundException"))
        .add_use(&entity)
        .add_use(&repository)
        .add_use(&Component::from_fqcn("Doctrine\\ORM\\QueryBuilder"));

    for operation in operations(&entity, &repository) {
        file.declaration(operation.declaration());
    }

    Ok(file.render())
}

pub fn plan(ctx: &Context, service: &Component, plan: &mut Plan) -> Result<()> {
    plan.push(ctx, ComponentKind::Service, service, render(ctx, service)?, false);

    let interface = interface_for(service);
    plan.push(
        ctx,
        ComponentKind::Interface,
        &interface,
        render_interface(ctx, &interface)?,
        true,
    );
    plan.instruct(ctx.render_stub(
        "alias-registration.stub",
        &placeholders([
            ("CONFIG_PROVIDER", ctx.config_provider()),
            ("INTERFACE", absolute(&interface)),
            ("CLASS", absolute(service)),
        ]),
    )?);

    factory::link(
        ctx,
        ComponentKind::Service,
        service,
        &[repository_for(ctx, service)],
        plan,
    )
}
