//! PSR-15 request handlers
//!
//! The handler's behavior is read from its class name: `GetBookStoreCollectionHandler`
//! lists, `PostBookStoreHandler` creates, and so on. Names that match no pattern get
//! a placeholder body.

use super::{absolute, collection, factory, finish, without_suffix, ComponentKind, Context, Plan};
use crate::code::{Attribute, Constructor, Inject, Method, Parameter, Property};
use crate::component::Component;
use crate::error::Result;
use crate::naming;
use crate::stub::placeholders;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerVariant {
    GetCollection(String),
    GetResource(String),
    Post(String),
    Patch(String),
    Put(String),
    Delete(String),
    Plain,
}

/// `prefix` followed by a capitalized word
fn strip_verb<'a>(name: &'a str, verb: &str) -> Option<&'a str> {
    name.strip_prefix(verb)
        .filter(|rest| rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()))
}

impl HandlerVariant {
    pub fn detect(class_name: &str) -> Self {
        let stem = without_suffix(class_name, ComponentKind::Handler.suffix());

        if let Some(rest) = strip_verb(stem, "Get") {
            if let Some(resource) = rest.strip_suffix("Collection").filter(|r| !r.is_empty()) {
                return HandlerVariant::GetCollection(resource.to_string());
            }
            let resource = rest
                .strip_suffix("Resource")
                .filter(|r| !r.is_empty())
                .unwrap_or(rest);
            return HandlerVariant::GetResource(resource.to_string());
        }
        if let Some(resource) = strip_verb(stem, "Post") {
            return HandlerVariant::Post(resource.to_string());
        }
        if let Some(resource) = strip_verb(stem, "Patch") {
            return HandlerVariant::Patch(resource.to_string());
        }
        if let Some(resource) = strip_verb(stem, "Put") {
            return HandlerVariant::Put(resource.to_string());
        }
        if let Some(resource) = strip_verb(stem, "Delete") {
            return HandlerVariant::Delete(resource.to_string());
        }
        HandlerVariant::Plain
    }

    /// Entity class name the handler works on
    pub fn resource(&self) -> Option<&str> {
        match self {
            HandlerVariant::GetCollection(r)
            | HandlerVariant::GetResource(r)
            | HandlerVariant::Post(r)
            | HandlerVariant::Patch(r)
            | HandlerVariant::Put(r)
            | HandlerVariant::Delete(r) => Some(r),
            HandlerVariant::Plain => None,
        }
    }

    pub fn http_method(&self) -> &'static str {
        match self {
            HandlerVariant::GetCollection(_) | HandlerVariant::GetResource(_) | HandlerVariant::Plain => "get",
            HandlerVariant::Post(_) => "post",
            HandlerVariant::Patch(_) => "patch",
            HandlerVariant::Put(_) => "put",
            HandlerVariant::Delete(_) => "delete",
        }
    }

    fn action(&self) -> &'static str {
        match self {
            HandlerVariant::GetCollection(_) => "list",
            HandlerVariant::GetResource(_) | HandlerVariant::Plain => "view",
            HandlerVariant::Post(_) => "create",
            HandlerVariant::Patch(_) => "update",
            HandlerVariant::Put(_) => "replace",
            HandlerVariant::Delete(_) => "delete",
        }
    }

    /// Whether the route addresses a single resource by uuid
    fn targets_resource(&self) -> bool {
        !matches!(
            self,
            HandlerVariant::GetCollection(_) | HandlerVariant::Post(_) | HandlerVariant::Plain
        )
    }
}

/// Service interface injected into a handler, if its name carries a resource
pub fn service_for(ctx: &Context, handler: &Component) -> Option<Component> {
    HandlerVariant::detect(handler.class_name())
        .resource()
        .map(|resource| service_interface(ctx, resource))
}

fn service_interface(ctx: &Context, resource: &str) -> Component {
    let sub: [&str; 0] = [];
    ctx.component(
        ComponentKind::Interface,
        &sub,
        &format!("{}ServiceInterface", resource),
    )
}

fn body(variant: &HandlerVariant, entity: &Component, service: &str, collection: Option<&Component>) -> String {
    let variable = entity.variable();
    let find = format!(
        "{} = $this->{}->{}($request->getAttribute('uuid'));",
        variable,
        service,
        entity.finder_name()
    );

    match variant {
        HandlerVariant::GetCollection(_) => format!(
            "return $this->createResponse(\n    $request,\n    new {}($this->{}->{}($request->getQueryParams()))\n);",
            collection.map(Component::class_name).unwrap_or_default(),
            service,
            entity.collection_getter_name()
        ),
        HandlerVariant::GetResource(_) => {
            format!("{}\n\nreturn $this->createResponse($request, {});", find, variable)
        }
        HandlerVariant::Post(_) => format!(
            "{} = $this->{}->{}((array) $request->getParsedBody());\n\nreturn $this->createdResponse($request, {});",
            variable,
            service,
            entity.save_name(),
            variable
        ),
        HandlerVariant::Patch(_) | HandlerVariant::Put(_) => format!(
            "{}\n{} = $this->{}->{}((array) $request->getParsedBody(), {});\n\nreturn $this->createResponse($request, {});",
            find,
            variable,
            service,
            entity.save_name(),
            variable,
            variable
        ),
        HandlerVariant::Delete(_) => format!(
            "{}\n\n$this->{}->{}({});\n\nreturn $this->noContentResponse();",
            find,
            service,
            entity.delete_name(),
            variable
        ),
        HandlerVariant::Plain => String::new(),
    }
}

pub fn render(ctx: &Context, handler: &Component) -> Result<String> {
    let variant = HandlerVariant::detect(handler.class_name());

    let mut file = ctx.class_file(handler);
    file.add_use(&Component::from_fqcn("Psr\\Http\\Message\\ResponseInterface"))
        .add_use(&Component::from_fqcn("Psr\\Http\\Message\\ServerRequestInterface"))
        .extends(&ctx.app("Handler", "AbstractHandler"));

    let mut handle = Method::new("handle")
        .parameter(Parameter::new("request", "ServerRequestInterface"))
        .returns("ResponseInterface");

    match variant.resource() {
        Some(resource) => {
            let sub: [&str; 0] = [];
            let entity = ctx.component(ComponentKind::Entity, &sub, resource);
            let service = service_interface(ctx, resource);
            let collection = match variant {
                HandlerVariant::GetCollection(_) => Some(collection::component_for(ctx, resource)),
                _ => None,
            };

            let subject = collection.as_ref().unwrap_or(&entity);
            file.add_use(&ctx.app("Attribute", "Resource"))
                .add_use(subject)
                .decorator(
                    Attribute::new("Resource").argument(format!("entity: {}", subject.class_string())),
                )
                .add_use(&service);

            let mut constructor = Constructor::new()
                .promote(Property::new(service.property_name(), service.class_name()));
            if ctx.is_annotated() {
                file.add_use(&Component::from_fqcn(Inject::FQCN));
                constructor = constructor.inject(Inject::new().argument(service.class_string()));
            }
            file.constructor(constructor);

            handle = handle.body(body(
                &variant,
                &entity,
                &service.property_name(),
                collection.as_ref(),
            ));
        }
        None => {
            handle = handle.body("// Handle the request\n\nreturn $this->noContentResponse();");
        }
    }

    file.method(handle);
    finish(&file)
}

pub fn plan(ctx: &Context, handler: &Component, plan: &mut Plan) -> Result<()> {
    let variant = HandlerVariant::detect(handler.class_name());
    plan.push(ctx, ComponentKind::Handler, handler, render(ctx, handler)?, false);

    if let HandlerVariant::GetCollection(resource) = &variant {
        collection::link(ctx, &collection::component_for(ctx, resource), plan)?;
    }

    let dependencies: Vec<Component> = service_for(ctx, handler).into_iter().collect();
    factory::link(ctx, ComponentKind::Handler, handler, &dependencies, plan)?;

    let stem = without_suffix(handler.class_name(), ComponentKind::Handler.suffix());
    let slug = naming::to_kebab_case(variant.resource().unwrap_or(stem));
    let path = if variant.targets_resource() {
        format!("/{}/{{uuid}}", slug)
    } else {
        format!("/{}", slug)
    };
    plan.instruct(ctx.render_stub(
        "route.stub",
        &placeholders([
            ("ROUTES_DELEGATOR", ctx.routes_delegator()),
            ("HTTP_METHOD", variant.http_method().to_string()),
            ("ROUTE_PATH", path),
            ("CLASS", absolute(handler)),
            ("ROUTE_NAME", format!("{}::{}-{}", slug, variant.action(), slug)),
        ]),
    )?);

    Ok(())
}
