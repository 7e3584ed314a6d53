//! Container factories
//!
//! A factory always belongs to exactly one owner component. Its `__invoke` body
//! depends on the owner kind: repositories are fetched from the entity manager,
//! interfaces delegate to their implementation, everything else is constructed with
//! its dependencies pulled from the container.

use super::{
    absolute, command, finish, handler, middleware, repository, service, with_suffix,
    without_suffix, ComponentKind, Context, Plan,
};
use crate::code::{Method, Parameter};
use crate::component::Component;
use crate::error::Result;
use crate::stub::placeholders;

const ATTRIBUTED_SERVICE_FACTORY: &str = "\\Dot\\DependencyInjection\\Factory\\AttributedServiceFactory";
const ATTRIBUTED_REPOSITORY_FACTORY: &str =
    "\\Dot\\DependencyInjection\\Factory\\AttributedRepositoryFactory";

/// `Factory\<sub>\<Owner>Factory`
pub fn component_for(ctx: &Context, owner_kind: ComponentKind, owner: &Component) -> Component {
    let sub = ctx.sub_namespace(owner_kind, owner);
    ctx.component(
        ComponentKind::Factory,
        &sub,
        &with_suffix(owner.class_name(), ComponentKind::Factory.suffix()),
    )
}

/// Constructor dependencies the owner's generator would inject
pub fn dependencies(ctx: &Context, owner_kind: ComponentKind, owner: &Component) -> Vec<Component> {
    match owner_kind {
        ComponentKind::Repository => vec![repository::entity_for(ctx, owner)],
        ComponentKind::Service => vec![service::repository_for(ctx, owner)],
        ComponentKind::Handler => handler::service_for(ctx, owner).into_iter().collect(),
        ComponentKind::Middleware => middleware::service_for(ctx, owner).into_iter().collect(),
        ComponentKind::Command => command::service_for(ctx, owner).into_iter().collect(),
        _ => Vec::new(),
    }
}

pub fn render(
    ctx: &Context,
    factory: &Component,
    owner_kind: ComponentKind,
    owner: &Component,
    dependencies: &[Component],
) -> Result<String> {
    let mut file = ctx.class_file(factory);
    file.add_use(&Component::from_fqcn("Psr\\Container\\ContainerInterface"))
        .add_use(&Component::from_fqcn("Psr\\Container\\ContainerExceptionInterface"))
        .add_use(&Component::from_fqcn("Psr\\Container\\NotFoundExceptionInterface"))
        .add_use(owner);

    let body = match owner_kind {
        ComponentKind::Repository => {
            file.add_use(&Component::from_fqcn("Doctrine\\ORM\\EntityManagerInterface"))
                .add_function_use("assert");
            let entity = match dependencies.first() {
                Some(entity) => entity.clone(),
                None => repository::entity_for(ctx, owner),
            };
            file.add_use(&entity);
            format!(
                "$repository = $container->get(EntityManagerInterface::class)->getRepository({});\n\
                 assert($repository instanceof {});\n\n\
                 return $repository;",
                entity.class_string(),
                owner.class_name()
            )
        }
        ComponentKind::Interface => {
            let implementation = owner.sibling(without_suffix(owner.class_name(), "Interface"));
            file.add_use(&implementation);
            format!("return $container->get({});", implementation.class_string())
        }
        _ if dependencies.is_empty() => format!("return new {}();", owner.class_name()),
        _ => {
            let mut body = format!("return new {}(\n", owner.class_name());
            for dependency in dependencies {
                file.add_use(dependency);
                body.push_str(&format!(
                    "    $container->get({}),\n",
                    dependency.class_string()
                ));
            }
            body.push_str(");");
            body
        }
    };

    file.method(
        Method::new("__invoke")
            .doc("@throws ContainerExceptionInterface\n@throws NotFoundExceptionInterface")
            .parameter(Parameter::new("container", "ContainerInterface"))
            .returns(owner.class_name())
            .body(body),
    );

    finish(&file)
}

/// ConfigProvider `factories` entry for `owner`
fn registration(ctx: &Context, owner: &Component, factory: &str) -> Result<String> {
    ctx.render_stub(
        "factory-registration.stub",
        &placeholders([
            ("CONFIG_PROVIDER", ctx.config_provider()),
            ("CLASS", absolute(owner)),
            ("FACTORY", factory.to_string()),
        ]),
    )
}

/// Attach the owner's factory to `plan`.
///
/// In annotated mode no factory is generated and the owner is registered against the
/// attribute-driven factory instead.
pub fn link(
    ctx: &Context,
    owner_kind: ComponentKind,
    owner: &Component,
    dependencies: &[Component],
    plan: &mut Plan,
) -> Result<()> {
    if ctx.is_annotated() {
        let factory = match owner_kind {
            ComponentKind::Repository => ATTRIBUTED_REPOSITORY_FACTORY,
            _ => ATTRIBUTED_SERVICE_FACTORY,
        };
        plan.instruct(registration(ctx, owner, factory)?);
        return Ok(());
    }

    let factory = component_for(ctx, owner_kind, owner);
    let contents = render(ctx, &factory, owner_kind, owner, dependencies)?;
    plan.push(ctx, ComponentKind::Factory, &factory, contents, true);
    plan.instruct(registration(ctx, owner, &absolute(&factory))?);
    Ok(())
}

/// A factory requested on its own; the owner is derived from the factory name
pub fn plan(ctx: &Context, factory: &Component, plan: &mut Plan) -> Result<()> {
    let owner_name = without_suffix(factory.class_name(), ComponentKind::Factory.suffix());
    let owner_kind = ComponentKind::from_class_name(owner_name);
    let sub = ctx.sub_namespace(ComponentKind::Factory, factory);
    let owner = ctx.component(owner_kind, &sub, owner_name);
    let dependencies = dependencies(ctx, owner_kind, &owner);

    let contents = render(ctx, factory, owner_kind, &owner, &dependencies)?;
    plan.push(ctx, ComponentKind::Factory, factory, contents, false);
    plan.instruct(registration(ctx, &owner, &absolute(factory))?);
    Ok(())
}
