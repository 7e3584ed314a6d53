//! Stand-alone interfaces
//!
//! `*ServiceInterface` names get the full service contract; any other name becomes an
//! empty interface.

use super::{factory, service, ComponentKind, Context, Plan};
use crate::component::Component;
use crate::error::Result;

pub fn is_service_interface(interface: &Component) -> bool {
    let name = interface.class_name();
    name.len() > "ServiceInterface".len() && name.ends_with("ServiceInterface")
}

pub fn render(ctx: &Context, interface: &Component) -> Result<String> {
    if is_service_interface(interface) {
        return service::render_interface(ctx, interface);
    }
    Ok(ctx.interface_file(interface).render())
}

pub fn plan(ctx: &Context, interface: &Component, plan: &mut Plan) -> Result<()> {
    plan.push(
        ctx,
        ComponentKind::Interface,
        interface,
        render(ctx, interface)?,
        false,
    );

    // The container resolves a service interface through a factory delegating to the
    // implementation
    if is_service_interface(interface) && !ctx.is_annotated() {
        factory::link(ctx, ComponentKind::Interface, interface, &[], plan)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::{context, module};
    use crate::stub::StubRenderer;

    #[test]
    fn test_plain_interface() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, false);
        let interface = Component::new("Api\\Book\\Contract", "SluggableInterface");

        let mut plan = Plan::default();
        super::plan(&ctx, &interface, &mut plan).unwrap();

        assert_eq!(plan.artifacts.len(), 1);
        assert!(plan.instructions.is_empty());
        assert_eq!(
            plan.artifacts[0].contents,
            "<?php\n\ndeclare(strict_types=1);\n\nnamespace Api\\Book\\Contract;\n\ninterface SluggableInterface\n{\n}\n"
        );
    }

    #[test]
    fn test_service_interface_links_factory() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, false);
        let interface = Component::new("Api\\Book\\Service", "BookStoreServiceInterface");

        let mut plan = Plan::default();
        super::plan(&ctx, &interface, &mut plan).unwrap();

        assert!(plan.primary().unwrap().contents.contains("public function getBookStores("));
        let factory = plan.artifact(ComponentKind::Factory).unwrap();
        assert_eq!(
            factory.component.fqcn(),
            "Api\\Book\\Factory\\BookStoreServiceInterfaceFactory"
        );
    }
}
