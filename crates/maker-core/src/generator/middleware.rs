//! PSR-15 middleware

use super::{absolute, factory, finish, without_suffix, ComponentKind, Context, Plan};
use crate::code::{Constructor, Inject, Method, Parameter, Property};
use crate::component::Component;
use crate::error::Result;
use crate::stub::placeholders;

/// Service interface to inject, only when one already exists in the module
pub fn service_for(ctx: &Context, middleware: &Component) -> Option<Component> {
    ctx.existing_service(without_suffix(
        middleware.class_name(),
        ComponentKind::Middleware.suffix(),
    ))
}

pub fn render(ctx: &Context, middleware: &Component) -> Result<String> {
    let mut file = ctx.class_file(middleware);
    file.add_use(&Component::from_fqcn("Psr\\Http\\Message\\ResponseInterface"))
        .add_use(&Component::from_fqcn("Psr\\Http\\Message\\ServerRequestInterface"))
        .add_use(&Component::from_fqcn("Psr\\Http\\Server\\RequestHandlerInterface"))
        .implements(&Component::from_fqcn("Psr\\Http\\Server\\MiddlewareInterface"));

    if let Some(service) = service_for(ctx, middleware) {
        let mut constructor = Constructor::new()
            .promote(Property::new(service.property_name(), service.class_name()));
        if ctx.is_annotated() {
            file.add_use(&Component::from_fqcn(Inject::FQCN));
            constructor = constructor.inject(Inject::new().argument(service.class_string()));
        }
        file.add_use(&service).constructor(constructor);
    }

    file.method(
        Method::new("process")
            .parameter(Parameter::new("request", "ServerRequestInterface"))
            .parameter(Parameter::new("handler", "RequestHandlerInterface"))
            .returns("ResponseInterface")
            .body("return $handler->handle($request);"),
    );

    finish(&file)
}

pub fn plan(ctx: &Context, middleware: &Component, plan: &mut Plan) -> Result<()> {
    plan.push(
        ctx,
        ComponentKind::Middleware,
        middleware,
        render(ctx, middleware)?,
        false,
    );

    let dependencies: Vec<Component> = service_for(ctx, middleware).into_iter().collect();
    factory::link(ctx, ComponentKind::Middleware, middleware, &dependencies, plan)?;

    plan.instruct(ctx.render_stub(
        "middleware-pipe.stub",
        &placeholders([("CLASS", absolute(middleware))]),
    )?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MakerConfig;
    use crate::module::Module;
    use crate::stub::StubRenderer;
    use tempfile::TempDir;

    #[test]
    fn test_middleware_without_service() {
        let dir = TempDir::new().unwrap();
        let module = Module::new("Api\\Book\\", dir.path());
        let stubs = StubRenderer::bundled();
        let ctx = Context::new(&module, &MakerConfig::default(), &stubs, false);
        let middleware = Component::new("Api\\Book\\Middleware", "BookStoreMiddleware");

        let expected = r#"<?php

declare(strict_types=1);

namespace Api\Book\Middleware;

use Psr\Http\Message\ResponseInterface;
use Psr\Http\Message\ServerRequestInterface;
use Psr\Http\Server\MiddlewareInterface;
use Psr\Http\Server\RequestHandlerInterface;

class BookStoreMiddleware implements MiddlewareInterface
{
    public function process(ServerRequestInterface $request, RequestHandlerInterface $handler): ResponseInterface
    {
        return $handler->handle($request);
    }
}
"#;
        assert_eq!(render(&ctx, &middleware).unwrap(), expected);
    }

    #[test]
    fn test_middleware_injects_existing_service() {
        let dir = TempDir::new().unwrap();
        let service_dir = dir.path().join("Service");
        std::fs::create_dir_all(&service_dir).unwrap();
        std::fs::write(service_dir.join("BookStoreServiceInterface.php"), "<?php\n").unwrap();

        let module = Module::new("Api\\Book\\", dir.path());
        let stubs = StubRenderer::bundled();
        let ctx = Context::new(&module, &MakerConfig::default(), &stubs, false);
        let middleware = Component::new("Api\\Book\\Middleware", "BookStoreAccessMiddleware");

        let mut plan = Plan::default();
        super::plan(&ctx, &middleware, &mut plan).unwrap();

        let rendered = &plan.primary().unwrap().contents;
        assert!(rendered.contains("use Api\\Book\\Service\\BookStoreServiceInterface;"));
        assert!(rendered.contains("        protected BookStoreServiceInterface $bookStoreService,\n"));

        let factory = plan.artifact(ComponentKind::Factory).unwrap();
        assert!(factory.contents.contains("$container->get(BookStoreServiceInterface::class),"));
        assert!(plan
            .instructions
            .iter()
            .any(|i| i.contains("$app->pipe(\\Api\\Book\\Middleware\\BookStoreAccessMiddleware::class);")));
    }
}
