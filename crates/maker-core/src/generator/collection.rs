//! Resource collections, rendered from `collection.stub`

use super::{ComponentKind, Context, Plan};
use crate::component::Component;
use crate::error::Result;
use crate::stub::placeholders;

const STUB: &str = "collection.stub";

/// `Collection\BookStoreCollection` for resource `BookStore`
pub fn component_for(ctx: &Context, resource: &str) -> Component {
    let sub: [&str; 0] = [];
    ctx.component(
        ComponentKind::Collection,
        &sub,
        &format!("{}{}", resource, ComponentKind::Collection.suffix()),
    )
}

pub fn render(ctx: &Context, collection: &Component) -> Result<String> {
    ctx.stubs().render(
        STUB,
        &placeholders([
            ("NAMESPACE", collection.namespace().to_string()),
            ("APP_NAMESPACE", ctx.app_namespace().to_string()),
            ("CLASS_NAME", collection.class_name().to_string()),
        ]),
    )
}

pub(crate) fn link(ctx: &Context, collection: &Component, plan: &mut Plan) -> Result<()> {
    let contents = render(ctx, collection)?;
    plan.push(ctx, ComponentKind::Collection, collection, contents, true);
    Ok(())
}

pub fn plan(ctx: &Context, collection: &Component, plan: &mut Plan) -> Result<()> {
    let contents = render(ctx, collection)?;
    plan.push(ctx, ComponentKind::Collection, collection, contents, false);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::{context, module};
    use crate::stub::StubRenderer;
    use tempfile::TempDir;

    #[test]
    fn test_render_bundled_collection() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, false);
        let collection = component_for(&ctx, "BookStore");

        let expected = r#"<?php

declare(strict_types=1);

namespace Api\Book\Collection;

use Api\App\Collection\ResourceCollection;

class BookStoreCollection extends ResourceCollection
{
}
"#;
        assert_eq!(render(&ctx, &collection).unwrap(), expected);
    }

    #[test]
    fn test_project_stub_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(STUB), "{{NAMESPACE}}\\{{CLASS_NAME}} {{UNKNOWN}}").unwrap();

        let module = module();
        let stubs = StubRenderer::new(Some(dir.path().to_path_buf()));
        let ctx = context(&module, &stubs, false);
        let collection = component_for(&ctx, "BookStore");

        assert_eq!(
            render(&ctx, &collection).unwrap(),
            "Api\\Book\\Collection\\BookStoreCollection {{UNKNOWN}}"
        );
    }
}
