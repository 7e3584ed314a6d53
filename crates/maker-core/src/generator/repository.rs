//! Doctrine repositories

use super::{factory, finish, without_suffix, ComponentKind, Context, Plan};
use crate::code::{Attribute, Method, Parameter};
use crate::component::Component;
use crate::error::Result;

/// Entity managed by `repository`: `Repository\BookStoreRepository` manages `Entity\BookStore`
pub fn entity_for(ctx: &Context, repository: &Component) -> Component {
    let sub = ctx.sub_namespace(ComponentKind::Repository, repository);
    ctx.component(
        ComponentKind::Entity,
        &sub,
        without_suffix(repository.class_name(), ComponentKind::Repository.suffix()),
    )
}

/// Repository that belongs to `entity`
pub fn component_for(ctx: &Context, entity: &Component) -> Component {
    let sub = ctx.sub_namespace(ComponentKind::Entity, entity);
    ctx.component(
        ComponentKind::Repository,
        &sub,
        &format!("{}{}", entity.class_name(), ComponentKind::Repository.suffix()),
    )
}

pub fn render(ctx: &Context, repository: &Component, entity: &Component) -> Result<String> {
    let mut file = ctx.class_file(repository);
    file.add_use(entity)
        .add_use(&Component::from_fqcn("Doctrine\\ORM\\QueryBuilder"))
        .doc(&format!("@extends AbstractRepository<{}>", entity.class_name()))
        .extends(&ctx.app("Repository", "AbstractRepository"));

    if ctx.is_annotated() {
        file.add_use(&Component::from_fqcn("Dot\\DependencyInjection\\Attribute\\Entity"))
            .decorator(
                Attribute::new("Entity").argument(format!("name: {}", entity.class_string())),
            );
    }

    let alias = entity.snake_case();
    file.method(
        Method::new(entity.collection_getter_name())
            .parameter(Parameter::new("params", "array").default_value("[]"))
            .parameter(Parameter::new("filters", "array").default_value("[]"))
            .returns("QueryBuilder")
            .body(format!(
                "return $this->getQueryBuilder()\n    ->select('{alias}')\n    ->from({}, '{alias}');",
                entity.class_string(),
            )),
    );

    finish(&file)
}

/// Repository plus its factory, attached to an entity plan
pub(crate) fn link(ctx: &Context, entity: &Component, plan: &mut Plan) -> Result<()> {
    let repository = component_for(ctx, entity);
    let contents = render(ctx, &repository, entity)?;
    plan.push(ctx, ComponentKind::Repository, &repository, contents, true);
    factory::link(
        ctx,
        ComponentKind::Repository,
        &repository,
        &[entity.clone()],
        plan,
    )
}

pub fn plan(ctx: &Context, repository: &Component, plan: &mut Plan) -> Result<()> {
    let entity = entity_for(ctx, repository);
    let contents = render(ctx, repository, &entity)?;
    plan.push(ctx, ComponentKind::Repository, repository, contents, false);
    factory::link(ctx, ComponentKind::Repository, repository, &[entity], plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tests::{context, module};
    use crate::stub::StubRenderer;

    #[test]
    fn test_render_repository() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, false);
        let entity = Component::new("Api\\Book\\Entity", "BookStore");
        let repository = component_for(&ctx, &entity);
        assert_eq!(repository.fqcn(), "Api\\Book\\Repository\\BookStoreRepository");
        assert_eq!(entity_for(&ctx, &repository), entity);

        let expected = r#"<?php

declare(strict_types=1);

namespace Api\Book\Repository;

use Api\App\Repository\AbstractRepository;
use Api\Book\Entity\BookStore;
use Doctrine\ORM\QueryBuilder;

/**
 * @extends AbstractRepository<BookStore>
 */
class BookStoreRepository extends AbstractRepository
{
    public function getBookStores(array $params = [], array $filters = []): QueryBuilder
    {
        return $this->getQueryBuilder()
            ->select('book_store')
            ->from(BookStore::class, 'book_store');
    }
}
"#;
        assert_eq!(render(&ctx, &repository, &entity).unwrap(), expected);
    }

    #[test]
    fn test_annotated_repository() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, true);
        let repository = Component::new("Api\\Book\\Repository", "BookStoreRepository");

        let mut plan = Plan::default();
        super::plan(&ctx, &repository, &mut plan).unwrap();

        let rendered = &plan.primary().unwrap().contents;
        assert!(rendered.contains("use Dot\\DependencyInjection\\Attribute\\Entity;"));
        assert!(rendered.contains(" */\n#[Entity(name: BookStore::class)]\nclass BookStoreRepository"));
        assert_eq!(plan.artifacts.len(), 1);
    }

    #[test]
    fn test_plan_links_factory() {
        let module = module();
        let stubs = StubRenderer::bundled();
        let ctx = context(&module, &stubs, false);
        let repository = Component::new("Api\\Book\\Repository", "BookStoreRepository");

        let mut plan = Plan::default();
        super::plan(&ctx, &repository, &mut plan).unwrap();

        let factory = plan.artifact(ComponentKind::Factory).unwrap();
        assert!(factory.linked);
        assert_eq!(factory.component.class_name(), "BookStoreRepositoryFactory");
    }
}
