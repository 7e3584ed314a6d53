use maker_core::workflow::Status;
use maker_core::{ComponentKind, MakerError, Project, Request};
use std::fs;
use tempfile::TempDir;

const COMPOSER: &str = r#"{
    "name": "dotkernel/api",
    "autoload": {
        "psr-4": {
            "Api\\App\\": "src/App/src",
            "Api\\ModuleName\\": "src/ModuleName/src"
        }
    },
    "autoload-dev": {
        "psr-4": {
            "ApiTest\\Functional\\": "test/Functional/"
        }
    }
}"#;

const COLLECTION_HANDLER: &str = r#"<?php

declare(strict_types=1);

namespace Api\ModuleName\Handler\BookStore;

use Api\App\Attribute\Resource;
use Api\App\Handler\AbstractHandler;
use Api\ModuleName\Collection\BookStoreCollection;
use Api\ModuleName\Service\BookStoreServiceInterface;
use Psr\Http\Message\ResponseInterface;
use Psr\Http\Message\ServerRequestInterface;

#[Resource(entity: BookStoreCollection::class)]
class GetBookStoreCollectionHandler extends AbstractHandler
{
    public function __construct(
        protected BookStoreServiceInterface $bookStoreService,
    ) {
    }

    public function handle(ServerRequestInterface $request): ResponseInterface
    {
        return $this->createResponse(
            $request,
            new BookStoreCollection($this->bookStoreService->getBookStores($request->getQueryParams()))
        );
    }
}
"#;

fn project() -> (TempDir, Project) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("composer.json"), COMPOSER).unwrap();
    let project = Project::load(dir.path()).unwrap();
    (dir, project)
}

#[test]
fn test_resolve_module_from_composer() {
    let (dir, project) = project();

    let module = project
        .resolve("Api\\ModuleName\\Handler\\BookStore\\GetBookStoreCollectionHandler")
        .unwrap();
    assert_eq!(module.fqmn(), "Api\\ModuleName\\");
    assert_eq!(module.name(), "ModuleName");
    assert_eq!(module.path(), dir.path().join("src/ModuleName/src"));
}

#[test]
fn test_collection_handler_matches_fixture() {
    let (dir, project) = project();
    let request = Request::new(
        ComponentKind::Handler,
        "Api\\ModuleName\\Handler\\BookStore\\GetBookStoreCollectionHandler",
    );

    let plan = project.plan(&request, false).unwrap();
    let primary = plan.primary().unwrap();
    assert_eq!(primary.contents, COLLECTION_HANDLER);
    assert_eq!(
        primary.path,
        dir.path()
            .join("src/ModuleName/src/Handler/BookStore/GetBookStoreCollectionHandler.php")
    );

    let linked: Vec<ComponentKind> = plan.linked().map(|a| a.kind).collect();
    assert_eq!(linked, vec![ComponentKind::Collection, ComponentKind::Factory]);
    assert!(plan.instructions.iter().any(|i| i.contains(
        "$app->get('/book-store', \\Api\\ModuleName\\Handler\\BookStore\\GetBookStoreCollectionHandler::class, 'book-store::list-book-store');"
    )));
}

#[test]
fn test_generate_and_regenerate_entity() {
    let (dir, project) = project();
    let request = Request::new(ComponentKind::Entity, "Api\\ModuleName\\BookStore")
        .field(maker_core::Field::parse("title:string").unwrap());

    let plan = project.plan(&request, false).unwrap();
    let report = project.apply(&plan, false).unwrap();
    assert!(!report.has_failures());

    let module = dir.path().join("src/ModuleName/src");
    assert!(module.join("Entity/BookStore.php").is_file());
    assert!(module.join("Repository/BookStoreRepository.php").is_file());
    assert!(module.join("Factory/BookStoreRepositoryFactory.php").is_file());

    // A hand-edited repository survives regeneration of the entity
    fs::write(module.join("Repository/BookStoreRepository.php"), "<?php // edited\n").unwrap();
    assert!(matches!(
        project.apply(&plan, false),
        Err(MakerError::DuplicateComponent { .. })
    ));

    let report = project.apply(&plan, true).unwrap();
    assert_eq!(report.entries[0].status, Status::Overwritten);
    assert_eq!(
        fs::read_to_string(module.join("Repository/BookStoreRepository.php")).unwrap(),
        "<?php // edited\n"
    );
}

#[test]
fn test_annotated_service_skips_factory() {
    let (dir, project) = project();
    let request = Request::new(ComponentKind::Service, "Api\\ModuleName\\BookStore");

    let plan = project.plan(&request, true).unwrap();
    assert!(plan.artifact(ComponentKind::Factory).is_none());
    project.apply(&plan, false).unwrap();

    let service = fs::read_to_string(
        dir.path()
            .join("src/ModuleName/src/Service/BookStoreService.php"),
    )
    .unwrap();
    assert!(service.contains("use Dot\\DependencyInjection\\Attribute\\Inject;"));
}
