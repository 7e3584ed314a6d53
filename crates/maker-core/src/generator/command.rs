//! Symfony console commands

use super::{absolute, factory, finish, without_suffix, ComponentKind, Context, Plan};
use crate::code::{Attribute, Constructor, Inject, Method, Parameter, Property, Visibility};
use crate::component::Component;
use crate::error::Result;
use crate::naming;
use crate::stub::placeholders;

fn stem(command: &Component) -> &str {
    without_suffix(command.class_name(), ComponentKind::Command.suffix())
}

/// `book:book-store-import` for `BookStoreImportCommand` in module `Book`
pub fn command_name(ctx: &Context, command: &Component) -> String {
    format!(
        "{}:{}",
        naming::to_kebab_case(ctx.module().name()),
        naming::to_kebab_case(stem(command))
    )
}

/// `Book store import`
fn description(command: &Component) -> String {
    naming::to_sentence_case(stem(command))
}

pub fn service_for(ctx: &Context, command: &Component) -> Option<Component> {
    ctx.existing_service(stem(command))
}

pub fn render(ctx: &Context, command: &Component) -> Result<String> {
    let name = command_name(ctx, command);
    let description = description(command);

    let mut file = ctx.class_file(command);
    file.add_use(&Component::from_fqcn("Symfony\\Component\\Console\\Attribute\\AsCommand"))
        .add_use(&Component::from_fqcn("Symfony\\Component\\Console\\Input\\InputInterface"))
        .add_use(&Component::from_fqcn("Symfony\\Component\\Console\\Output\\OutputInterface"))
        .add_use(&Component::from_fqcn("Symfony\\Component\\Console\\Style\\SymfonyStyle"))
        .add_function_use("sprintf")
        .decorator(
            Attribute::new("AsCommand")
                .argument(format!("name: '{}'", name))
                .argument(format!("description: '{}'", description)),
        )
        .extends(&Component::from_fqcn("Symfony\\Component\\Console\\Command\\Command"));

    let service = service_for(ctx, command);
    let report = match &service {
        Some(service) => {
            let resource = without_suffix(service.class_name(), "ServiceInterface");
            let entity = ctx.component(ComponentKind::Entity, &[] as &[&str], resource);
            let mut constructor = Constructor::new()
                .promote(Property::new(service.property_name(), service.class_name()))
                .body("parent::__construct();");
            if ctx.is_annotated() {
                file.add_use(&Component::from_fqcn(Inject::FQCN));
                constructor = constructor.inject(Inject::new().argument(service.class_string()));
            }
            file.add_use(service)
                .add_function_use("count")
                .constructor(constructor);

            format!(
                "{} = $this->{}->{}()->getQuery()->getResult();\n$io->success(sprintf('Processed %d {}.', count({})));",
                entity.collection_variable(),
                service.property_name(),
                entity.collection_getter_name(),
                naming::to_kebab_case(&entity.class_name_plural()).replace('-', " "),
                entity.collection_variable()
            )
        }
        None => "$io->success(sprintf('%s finished.', (string) $this->getName()));".to_string(),
    };

    file.method(
        Method::new("configure")
            .visibility(Visibility::Protected)
            .returns("void")
            .body(format!("$this->setHelp('{}.');", description)),
    )
    .method(
        Method::new("execute")
            .visibility(Visibility::Protected)
            .parameter(Parameter::new("input", "InputInterface"))
            .parameter(Parameter::new("output", "OutputInterface"))
            .returns("int")
            .body(format!(
                "$io = new SymfonyStyle($input, $output);\n\n{}\n\nreturn Command::SUCCESS;",
                report
            )),
    );

    finish(&file)
}

pub fn plan(ctx: &Context, command: &Component, plan: &mut Plan) -> Result<()> {
    plan.push(ctx, ComponentKind::Command, command, render(ctx, command)?, false);

    let dependencies: Vec<Component> = service_for(ctx, command).into_iter().collect();
    factory::link(ctx, ComponentKind::Command, command, &dependencies, plan)?;

    plan.instruct(ctx.render_stub(
        "command-registration.stub",
        &placeholders([
            ("COMMAND_NAME", command_name(ctx, command)),
            ("CLASS", absolute(command)),
        ]),
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
    fn test_plain_command() {
        let dir = TempDir::new().unwrap();
        let module = Module::new("Api\\Book\\", dir.path());
        let stubs = StubRenderer::bundled();
        let ctx = Context::new(&module, &MakerConfig::default(), &stubs, false);
        let command = Component::new("Api\\Book\\Command", "BookStoreImportCommand");

        let expected = r#"<?php

declare(strict_types=1);

namespace Api\Book\Command;

use Symfony\Component\Console\Attribute\AsCommand;
use Symfony\Component\Console\Command\Command;
use Symfony\Component\Console\Input\InputInterface;
use Symfony\Component\Console\Output\OutputInterface;
use Symfony\Component\Console\Style\SymfonyStyle;

use function sprintf;

#[AsCommand(name: 'book:book-store-import', description: 'Book store import')]
class BookStoreImportCommand extends Command
{
    protected function configure(): void
    {
        $this->setHelp('Book store import.');
    }

    protected function execute(InputInterface $input, OutputInterface $output): int
    {
        $io = new SymfonyStyle($input, $output);

        $io->success(sprintf('%s finished.', (string) $this->getName()));

        return Command::SUCCESS;
    }
}
"#;
        assert_eq!(render(&ctx, &command).unwrap(), expected);
    }

    #[test]
    fn test_command_with_service() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("Service")).unwrap();
        std::fs::write(dir.path().join("Service/BookStoreServiceInterface.php"), "<?php\n").unwrap();

        let module = Module::new("Api\\Book\\", dir.path());
        let stubs = StubRenderer::bundled();
        let ctx = Context::new(&module, &MakerConfig::default(), &stubs, false);
        let command = Component::new("Api\\Book\\Command", "BookStoreImportCommand");

        let mut plan = Plan::default();
        super::plan(&ctx, &command, &mut plan).unwrap();

        let rendered = &plan.primary().unwrap().contents;
        assert!(rendered.contains("use function count;\nuse function sprintf;\n"));
        assert!(rendered.contains(
            "        protected BookStoreServiceInterface $bookStoreService,\n    ) {\n        parent::__construct();\n    }\n"
        ));
        assert!(rendered.contains(
            "        $bookStores = $this->bookStoreService->getBookStores()->getQuery()->getResult();\n        $io->success(sprintf('Processed %d book stores.', count($bookStores)));\n"
        ));
        assert!(plan
            .instructions
            .iter()
            .any(|i| i.contains("'book:book-store-import' => \\Api\\Book\\Command\\BookStoreImportCommand::class,")));
    }
}
