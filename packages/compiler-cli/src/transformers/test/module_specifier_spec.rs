use std::sync::Arc;

use crate::ngtsc::file_system::testing::MockFileSystem;
use crate::transformers::error::HostError;
use crate::transformers::module_resolution::FileExistence;
use crate::transformers::module_specifier::ModuleSpecifierResolver;
use crate::transformers::path_mapper::PathConfig;

fn resolver(
    base: &str,
    gen: &str,
    root_dirs: &[&str],
    files: &[(&str, &str)],
) -> ModuleSpecifierResolver {
    let config = PathConfig::new(base, gen)
        .unwrap()
        .with_root_dirs(root_dirs)
        .unwrap();
    ModuleSpecifierResolver::new(config, Arc::new(MockFileSystem::with_files(files)))
}

mod file_name_to_module_name_tests {
    use super::*;

    #[test]
    fn should_import_generated_siblings_relatively() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/src/app/widget.ngfactory.ts",
                "/proj/src/app/main.ngfactory.ts"
            ),
            "./widget.ngfactory"
        );
    }

    #[test]
    fn should_colocate_generated_dependency_files_by_marker() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/src/node_modules/@angular/core/core.ngfactory.ts",
                "/proj/src/app/main.ngfactory.ts"
            ),
            "../node_modules/@angular/core/core.ngfactory"
        );
    }

    #[test]
    fn should_import_dependency_files_by_package_path() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &[],
            &[("/proj/src/node_modules/@angular/core/index.d.ts", "")],
        );
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/src/node_modules/@angular/core/index.d.ts",
                "/proj/src/app/main.ngfactory.ts"
            ),
            "@angular/core/index"
        );
    }

    #[test]
    fn should_mirror_sources_into_a_sibling_gen_dir() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &[],
            &[("/proj/src/app/service.ts", "export class Service {}")],
        );
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/src/app/service.ts",
                "/proj/src/app/widget.ngfactory.ts"
            ),
            "./service"
        );
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/src/shared/util.ts",
                "/proj/src/app/widget.ngfactory.ts"
            ),
            "../shared/util"
        );
    }

    #[test]
    fn should_climb_out_of_a_nested_gen_dir_to_reach_sources() {
        let resolver = resolver("/proj", "/proj/gen", &[], &[("/proj/app/service.ts", "")]);
        assert_eq!(
            resolver.file_name_to_module_name(
                "/proj/app/service.ts",
                "/proj/app/widget.ngfactory.ts"
            ),
            "../../app/service"
        );
    }

    #[test]
    fn should_return_shallow_specifiers_verbatim() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);
        let containing = "/proj/src/app/main.ngfactory.ts";
        assert_eq!(resolver.file_name_to_module_name("rxjs", containing), "rxjs");
        assert_eq!(
            resolver.file_name_to_module_name("@angular/core", containing),
            "@angular/core"
        );
    }

    #[test]
    fn should_be_deterministic() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);
        let first = resolver.file_name_to_module_name(
            "/proj/src/lib/a.ngfactory.ts",
            "/proj/src/app/b.ngfactory.ts",
        );
        let second = resolver.file_name_to_module_name(
            "/proj/src/lib/a.ngfactory.ts",
            "/proj/src/app/b.ngfactory.ts",
        );
        assert_eq!(first, "../lib/a.ngfactory");
        assert_eq!(first, second);
    }

    #[test]
    fn should_plan_imported_files_that_are_not_written_yet() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[("/proj/src/app/a.ts", "")]);

        resolver.file_name_to_module_name("/proj/src/app/a.ts", "/proj/src/app/m.ngfactory.ts");
        resolver.file_name_to_module_name(
            "/proj/src/app/a.ngfactory.ts",
            "/proj/src/app/m.ngfactory.ts",
        );

        assert_eq!(resolver.planned_outputs().len(), 1);
        assert_eq!(
            resolver.file_existence("/proj/src/app/a.ngfactory.ts"),
            Some(FileExistence::Planned)
        );
        assert_eq!(
            resolver.file_existence("/proj/src/app/a.ts"),
            Some(FileExistence::OnDisk)
        );
    }
}

mod module_name_to_file_name_tests {
    use super::*;

    #[test]
    fn should_reject_relative_specifiers_without_containing_file() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);

        let err = resolver.module_name_to_file_name("./a", None).unwrap_err();
        assert!(matches!(err, HostError::RelativeWithoutContainingFile { .. }));
        assert!(resolver.module_name_to_file_name("../a", Some("")).is_err());
    }

    #[test]
    fn should_resolve_bare_specifiers_from_the_base_path() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &[],
            &[("/proj/src/node_modules/lib/index.d.ts", "")],
        );
        assert_eq!(
            resolver.module_name_to_file_name("lib", None).unwrap().as_deref(),
            Some("/proj/src/node_modules/lib/index.d.ts")
        );
    }

    #[test]
    fn should_strip_source_extensions_before_resolving() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[("/proj/src/app/service.ts", "")]);
        assert_eq!(
            resolver
                .module_name_to_file_name("./service.ts", Some("/proj/src/app/a.ts"))
                .unwrap()
                .as_deref(),
            Some("/proj/src/app/service.ts")
        );
    }

    #[test]
    fn should_honor_package_typings() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &[],
            &[
                (
                    "/proj/src/node_modules/pkg/package.json",
                    r#"{"name": "pkg", "typings": "dist/pkg.d.ts"}"#,
                ),
                ("/proj/src/node_modules/pkg/dist/pkg.d.ts", ""),
            ],
        );
        assert_eq!(
            resolver
                .module_name_to_file_name("pkg", Some("/proj/src/app/a.ts"))
                .unwrap()
                .as_deref(),
            Some("/proj/src/node_modules/pkg/dist/pkg.d.ts")
        );
    }

    #[test]
    fn should_accept_a_summary_in_place_of_a_declaration_file() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &[],
            &[("/proj/src/node_modules/lib/index.ngsummary.json", "{}")],
        );
        assert_eq!(
            resolver
                .module_name_to_file_name("lib", Some("/proj/src/app/a.ts"))
                .unwrap()
                .as_deref(),
            Some("/proj/src/node_modules/lib/index.d.ts")
        );
    }

    #[test]
    fn should_return_none_for_unresolvable_specifiers() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[("/proj/src/app/a.ts", "")]);
        assert_eq!(
            resolver
                .module_name_to_file_name("./missing", Some("/proj/src/app/a.ts"))
                .unwrap(),
            None
        );
        assert_eq!(
            resolver
                .module_name_to_file_name("nowhere", Some("/proj/src/app/a.ts"))
                .unwrap(),
            None
        );
    }

    #[test]
    fn should_resolve_planned_outputs() {
        let resolver = resolver("/proj/src", "/proj/gen", &[], &[]);
        let containing = "/proj/src/app/main.ngfactory.ts";

        let specifier =
            resolver.file_name_to_module_name("/proj/src/app/widget.ngfactory.ts", containing);
        assert_eq!(
            resolver
                .module_name_to_file_name(&specifier, Some(containing))
                .unwrap()
                .as_deref(),
            Some("/proj/src/app/widget.ngfactory.ts")
        );
    }

    #[test]
    fn should_round_trip_sources_through_sibling_root_dirs() {
        let resolver = resolver(
            "/proj/src",
            "/proj/gen",
            &["/proj/src", "/proj/gen"],
            &[("/proj/src/app/service.ts", "export class Service {}")],
        );
        let imported = "/proj/src/app/service.ts";
        let specifier =
            resolver.file_name_to_module_name(imported, "/proj/src/app/widget.ngfactory.ts");
        assert_eq!(specifier, "./service");

        let resolved = resolver
            .module_name_to_file_name(&specifier, Some("/proj/gen/app/widget.ngfactory.ts"))
            .unwrap();
        assert_eq!(resolved.as_deref(), Some(imported));
    }
}
