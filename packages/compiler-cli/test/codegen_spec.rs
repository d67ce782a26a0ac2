/**
 * Codegen Tests
 *
 * Symbol extraction and generated file emission over an in-memory project
 */

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::sync::Arc;

    use angular_aot_host::codegen::{
        CodeGenerator, FileSystemConsumer, GeneratedModule, ModuleCompiler, StaticSymbol,
        PREAMBLE,
    };
    use angular_aot_host::ngtsc::file_system::testing::MockFileSystem;
    use angular_aot_host::ngtsc::file_system::{AbsoluteFsPath, ReadonlyFileSystem};
    use angular_aot_host::ngtsc::logging::{LogLevel, MockLogger};
    use angular_aot_host::transformers::{
        AotCompilerHost, AotCompilerOptions, HostError, InMemoryProgram,
    };

    const WIDGET: &str = "/proj/src/app/widget.ts";
    const WIDGET_FACTORY: &str = "/proj/src/app/widget.ngfactory.ts";
    const LOCAL: &str = "/proj/src/app/local.ts";
    const LIB_DTS: &str = "/proj/src/lib/ab.d.ts";

    fn project() -> MockFileSystem {
        MockFileSystem::with_files(&[
            (
                WIDGET,
                "export class Widget {}\nexport const BROKEN = compute();",
            ),
            (WIDGET_FACTORY, "export const stale = 1;"),
            (LOCAL, "const hidden = 1;"),
            (
                LIB_DTS,
                "export declare class A {}\nexport declare class B {}",
            ),
            (
                "/proj/src/lib/ab.metadata.json",
                r#"{"__symbolic":"module","version":3,"metadata":{
                    "A":{"__symbolic":"class"},
                    "B":{"__symbolic":"error","message":"Reference to a local symbol"}}}"#,
            ),
            ("/proj/src/locale/messages.fr.xlf", "<xliff/>"),
        ])
    }

    fn host(
        fs: &MockFileSystem,
        roots: &[&str],
        options: AotCompilerOptions,
    ) -> (AotCompilerHost, Rc<MockLogger>) {
        let roots: Vec<String> = roots.iter().map(|r| r.to_string()).collect();
        let program = InMemoryProgram::from_file_system(fs, &roots).unwrap();
        let logger = Rc::new(MockLogger::new());
        let host = AotCompilerHost::new(
            Rc::new(program),
            options,
            Arc::new(fs.clone()),
            logger.clone(),
        )
        .unwrap();
        (host, logger)
    }

    fn options() -> AotCompilerOptions {
        AotCompilerOptions::new("/proj/src", "/proj/gen")
    }

    /// Emits one factory per file, importing the symbols it wraps.
    struct FactoryCompiler;

    impl ModuleCompiler for FactoryCompiler {
        fn compile_modules(
            &self,
            symbols: &[StaticSymbol],
            host: &AotCompilerHost,
            _translations: Option<&str>,
        ) -> angular_aot_host::transformers::Result<Vec<GeneratedModule>> {
            let mut modules: Vec<GeneratedModule> = Vec::new();
            for symbol in symbols {
                let module_url = format!(
                    "{}.ngfactory.ts",
                    symbol.file_path.trim_end_matches(".ts")
                );
                let specifier = host.file_name_to_module_name(&symbol.file_path, &module_url);
                let line = format!(
                    "export const {0}NgFactory = i0.{0};\n",
                    symbol.name
                );
                match modules.iter_mut().find(|m| m.module_url == module_url) {
                    Some(module) => module.source.push_str(&line),
                    None => modules.push(GeneratedModule {
                        file_url: symbol.file_path.clone(),
                        module_url,
                        source: format!("import * as i0 from '{}';\n{}", specifier, line),
                    }),
                }
            }
            Ok(modules)
        }
    }

    mod extract_program_symbols_tests {
        use super::*;

        #[test]
        fn should_drop_error_placeholders() {
            let fs = project();
            let (host, _) = host(&fs, &[LIB_DTS], options());
            let generator = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .unwrap();

            let symbols = generator.extract_program_symbols().unwrap();

            assert_eq!(symbols, vec![StaticSymbol::new(LIB_DTS, "A")]);
        }

        #[test]
        fn should_skip_generated_files_and_library_declarations() {
            let fs = project();
            let mut options = options();
            options.generate_code_for_libraries = false;
            let (host, _) = host(&fs, &[WIDGET, WIDGET_FACTORY, LIB_DTS], options);
            let generator = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .unwrap();

            let symbols = generator.extract_program_symbols().unwrap();

            assert_eq!(symbols, vec![StaticSymbol::new(WIDGET, "Widget")]);
        }

        #[test]
        fn should_warn_about_files_without_metadata() {
            let fs = project();
            let (host, logger) = host(&fs, &[LOCAL, WIDGET], options());
            let generator = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .unwrap();

            let symbols = generator.extract_program_symbols().unwrap();

            assert_eq!(symbols, vec![StaticSymbol::new(WIDGET, "Widget")]);
            assert_eq!(
                logger.messages(LogLevel::Warn),
                vec![format!("no metadata found for {}", LOCAL)]
            );
        }
    }

    mod codegen_tests {
        use super::*;

        #[test]
        fn should_write_preamble_wrapped_modules_under_gen_dir() {
            let fs = project();
            let mut options = options();
            options.generate_code_for_libraries = false;
            let (host, _) = host(&fs, &[WIDGET, LIB_DTS], options);
            let generator = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .unwrap();

            let emitted = generator.codegen().unwrap();

            assert_eq!(emitted, vec!["/proj/gen/app/widget.ngfactory.ts"]);
            let written = fs
                .read_file(&AbsoluteFsPath::new("/proj/gen/app/widget.ngfactory.ts"))
                .unwrap();
            assert_eq!(
                written,
                format!(
                    "{}import * as i0 from './widget';\nexport const WidgetNgFactory = i0.Widget;\n",
                    PREAMBLE
                )
            );
        }

        #[test]
        fn should_require_a_locale_for_translations() {
            let fs = project();
            let mut options = options();
            options.i18n_file = Some("/proj/src/locale/messages.fr.xlf".to_string());
            let (host, _) = host(&fs, &[WIDGET], options);

            let err = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .err()
            .unwrap();

            assert!(matches!(err, HostError::MissingLocale { .. }));
            assert_eq!(
                err.to_string(),
                "The translation file (/proj/src/locale/messages.fr.xlf) locale must be provided. Use the --locale option."
            );
        }

        #[test]
        fn should_load_translations_with_a_locale() {
            let fs = project();
            let mut options = options();
            options.i18n_file = Some("/proj/src/locale/messages.fr.xlf".to_string());
            options.locale = Some("fr".to_string());
            let (host, _) = host(&fs, &[WIDGET], options);

            let generator = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .unwrap();

            assert_eq!(generator.translations(), Some("<xliff/>"));
        }

        #[test]
        fn should_fail_for_a_missing_translation_file() {
            let fs = project();
            let mut options = options();
            options.i18n_file = Some("/proj/src/locale/messages.de.xlf".to_string());
            options.locale = Some("de".to_string());
            let (host, _) = host(&fs, &[WIDGET], options);

            let err = CodeGenerator::new(
                host,
                Box::new(FactoryCompiler),
                Box::new(FileSystemConsumer::new(Arc::new(fs.clone()))),
            )
            .err()
            .unwrap();

            assert!(matches!(err, HostError::Resource(_)));
        }
    }
}
