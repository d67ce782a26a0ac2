//! Code generation driver.
//!
//! Collects the static symbols of a program, hands them to the template compiler and writes
//! what comes back into the generated output tree.

use std::rc::Rc;
use std::sync::Arc;

use crate::ngtsc::file_system::{dirname, AbsoluteFsPath, FileSystem, ReadonlyFileSystem};
use crate::ngtsc::logging::Logger;
use crate::ngtsc::resource::ResourceError;
use crate::transformers::api::{Program, SourceFile};
use crate::transformers::compiler_host::AotCompilerHost;
use crate::transformers::error::{HostError, Result};
use crate::transformers::file_kind::FileRole;
use crate::transformers::metadata::{is_metadata_error, MetadataStore};
use crate::transformers::module_specifier::ModuleSpecifierResolver;
use crate::transformers::path_mapper::PathConfig;

/// Header of every generated file.
pub const PREAMBLE: &str = "/**
 * @fileoverview This file is generated by the Angular template compiler.
 * Do not edit.
 * @suppress {suspiciousCode,uselessCode,missingProperties}
 */
 /* tslint:disable */

";

/// A top-level exported symbol and the file declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StaticSymbol {
    pub file_path: String,
    pub name: String,
}

impl StaticSymbol {
    pub fn new(file_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            name: name.into(),
        }
    }
}

/// Every compilable symbol of `program`.
///
/// Generated files are skipped, and so are declaration files unless code is generated for
/// libraries. A file without metadata is reported and skipped; error placeholders are dropped.
pub fn extract_program_symbols(
    program: &dyn Program,
    metadata: &MetadataStore,
    specifiers: &ModuleSpecifierResolver,
    config: &PathConfig,
    logger: &dyn Logger,
) -> Result<Vec<StaticSymbol>> {
    let mut symbols = Vec::new();

    for source_file in program.get_source_files() {
        let role = FileRole::classify(source_file.file_name());
        if !role.is_compilation_input(config.generate_code_for_libraries()) {
            continue;
        }

        let abs_path = specifiers.get_canonical_file_name(source_file.file_name());
        let records = metadata.get_metadata_for(abs_path)?;
        let Some(module) = records
            .as_ref()
            .and_then(|records| records.iter().max_by_key(|m| m.version))
        else {
            logger.warn(&format!("no metadata found for {}", abs_path));
            continue;
        };

        let declaration_file = specifiers
            .module_name_to_file_name(abs_path, Some(abs_path))?
            .unwrap_or_else(|| abs_path.to_string());
        symbols.extend(
            module
                .metadata
                .iter()
                .filter(|(_, value)| !is_metadata_error(value))
                .map(|(name, _)| StaticSymbol::new(declaration_file.as_str(), name.as_str())),
        );
    }

    Ok(symbols)
}

/// Output of the template compiler for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Source file the module was compiled from.
    pub file_url: String,
    /// Path of the generated module, in source coordinates.
    pub module_url: String,
    pub source: String,
}

/// The template compiler.
pub trait ModuleCompiler {
    fn compile_modules(
        &self,
        symbols: &[StaticSymbol],
        host: &AotCompilerHost,
        translations: Option<&str>,
    ) -> Result<Vec<GeneratedModule>>;
}

/// Receives generated files.
pub trait GeneratedFileConsumer {
    fn write_file(
        &self,
        emit_path: &str,
        content: &str,
        dependencies: &[Rc<SourceFile>],
    ) -> Result<()>;
}

/// Writes generated files through a [`FileSystem`], creating directories as needed.
pub struct FileSystemConsumer {
    fs: Arc<dyn FileSystem + Send + Sync>,
}

impl FileSystemConsumer {
    pub fn new(fs: Arc<dyn FileSystem + Send + Sync>) -> Self {
        Self { fs }
    }
}

impl GeneratedFileConsumer for FileSystemConsumer {
    fn write_file(
        &self,
        emit_path: &str,
        content: &str,
        _dependencies: &[Rc<SourceFile>],
    ) -> Result<()> {
        let emit_error = |source| HostError::Emit {
            path: emit_path.to_string(),
            source,
        };
        self.fs
            .ensure_dir(&AbsoluteFsPath::new(dirname(emit_path)))
            .map_err(emit_error)?;
        self.fs
            .write_file(&AbsoluteFsPath::new(emit_path), content.as_bytes())
            .map_err(emit_error)
    }
}

/// Contents of the translation file, if one is configured.
pub fn load_translations(
    fs: &dyn ReadonlyFileSystem,
    i18n_file: Option<&str>,
    locale: Option<&str>,
) -> Result<Option<String>> {
    let Some(i18n_file) = i18n_file else {
        return Ok(None);
    };
    if locale.filter(|l| !l.is_empty()).is_none() {
        return Err(HostError::MissingLocale {
            translation_file: i18n_file.to_string(),
        });
    }

    let path = AbsoluteFsPath::new(i18n_file);
    if !fs.is_file(&path) {
        return Err(ResourceError::not_found(i18n_file).into());
    }
    fs.read_file(&path)
        .map(Some)
        .map_err(|source| HostError::Io {
            path: i18n_file.to_string(),
            source,
        })
}

pub struct CodeGenerator {
    host: AotCompilerHost,
    compiler: Box<dyn ModuleCompiler>,
    consumer: Box<dyn GeneratedFileConsumer>,
    translations: Option<String>,
}

impl CodeGenerator {
    /// Fails if a translation file is configured without a locale or cannot be read.
    pub fn new(
        host: AotCompilerHost,
        compiler: Box<dyn ModuleCompiler>,
        consumer: Box<dyn GeneratedFileConsumer>,
    ) -> Result<Self> {
        let options = host.options();
        let translations = load_translations(
            host.specifiers().file_system().as_ref(),
            options.i18n_file.as_deref(),
            options.locale.as_deref(),
        )?;
        Ok(Self {
            host,
            compiler,
            consumer,
            translations,
        })
    }

    pub fn host(&self) -> &AotCompilerHost {
        &self.host
    }

    pub fn translations(&self) -> Option<&str> {
        self.translations.as_deref()
    }

    pub fn extract_program_symbols(&self) -> Result<Vec<StaticSymbol>> {
        extract_program_symbols(
            self.host.program().as_ref(),
            self.host.metadata_store(),
            self.host.specifiers(),
            self.host.path_config(),
            self.host.logger().as_ref(),
        )
    }

    /// Compile the program and write every generated module; returns the emitted paths.
    pub fn codegen(&self) -> Result<Vec<String>> {
        let symbols = self.extract_program_symbols()?;
        let modules = self
            .compiler
            .compile_modules(&symbols, &self.host, self.translations())?;

        let mut emitted = Vec::with_capacity(modules.len());
        for module in modules {
            let dependencies: Vec<_> = self
                .host
                .program()
                .get_source_file(&module.file_url)
                .into_iter()
                .collect();
            let emit_path = self.host.calculate_emit_path(&module.module_url);
            let content = format!("{}{}", PREAMBLE, module.source);
            self.consumer
                .write_file(&emit_path, &content, &dependencies)?;
            tracing::debug!(module = %module.module_url, emit_path = %emit_path, "emitted");
            emitted.push(emit_path);
        }
        Ok(emitted)
    }
}
