// Compiler Host
//
// The build host the template compiler talks to: path mapping, specifier resolution, metadata
// and resource access for one compilation.

use std::rc::Rc;
use std::sync::Arc;

use crate::ngtsc::file_system::{strip_extension, AbsoluteFsPath, ReadonlyFileSystem};
use crate::ngtsc::logging::Logger;
use crate::ngtsc::resource::{FileSystemResourceLoader, ResourceLoader};

use super::api::{AotCompilerOptions, Program, SourceFile};
use super::error::Result;
use super::file_kind::FileRole;
use super::metadata::{MetadataCollector, MetadataRecords, MetadataStore, OxcMetadataCollector};
use super::module_resolution::{ModuleResolver, NodeModuleResolver};
use super::module_specifier::ModuleSpecifierResolver;
use super::path_mapper::PathConfig;

/// AOT compiler host.
pub struct AotCompilerHost {
    options: AotCompilerOptions,
    program: Rc<dyn Program>,
    specifiers: Rc<ModuleSpecifierResolver>,
    metadata: MetadataStore,
    resources: Box<dyn ResourceLoader>,
    logger: Rc<dyn Logger>,
}

impl AotCompilerHost {
    /// Host using node-style module resolution and the oxc-based metadata collector.
    pub fn new(
        program: Rc<dyn Program>,
        options: AotCompilerOptions,
        fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
        logger: Rc<dyn Logger>,
    ) -> Result<Self> {
        let resolver = NodeModuleResolver::new(options.path_config()?.root_dirs().to_vec());
        Self::with_collaborators(
            program,
            options,
            fs,
            logger,
            Box::new(resolver),
            Box::new(OxcMetadataCollector::new()),
        )
    }

    pub fn with_collaborators(
        program: Rc<dyn Program>,
        options: AotCompilerOptions,
        fs: Arc<dyn ReadonlyFileSystem + Send + Sync>,
        logger: Rc<dyn Logger>,
        resolver: Box<dyn ModuleResolver>,
        collector: Box<dyn MetadataCollector>,
    ) -> Result<Self> {
        let config = options.path_config()?;
        let resources = Box::new(FileSystemResourceLoader::new(Arc::clone(&fs)));
        let specifiers = Rc::new(ModuleSpecifierResolver::with_resolver(config, fs, resolver));
        let metadata = MetadataStore::new(
            Rc::clone(&specifiers),
            Rc::clone(&program),
            collector,
            Rc::clone(&logger),
        );
        Ok(Self {
            options,
            program,
            specifiers,
            metadata,
            resources,
            logger,
        })
    }

    pub fn options(&self) -> &AotCompilerOptions {
        &self.options
    }

    pub fn path_config(&self) -> &PathConfig {
        self.specifiers.config()
    }

    pub fn program(&self) -> &Rc<dyn Program> {
        &self.program
    }

    pub fn specifiers(&self) -> &ModuleSpecifierResolver {
        &self.specifiers
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.metadata
    }

    pub fn logger(&self) -> &Rc<dyn Logger> {
        &self.logger
    }

    pub fn calculate_emit_path(&self, file_path: &str) -> String {
        let config = self.specifiers.config();
        if !self.options.trace {
            return config.calculate_emit_path(file_path);
        }
        config.calculate_emit_path_with(file_path, |root_dir| {
            self.logger.debug(&format!(
                "Check if {} is under rootDirs element {}",
                file_path, root_dir
            ));
        })
    }

    pub fn module_name_to_file_name(
        &self,
        module_name: &str,
        containing_file: Option<&str>,
    ) -> Result<Option<String>> {
        self.specifiers
            .module_name_to_file_name(module_name, containing_file)
    }

    pub fn file_name_to_module_name(&self, imported_file: &str, containing_file: &str) -> String {
        self.specifiers
            .file_name_to_module_name(imported_file, containing_file)
    }

    pub fn get_metadata_for(&self, file_path: &str) -> Result<Option<MetadataRecords>> {
        self.metadata.get_metadata_for(file_path)
    }

    pub fn get_source_file(&self, file_path: &str) -> Result<Rc<SourceFile>> {
        self.metadata.get_source_file(file_path)
    }

    pub fn get_canonical_file_name<'a>(&self, file_name: &'a str) -> &'a str {
        self.specifiers.get_canonical_file_name(file_name)
    }

    pub fn file_exists(&self, file_name: &str) -> bool {
        self.specifiers.file_exists(file_name)
    }

    pub fn read_file(&self, file_name: &str) -> Result<String> {
        self.specifiers.read_file(file_name)
    }

    /// Contents of a template-referenced resource.
    pub fn load_resource(&self, file_path: &str) -> Result<String> {
        Ok(self.resources.load(file_path)?)
    }

    /// Contents of a summary file, if one was written.
    pub fn load_summary(&self, file_path: &str) -> Option<String> {
        let fs = self.specifiers.file_system();
        let path = AbsoluteFsPath::new(file_path);
        if !fs.is_file(&path) {
            return None;
        }
        fs.read_file(&path).ok()
    }

    /// Declaration file the compiled `file_path` is described by.
    pub fn get_output_file_name(&self, file_path: &str) -> String {
        format!("{}.d.ts", strip_extension(file_path))
    }

    /// Whether code is generated for `file_path`.
    pub fn is_source_file(&self, file_path: &str) -> bool {
        FileRole::classify(file_path)
            .is_compilation_input(self.path_config().generate_code_for_libraries())
    }
}
