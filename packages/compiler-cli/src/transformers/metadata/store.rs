//! Metadata Store
//!
//! Loads per-file metadata, upgrades version 1 records to version 3 and memoizes what it read
//! from disk. One store lives for exactly one compilation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use super::collector::MetadataCollector;
use super::schema::{ModuleMetadata, METADATA_EXTENSION, METADATA_VERSION};
use crate::ngtsc::file_system::AbsoluteFsPath;
use crate::ngtsc::logging::Logger;
use crate::transformers::api::{Program, SourceFile};
use crate::transformers::error::{HostError, Result};
use crate::transformers::file_kind::{is_declaration_file, replace_declaration_suffix};
use crate::transformers::module_resolution::FileExistence;
use crate::transformers::module_specifier::ModuleSpecifierResolver;

pub type MetadataRecords = Rc<Vec<ModuleMetadata>>;

pub struct MetadataStore {
    specifiers: Rc<ModuleSpecifierResolver>,
    program: Rc<dyn Program>,
    collector: Box<dyn MetadataCollector>,
    logger: Rc<dyn Logger>,
    cache: RefCell<HashMap<String, MetadataRecords>>,
}

impl MetadataStore {
    pub fn new(
        specifiers: Rc<ModuleSpecifierResolver>,
        program: Rc<dyn Program>,
        collector: Box<dyn MetadataCollector>,
        logger: Rc<dyn Logger>,
    ) -> Self {
        Self {
            specifiers,
            program,
            collector,
            logger,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// A file of the program, or failing that, of the file system.
    pub fn get_source_file(&self, file_path: &str) -> Result<Rc<SourceFile>> {
        if let Some(source_file) = self.program.get_source_file(file_path) {
            return Ok(source_file);
        }
        if self
            .specifiers
            .file_system()
            .is_file(&AbsoluteFsPath::new(file_path))
        {
            let text = self.specifiers.read_file(file_path)?;
            return Ok(Rc::new(SourceFile::new(file_path, text)));
        }
        Err(HostError::SourceFileNotFound {
            path: file_path.to_string(),
        })
    }

    /// Metadata records of `file_path`.
    ///
    /// `None` when the file does not exist, or exists only as a planned output. A declaration file
    /// without a metadata sibling yields a single empty version 3 record.
    pub fn get_metadata_for(&self, file_path: &str) -> Result<Option<MetadataRecords>> {
        let in_program = self.program.get_source_file(file_path).is_some();
        match self.specifiers.file_existence(file_path) {
            Some(FileExistence::OnDisk) => {}
            Some(FileExistence::Planned) if !in_program => {
                tracing::trace!(file = file_path, "no metadata for a planned output");
                return Ok(None);
            }
            None if !in_program => return Ok(None),
            _ => {}
        }

        if is_declaration_file(file_path) {
            if let Some(metadata_path) = replace_declaration_suffix(file_path, METADATA_EXTENSION) {
                if self.specifiers.file_exists(&metadata_path) {
                    return self.read_metadata(&metadata_path, file_path).map(Some);
                }
            }
            return Ok(Some(Rc::new(vec![ModuleMetadata::empty(METADATA_VERSION)])));
        }

        let source_file = self.get_source_file(file_path)?;
        let records = self
            .collector
            .get_metadata(&source_file)
            .into_iter()
            .collect();
        Ok(Some(Rc::new(records)))
    }

    /// Parse the metadata file at `file_path`, appending an upgraded version 3 record when only a
    /// version 1 record is present. Results are cached by `file_path`.
    pub fn read_metadata(&self, file_path: &str, dts_file_path: &str) -> Result<MetadataRecords> {
        if let Some(records) = self.cache.borrow().get(file_path) {
            tracing::trace!(file = file_path, "metadata cache hit");
            return Ok(Rc::clone(records));
        }

        let text = self.specifiers.read_file(file_path)?;
        let mut records = parse_records(&text).map_err(|source| {
            self.logger
                .error(&format!("Failed to read JSON file {}", file_path));
            HostError::MetadataParse {
                path: file_path.to_string(),
                source,
            }
        })?;

        let has_current = records.iter().any(|m| m.version == METADATA_VERSION);
        if !has_current {
            if let Some(v1) = records.iter().find(|m| m.version == 1) {
                let upgraded = self.upgrade_version1_metadata(v1, dts_file_path)?;
                records.push(upgraded);
            }
        }

        let records = Rc::new(records);
        self.cache
            .borrow_mut()
            .insert(file_path.to_string(), Rc::clone(&records));
        Ok(records)
    }

    /// Build a version 3 record from a version 1 record, filling the symbols version 1 did not
    /// track from the declaration file itself. Entries already present in `v1` always win.
    pub fn upgrade_version1_metadata(
        &self,
        v1: &ModuleMetadata,
        dts_file_path: &str,
    ) -> Result<ModuleMetadata> {
        let mut v3 = ModuleMetadata::empty(METADATA_VERSION);
        v3.exports = v1.exports.clone();
        v3.import_as = v1.import_as.clone();
        v3.metadata = v1.metadata.clone();

        let source_file = self.get_source_file(dts_file_path)?;
        if let Some(dts_metadata) = self.collector.get_metadata(&source_file) {
            for (name, value) in dts_metadata.metadata {
                let slot = v3.metadata.entry(name).or_insert(Value::Null);
                if slot.is_null() {
                    *slot = value;
                }
            }
            if v3.exports.is_none() {
                v3.exports = dts_metadata.exports;
            }
        }
        Ok(v3)
    }
}

/// A metadata file holds one record, a list of records, or `null`.
fn parse_records(text: &str) -> serde_json::Result<Vec<ModuleMetadata>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Null => Ok(Vec::new()),
        list @ Value::Array(_) => serde_json::from_value(list),
        record => Ok(vec![serde_json::from_value(record)?]),
    }
}
