//! Metadata collection from source text.
//!
//! [`OxcMetadataCollector`] parses a file with `oxc_parser` and records a symbolic description
//! for every exported top-level declaration, plus the file's re-export directives.

use indexmap::IndexMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrayExpressionElement, BindingPatternKind, Declaration, ExportNamedDeclaration, Expression,
    ObjectPropertyKind, Statement, TSEnumDeclaration, TSEnumMemberName, VariableDeclaration,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde_json::{json, Map, Number, Value};

use super::schema::{ExportedName, ModuleExportMetadata, ModuleMetadata, METADATA_VERSION};
use crate::transformers::api::SourceFile;

/// Declaration/metadata parser collaborator.
pub trait MetadataCollector {
    /// Metadata of `source_file`, or `None` when it exports nothing.
    fn get_metadata(&self, source_file: &SourceFile) -> Option<ModuleMetadata>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OxcMetadataCollector;

impl OxcMetadataCollector {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataCollector for OxcMetadataCollector {
    fn get_metadata(&self, source_file: &SourceFile) -> Option<ModuleMetadata> {
        let allocator = Allocator::default();
        let source_type =
            SourceType::from_path(source_file.file_name()).unwrap_or_else(|_| SourceType::ts());
        let ret = Parser::new(&allocator, source_file.text(), source_type).parse();
        if !ret.errors.is_empty() {
            tracing::debug!(
                file = source_file.file_name(),
                errors = ret.errors.len(),
                "metadata collection skipped a file with syntax errors"
            );
            return None;
        }

        let mut collected = ModuleMetadata::empty(METADATA_VERSION);
        let mut exports = Vec::new();
        for stmt in &ret.program.body {
            match stmt {
                Statement::ExportNamedDeclaration(decl) => {
                    collect_named_export(decl, &mut collected.metadata, &mut exports)
                }
                Statement::ExportAllDeclaration(decl) => {
                    let from = decl.source.value.to_string();
                    match &decl.exported {
                        Some(name) => exports.push(ModuleExportMetadata {
                            from,
                            export: Some(vec![ExportedName::Name(name.name().to_string())]),
                        }),
                        None => exports.push(ModuleExportMetadata { from, export: None }),
                    }
                }
                _ => {}
            }
        }

        if !exports.is_empty() {
            collected.exports = Some(exports);
        }
        if collected.is_empty() {
            None
        } else {
            Some(collected)
        }
    }
}

fn collect_named_export(
    decl: &ExportNamedDeclaration<'_>,
    metadata: &mut IndexMap<String, Value>,
    exports: &mut Vec<ModuleExportMetadata>,
) {
    if let Some(source) = &decl.source {
        let names = decl
            .specifiers
            .iter()
            .map(|spec| {
                let name = spec.local.name().to_string();
                let exported = spec.exported.name().to_string();
                if name == exported {
                    ExportedName::Name(name)
                } else {
                    ExportedName::Alias {
                        name,
                        alias: exported,
                    }
                }
            })
            .collect();
        exports.push(ModuleExportMetadata {
            from: source.value.to_string(),
            export: Some(names),
        });
        return;
    }

    for spec in &decl.specifiers {
        let local = spec.local.name().to_string();
        let exported = spec.exported.name().to_string();
        metadata
            .entry(exported)
            .or_insert_with(|| json!({ "__symbolic": "reference", "name": local }));
    }

    match &decl.declaration {
        Some(Declaration::ClassDeclaration(class)) => {
            if let Some(id) = &class.id {
                metadata.insert(id.name.to_string(), json!({ "__symbolic": "class" }));
            }
        }
        Some(Declaration::FunctionDeclaration(func)) => {
            if let Some(id) = &func.id {
                metadata.insert(id.name.to_string(), json!({ "__symbolic": "function" }));
            }
        }
        Some(Declaration::TSInterfaceDeclaration(iface)) => {
            metadata.insert(iface.id.name.to_string(), json!({ "__symbolic": "interface" }));
        }
        Some(Declaration::TSEnumDeclaration(decl)) => {
            metadata.insert(decl.id.name.to_string(), enum_value(decl));
        }
        Some(Declaration::VariableDeclaration(decl)) => collect_variables(decl, metadata),
        _ => {}
    }
}

fn collect_variables(decl: &VariableDeclaration<'_>, metadata: &mut IndexMap<String, Value>) {
    for declarator in &decl.declarations {
        let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
            continue;
        };
        let value = match &declarator.init {
            Some(init) => literal_value(init),
            None => error_value("Variable not initialized"),
        };
        metadata.insert(id.name.to_string(), value);
    }
}

fn enum_value(decl: &TSEnumDeclaration<'_>) -> Value {
    let mut members = Map::new();
    let mut next = Some(0.0_f64);
    for member in &decl.body.members {
        let name = match &member.id {
            TSEnumMemberName::Identifier(id) => id.name.to_string(),
            TSEnumMemberName::String(s) => s.value.to_string(),
            _ => continue,
        };
        let value = match &member.initializer {
            Some(Expression::NumericLiteral(n)) => {
                next = Some(n.value + 1.0);
                number_value(n.value)
            }
            Some(init) => {
                next = None;
                literal_value(init)
            }
            None => match next {
                Some(n) => {
                    next = Some(n + 1.0);
                    number_value(n)
                }
                None => error_value("Enum member has no computable value"),
            },
        };
        members.insert(name, value);
    }
    Value::Object(members)
}

/// JSON rendition of a literal initializer; anything else becomes an error placeholder.
fn literal_value(expr: &Expression<'_>) -> Value {
    match expr {
        Expression::StringLiteral(s) => Value::String(s.value.to_string()),
        Expression::NumericLiteral(n) => number_value(n.value),
        Expression::BooleanLiteral(b) => Value::Bool(b.value),
        Expression::NullLiteral(_) => Value::Null,
        Expression::ParenthesizedExpression(p) => literal_value(&p.expression),
        Expression::ArrayExpression(array) => Value::Array(
            array
                .elements
                .iter()
                .map(|element| match element {
                    ArrayExpressionElement::SpreadElement(_) => {
                        error_value("Spread elements are not supported")
                    }
                    other => other
                        .as_expression()
                        .map(literal_value)
                        .unwrap_or(Value::Null),
                })
                .collect(),
        ),
        Expression::ObjectExpression(object) => {
            let mut map = Map::new();
            for property in &object.properties {
                match property {
                    ObjectPropertyKind::ObjectProperty(prop) => match prop.key.name() {
                        Some(key) => {
                            map.insert(key.to_string(), literal_value(&prop.value));
                        }
                        None => return error_value("Computed property keys are not supported"),
                    },
                    ObjectPropertyKind::SpreadProperty(_) => {
                        return error_value("Spread properties are not supported")
                    }
                }
            }
            Value::Object(map)
        }
        _ => error_value("Expression form not supported"),
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn error_value(message: &str) -> Value {
    json!({ "__symbolic": "error", "message": message })
}
