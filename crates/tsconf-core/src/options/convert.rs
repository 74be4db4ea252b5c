//! JSON value conversion
//!
//! Converts untyped JSON into [`OptionValue`]s against a descriptor. Problems
//! are pushed onto a diagnostics list and the offending value is dropped, so
//! one bad option never aborts the rest of the document.

use super::declarations::CompilerOptions;
use super::descriptor::{OptionDescriptor, OptionKind};
use super::registry::OptionRegistry;
use super::value::OptionValue;
use crate::diagnostics::Diagnostic;
use crate::path::{normalized_absolute_path, starts_with_config_dir_template};
use serde_json::Value;
use tracing::trace;

/// Where a raw value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionSource {
    ConfigFile,
    CommandLine,
}

/// Convert one raw value
///
/// Returns `None` both for an accepted `null` and for a rejected value; in
/// either case the option stays unset.
pub fn convert_value(
    descriptor: &OptionDescriptor,
    value: &Value,
    base_path: &str,
    source: ConversionSource,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<OptionValue> {
    if descriptor.is_command_line_only && source == ConversionSource::ConfigFile {
        diagnostics.push(Diagnostic::command_line_only(descriptor.name));
        return None;
    }
    convert_named(descriptor, descriptor.name, value, base_path, diagnostics)
}

/// `name` is the top-level option name so element errors point at the option
fn convert_named(
    descriptor: &OptionDescriptor,
    name: &str,
    value: &Value,
    base_path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<OptionValue> {
    if value.is_null() {
        if descriptor.disallow_null_or_undefined {
            diagnostics.push(Diagnostic::option_type_mismatch(
                name,
                &descriptor.type_name(),
            ));
        }
        return None;
    }

    match descriptor.kind {
        OptionKind::List => match value {
            Value::Array(items) => Some(convert_list(descriptor, name, items, base_path, diagnostics)),
            _ => mismatch(descriptor, name, diagnostics),
        },
        OptionKind::ListOrElement => match value {
            Value::Array(items) => Some(convert_list(descriptor, name, items, base_path, diagnostics)),
            scalar => {
                let element = descriptor.element?;
                let converted = convert_named(element, name, scalar, base_path, diagnostics)?;
                Some(OptionValue::List(vec![converted]))
            }
        },
        OptionKind::String => match value {
            Value::String(text) if descriptor.is_file_path => {
                Some(OptionValue::String(normalize_file_path(text, base_path)))
            }
            Value::String(text) => Some(OptionValue::String(text.clone())),
            _ => mismatch(descriptor, name, diagnostics),
        },
        OptionKind::Number => match value.as_f64() {
            Some(number) => Some(OptionValue::Number(number)),
            None => mismatch(descriptor, name, diagnostics),
        },
        OptionKind::Boolean => match value {
            Value::Bool(flag) => Some(OptionValue::Bool(*flag)),
            _ => mismatch(descriptor, name, diagnostics),
        },
        OptionKind::Enum => match value {
            Value::String(key) => match descriptor.lookup_enum(key) {
                Some(mapped) => Some(OptionValue::Enum(mapped)),
                None => {
                    diagnostics.push(Diagnostic::invalid_enum_value(
                        name,
                        &descriptor.enum_keys(),
                    ));
                    None
                }
            },
            _ => mismatch(descriptor, name, diagnostics),
        },
        OptionKind::Object => match value {
            Value::Object(map) => Some(OptionValue::Object(map.clone())),
            _ => mismatch(descriptor, name, diagnostics),
        },
    }
}

fn convert_list(
    descriptor: &OptionDescriptor,
    name: &str,
    items: &[Value],
    base_path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> OptionValue {
    let Some(element) = descriptor.element else {
        return OptionValue::List(Vec::new());
    };
    let converted = items
        .iter()
        .filter_map(|item| convert_named(element, name, item, base_path, diagnostics))
        .filter(|item| descriptor.list_preserve_falsy_values || !item.is_falsy())
        .collect();
    OptionValue::List(converted)
}

fn mismatch(
    descriptor: &OptionDescriptor,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<OptionValue> {
    diagnostics.push(Diagnostic::option_type_mismatch(name, &descriptor.type_name()));
    None
}

/// Absolute, normalized path; `${configDir}` values are left for later substitution
fn normalize_file_path(value: &str, base_path: &str) -> String {
    if starts_with_config_dir_template(value) {
        return value.to_string();
    }
    let value = if value.is_empty() { "." } else { value };
    normalized_absolute_path(value, base_path)
}

/// Convert a `compilerOptions` object into typed options
pub fn convert_compiler_options(
    registry: &OptionRegistry,
    json: Option<&Value>,
    base_path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> CompilerOptions {
    let mut options = CompilerOptions::default();
    let map = match json {
        None | Some(Value::Null) => return options,
        Some(Value::Object(map)) => map,
        Some(_) => {
            diagnostics.push(Diagnostic::option_type_mismatch("compilerOptions", "object"));
            return options;
        }
    };

    for (name, raw) in map {
        let Some(declaration) = registry.get(name) else {
            diagnostics.push(Diagnostic::unknown_option(name, registry.suggest(name)));
            continue;
        };
        let value = convert_value(
            &declaration.descriptor,
            raw,
            base_path,
            ConversionSource::ConfigFile,
            diagnostics,
        );
        trace!("Converted compiler option {} = {:?}", name, value);
        (declaration.set)(&mut options, value);
    }

    if options.paths.is_some() {
        options.paths_base_path = Some(base_path.to_string());
    }
    options
}
