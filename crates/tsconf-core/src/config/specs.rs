//! include / exclude / files specifications
//!
//! Builds the [`FileSpecSet`] for a resolved document: type checks the three
//! root fields, synthesizes the default include and exclude, drops glob specs
//! that can never match anything useful, and finally expands `${configDir}`.

use crate::diagnostics::Diagnostic;
use crate::options::CompilerOptions;
use crate::path::substitute_config_dir;
use serde::Serialize;
use serde_json::Value;

pub const DEFAULT_INCLUDE_SPEC: &str = "**/*";

/// Validated specifications of one project
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSpecSet {
    /// String entries of `files`, as written
    pub files: Option<Vec<String>>,
    /// String entries of `include` (or the default include), before validation
    pub include: Option<Vec<String>>,
    /// String entries of `exclude` (or the default exclude), before validation
    pub exclude: Option<Vec<String>>,
    pub validated_files: Vec<String>,
    pub validated_include: Vec<String>,
    pub validated_exclude: Vec<String>,
    /// True when `include` was synthesized because neither `files` nor `include` was given
    pub is_default_include: bool,
}

/// The root fields a [`FileSpecSet`] is built from
#[derive(Debug, Clone, Copy)]
pub struct SpecSources<'a> {
    pub files: Option<&'a Value>,
    pub include: Option<&'a Value>,
    pub exclude: Option<&'a Value>,
    pub has_references: bool,
    pub has_extends: bool,
}

/// Drop specs that are structurally invalid, keeping the rest in order
///
/// With `disallow_trailing_recursion` (include) a spec ending in a bare `**`
/// is rejected. Any spec with a `..` segment after its first `**` segment is
/// rejected.
pub fn validate_specs(
    specs: &[String],
    disallow_trailing_recursion: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<String> {
    specs
        .iter()
        .filter(|spec| match spec_diagnostic(spec, disallow_trailing_recursion) {
            Some(diagnostic) => {
                diagnostics.push(diagnostic);
                false
            }
            None => true,
        })
        .cloned()
        .collect()
}

fn spec_diagnostic(spec: &str, disallow_trailing_recursion: bool) -> Option<Diagnostic> {
    if disallow_trailing_recursion && ends_in_recursive_wildcard(spec) {
        return Some(Diagnostic::trailing_recursive_wildcard(spec));
    }
    if has_parent_after_recursive_wildcard(spec) {
        return Some(Diagnostic::parent_after_recursive_wildcard(spec));
    }
    None
}

/// `(^|/)\*\*/?$`
fn ends_in_recursive_wildcard(spec: &str) -> bool {
    let spec = spec.strip_suffix('/').unwrap_or(spec);
    spec == "**" || spec.ends_with("/**")
}

fn has_parent_after_recursive_wildcard(spec: &str) -> bool {
    let wildcard_index = if spec.starts_with("**/") {
        Some(0)
    } else {
        spec.find("/**/")
    };
    let Some(wildcard_index) = wildcard_index else {
        return false;
    };

    let last_dot_index = if spec.ends_with("/..") {
        Some(spec.len())
    } else {
        spec.rfind("/../")
    };
    last_dot_index.is_some_and(|last_dot_index| last_dot_index > wildcard_index)
}

/// String entries of an array-valued root field; anything else is diagnosed
fn string_array(
    value: Option<&Value>,
    name: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => {
            diagnostics.push(Diagnostic::option_type_mismatch(name, "Array"));
            None
        }
    }
}

fn substitute_all(specs: Vec<String>, config_dir: &str) -> Vec<String> {
    specs
        .into_iter()
        .map(|spec| substitute_config_dir(&spec, config_dir).unwrap_or(spec))
        .collect()
}

/// Build the spec set for a project rooted at `config_dir`
pub fn get_config_file_specs(
    sources: SpecSources<'_>,
    options: &CompilerOptions,
    config_dir: &str,
    config_file: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> FileSpecSet {
    let files = string_array(sources.files, "files", diagnostics);
    if files.as_ref().is_some_and(Vec::is_empty) && !sources.has_references && !sources.has_extends
    {
        diagnostics.push(Diagnostic::empty_files_list(config_file));
    }

    let mut include = string_array(sources.include, "include", diagnostics);
    let mut is_default_include = false;
    if files.is_none() && include.is_none() {
        include = Some(vec![DEFAULT_INCLUDE_SPEC.to_string()]);
        is_default_include = true;
    }

    let exclude = match sources.exclude {
        Some(_) => string_array(sources.exclude, "exclude", diagnostics),
        None => {
            let output_dirs: Vec<String> = [&options.out_dir, &options.declaration_dir]
                .into_iter()
                .flatten()
                .cloned()
                .collect();
            (!output_dirs.is_empty()).then_some(output_dirs)
        }
    };

    let validated_include = include
        .as_deref()
        .map(|specs| validate_specs(specs, true, diagnostics))
        .unwrap_or_default();
    let validated_exclude = exclude
        .as_deref()
        .map(|specs| validate_specs(specs, false, diagnostics))
        .unwrap_or_default();

    FileSpecSet {
        validated_files: substitute_all(files.clone().unwrap_or_default(), config_dir),
        validated_include: substitute_all(validated_include, config_dir),
        validated_exclude: substitute_all(validated_exclude, config_dir),
        files,
        include,
        exclude,
        is_default_include,
    }
}
