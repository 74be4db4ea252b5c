//! Final input file list for a project
//!
//! Literal `files` come first and are never excluded. Wildcard matches follow,
//! deduplicated by extension priority, and wildcard `.json` matches come last.

use crate::config::FileSpecSet;
use crate::extensions::{
    DTS, ExtraFileExtension, JS, JSON, JSX, TS, supported_extensions,
    supported_extensions_with_json,
};
use crate::host::ConfigHost;
use crate::matcher::{CompiledPattern, Usage, wildcard_patterns};
use crate::options::CompilerOptions;
use crate::path::{
    canonical_key, change_extension, file_extension_is, file_extension_is_one_of,
    normalize_path, normalized_absolute_path,
};
use crate::walker::{WalkOptions, match_files};
use crate::Result;
use indexmap::IndexMap;
use tracing::{debug, trace};

/// Ordered, case-normalized file maps keyed by canonical path
type FileMap = IndexMap<String, String>;

pub fn get_file_names_from_config_specs<H: ConfigHost + ?Sized>(
    specs: &FileSpecSet,
    base_path: &str,
    options: &CompilerOptions,
    host: &H,
    extra_extensions: &[ExtraFileExtension],
) -> Result<Vec<String>> {
    let base_path = normalize_path(base_path);
    let case_sensitive = host.use_case_sensitive_file_names();
    let key = |path: &str| canonical_key(path, case_sensitive);

    let supported = supported_extensions(options, extra_extensions);
    let supported_with_json = supported_extensions_with_json(options, &supported);

    let mut literal_files = FileMap::new();
    for file_name in &specs.validated_files {
        let file = normalized_absolute_path(file_name, &base_path);
        literal_files.insert(key(&file), file);
    }

    let mut wildcard_files = FileMap::new();
    let mut wildcard_json_files = FileMap::new();

    if !specs.validated_include.is_empty() {
        let extensions: Vec<String> = supported_with_json.iter().flatten().cloned().collect();
        let matched = match_files(
            host,
            &base_path,
            WalkOptions {
                extensions: Some(&extensions),
                excludes: &specs.validated_exclude,
                includes: &specs.validated_include,
                current_dir: &base_path,
                depth: None,
            },
        )?;

        let mut json_only_includes: Option<Vec<CompiledPattern>> = None;
        for file in matched {
            if file_extension_is(&file, JSON) {
                if json_only_includes.is_none() {
                    json_only_includes = Some(json_include_patterns(
                        &specs.validated_include,
                        &base_path,
                        case_sensitive,
                    )?);
                }
                let is_included = json_only_includes
                    .as_ref()
                    .is_some_and(|patterns| patterns.iter().any(|p| p.is_match(&file)));
                let file_key = key(&file);
                if is_included
                    && !literal_files.contains_key(&file_key)
                    && !wildcard_json_files.contains_key(&file_key)
                {
                    wildcard_json_files.insert(file_key, file);
                }
                continue;
            }

            if has_file_with_higher_priority_extension(
                &file,
                &literal_files,
                &wildcard_files,
                &supported,
                &key,
            ) {
                trace!("Skipping {} in favor of a higher priority extension", file);
                continue;
            }
            remove_wildcard_files_with_lower_priority_extension(
                &file,
                &mut wildcard_files,
                &supported,
                &key,
            );

            let file_key = key(&file);
            if !literal_files.contains_key(&file_key) && !wildcard_files.contains_key(&file_key) {
                wildcard_files.insert(file_key, file);
            }
        }
    }

    debug!(
        "Collected {} literal, {} wildcard and {} JSON files",
        literal_files.len(),
        wildcard_files.len(),
        wildcard_json_files.len()
    );

    Ok(literal_files
        .into_values()
        .chain(wildcard_files.into_values())
        .chain(wildcard_json_files.into_values())
        .collect())
}

/// Patterns of the include specs that name `.json` files explicitly
fn json_include_patterns(
    includes: &[String],
    base_path: &str,
    case_sensitive: bool,
) -> Result<Vec<CompiledPattern>> {
    let json_includes: Vec<String> = includes
        .iter()
        .filter(|spec| spec.ends_with(JSON))
        .cloned()
        .collect();
    wildcard_patterns(&json_includes, base_path, Usage::Files)
        .unwrap_or_default()
        .iter()
        .map(|pattern| CompiledPattern::new(&format!("^{pattern}$"), Usage::Files, case_sensitive))
        .collect()
}

fn extension_group<'a>(file: &str, groups: &'a [Vec<String>]) -> Option<&'a [String]> {
    groups
        .iter()
        .find(|group| file_extension_is_one_of(file, group))
        .map(Vec::as_slice)
}

fn has_file_with_higher_priority_extension(
    file: &str,
    literal_files: &FileMap,
    wildcard_files: &FileMap,
    groups: &[Vec<String>],
    key: &impl Fn(&str) -> String,
) -> bool {
    let Some(group) = extension_group(file, groups) else {
        return false;
    };

    for extension in group {
        // Reached the file's own extension: nothing before it was present
        if file_extension_is(file, extension) && (extension != TS || !file_extension_is(file, DTS)) {
            return false;
        }
        let higher_priority = key(&change_extension(file, extension));
        if literal_files.contains_key(&higher_priority) || wildcard_files.contains_key(&higher_priority) {
            // A declaration file does not hide the script it describes
            if extension == DTS && (file_extension_is(file, JS) || file_extension_is(file, JSX)) {
                continue;
            }
            return true;
        }
    }
    false
}

fn remove_wildcard_files_with_lower_priority_extension(
    file: &str,
    wildcard_files: &mut FileMap,
    groups: &[Vec<String>],
    key: &impl Fn(&str) -> String,
) {
    let Some(group) = extension_group(file, groups) else {
        return;
    };

    for extension in group.iter().rev() {
        if file_extension_is(file, extension) {
            return;
        }
        let lower_priority = key(&change_extension(file, extension));
        wildcard_files.shift_remove(&lower_priority);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::options::Tristate;

    fn specs(files: &[&str], include: &[&str], exclude: &[&str]) -> FileSpecSet {
        let to_vec = |values: &[&str]| values.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        FileSpecSet {
            validated_files: to_vec(files),
            validated_include: to_vec(include),
            validated_exclude: to_vec(exclude),
            ..Default::default()
        }
    }

    fn allow_js() -> CompilerOptions {
        CompilerOptions {
            allow_js: Tristate::True,
            ..Default::default()
        }
    }

    #[test]
    fn test_ts_shadows_js() {
        let host = MemoryHost::new()
            .with_file("/proj/a.js", "")
            .with_file("/proj/a.ts", "")
            .with_file("/proj/b.js", "");
        let files = get_file_names_from_config_specs(
            &specs(&[], &["**/*"], &[]),
            "/proj",
            &allow_js(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/a.ts", "/proj/b.js"]);
    }

    #[test]
    fn test_higher_priority_found_later_evicts() {
        // a.d.ts sorts before a.ts, so it is recorded first and then evicted
        let host = MemoryHost::new()
            .with_file("/proj/a.d.ts", "")
            .with_file("/proj/a.ts", "");
        let files = get_file_names_from_config_specs(
            &specs(&[], &["**/*"], &[]),
            "/proj",
            &CompilerOptions::default(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/a.ts"]);
    }

    #[test]
    fn test_declaration_does_not_shadow_js() {
        let host = MemoryHost::new()
            .with_file("/proj/a.d.ts", "")
            .with_file("/proj/a.js", "");
        let files = get_file_names_from_config_specs(
            &specs(&[], &["**/*"], &[]),
            "/proj",
            &allow_js(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/a.d.ts", "/proj/a.js"]);
    }

    #[test]
    fn test_literal_files_first_and_never_excluded() {
        let host = MemoryHost::new()
            .with_file("/proj/src/a.ts", "")
            .with_file("/proj/gen/b.ts", "")
            .with_file("/proj/gen/c.ts", "");
        let files = get_file_names_from_config_specs(
            &specs(&["gen/c.ts"], &["**/*"], &["gen"]),
            "/proj",
            &CompilerOptions::default(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/gen/c.ts", "/proj/src/a.ts"]);
    }

    #[test]
    fn test_json_files_need_resolve_json_module_and_json_include() {
        let host = MemoryHost::new()
            .with_file("/proj/src/a.ts", "")
            .with_file("/proj/src/data.json", "{}")
            .with_file("/proj/src/other.json", "{}");
        let options = CompilerOptions {
            resolve_json_module: Tristate::True,
            ..Default::default()
        };

        let files = get_file_names_from_config_specs(
            &specs(&[], &["src/**/*"], &[]),
            "/proj",
            &options,
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/src/a.ts"]);

        let files = get_file_names_from_config_specs(
            &specs(&[], &["src/**/*", "src/data.json"], &[]),
            "/proj",
            &options,
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/src/a.ts", "/proj/src/data.json"]);

        let files = get_file_names_from_config_specs(
            &specs(&[], &["src/**/*", "src/data.json"], &[]),
            "/proj",
            &CompilerOptions::default(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/src/a.ts"]);
    }

    #[test]
    fn test_case_insensitive_host_deduplicates() {
        let host = MemoryHost::new()
            .case_insensitive()
            .with_file("/proj/A.ts", "");
        let files = get_file_names_from_config_specs(
            &specs(&["a.ts"], &["**/*"], &[]),
            "/proj",
            &CompilerOptions::default(),
            &host,
            &[],
        )
        .unwrap();
        assert_eq!(files, vec!["/proj/a.ts"]);
    }
}
