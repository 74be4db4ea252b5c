//! Directories a watcher must observe to notice new matching files

use crate::matcher::{CompiledPattern, Usage, is_implicit_glob, wildcard_pattern};
use crate::path::{
    canonical_key, combine_paths, contains_path, normalize_path, remove_trailing_separator,
};
use crate::Result;
use indexmap::IndexMap;
use tracing::trace;

struct WildcardDirectory {
    key: String,
    path: String,
    recursive: bool,
}

fn wildcard_directory_from_spec(spec: &str, case_sensitive: bool) -> Option<WildcardDirectory> {
    if let Some(first_wildcard) = spec.find(['*', '?']) {
        // Directory part before the segment holding the first wildcard
        if let Some(separator) = spec[..first_wildcard].rfind('/') {
            let path = if separator == 0 { "/" } else { &spec[..separator] };
            let last_separator = spec.rfind('/').unwrap_or(0);
            return Some(WildcardDirectory {
                key: canonical_key(path, case_sensitive),
                path: path.to_string(),
                recursive: first_wildcard < last_separator,
            });
        }
    }

    let last_component = spec.rsplit('/').next().unwrap_or(spec);
    if is_implicit_glob(last_component) {
        let path = remove_trailing_separator(spec);
        return Some(WildcardDirectory {
            key: canonical_key(path, case_sensitive),
            path: path.to_string(),
            recursive: true,
        });
    }
    None
}

/// Map of directory to "watch recursively" for the include specs
///
/// Specs matched by the exclude pattern are skipped. A directory already
/// covered by a recursive watch on one of its ancestors is dropped.
pub fn get_wildcard_directories(
    include: &[String],
    exclude: &[String],
    base_path: &str,
    case_sensitive: bool,
) -> Result<IndexMap<String, bool>> {
    let exclude_pattern = wildcard_pattern(exclude, base_path, Usage::Exclude)
        .map(|pattern| CompiledPattern::new(&pattern, Usage::Exclude, case_sensitive))
        .transpose()?;

    let mut directories: IndexMap<String, bool> = IndexMap::new();
    let mut key_to_path: IndexMap<String, String> = IndexMap::new();
    let mut recursive_keys = Vec::new();

    for spec in include {
        let spec = normalize_path(&combine_paths(base_path, spec));
        if exclude_pattern.as_ref().is_some_and(|exclude| exclude.is_match(&spec)) {
            trace!("Not watching excluded spec {}", spec);
            continue;
        }
        let Some(WildcardDirectory { key, path, recursive }) =
            wildcard_directory_from_spec(&spec, case_sensitive)
        else {
            continue;
        };

        let existing_path = key_to_path.get(&key).cloned();
        let existing_recursive = existing_path
            .as_ref()
            .and_then(|path| directories.get(path).copied());
        // Upgrade a non-recursive watch, never downgrade
        if existing_recursive.is_none() || (existing_recursive == Some(false) && recursive) {
            directories.insert(existing_path.unwrap_or_else(|| path.clone()), recursive);
            key_to_path.entry(key.clone()).or_insert(path);
            if recursive {
                recursive_keys.push(key);
            }
        }
    }

    directories.retain(|path, _| {
        let key = canonical_key(path, case_sensitive);
        !recursive_keys.iter().any(|recursive_key| {
            *recursive_key != key && contains_path(recursive_key, &key, base_path, !case_sensitive)
        })
    });
    Ok(directories)
}
