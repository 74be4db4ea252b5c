//! Path utilities
//!
//! Configuration paths are handled as normalized strings using `/` as the
//! directory separator, whatever the host platform. Regex matching, canonical
//! cache keys and diagnostics all work on this representation; conversion to
//! native paths happens only inside [`ConfigHost`](crate::host::ConfigHost)
//! implementations.

use std::borrow::Cow;

pub const DIRECTORY_SEPARATOR: char = '/';

/// Token that anchors a path to the directory of the project being resolved
pub const CONFIG_DIR_TEMPLATE: &str = "${configDir}";

/// Extensions stripped by [`remove_file_extension`], longest declaration forms first
const EXTENSIONS_TO_REMOVE: &[&str] = &[
    ".d.ts", ".d.mts", ".d.cts", ".mjs", ".mts", ".cjs", ".cts", ".ts", ".js", ".tsx", ".jsx",
    ".json",
];

pub fn normalize_slashes(path: &str) -> Cow<'_, str> {
    if path.contains('\\') {
        Cow::Owned(path.replace('\\', "/"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Length of the root portion of a path: `/`, `//server/`, `c:/` or `c:`
pub fn root_length(path: &str) -> usize {
    let bytes = path.as_bytes();
    let Some(&first) = bytes.first() else {
        return 0;
    };

    if first == b'/' || first == b'\\' {
        if bytes.get(1) != Some(&first) {
            return 1;
        }
        return match path[2..].find(['/', '\\']) {
            Some(offset) => offset + 3,
            None => path.len(),
        };
    }

    if first.is_ascii_alphabetic() && bytes.get(1) == Some(&b':') {
        match bytes.get(2) {
            Some(b'/') | Some(b'\\') => return 3,
            None => return 2,
            _ => {}
        }
    }

    0
}

pub fn is_rooted(path: &str) -> bool {
    root_length(path) > 0
}

pub fn has_trailing_separator(path: &str) -> bool {
    path.ends_with('/') || path.ends_with('\\')
}

pub fn remove_trailing_separator(path: &str) -> &str {
    if path.len() > 1 && has_trailing_separator(path) {
        &path[..path.len() - 1]
    } else {
        path
    }
}

pub fn ensure_trailing_separator(path: &str) -> String {
    if has_trailing_separator(path) {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Join `relative` onto `base`; a rooted `relative` replaces `base`.
pub fn combine_paths(base: &str, relative: &str) -> String {
    let base = normalize_slashes(base);
    if relative.is_empty() {
        return base.into_owned();
    }
    let relative = normalize_slashes(relative);
    if base.is_empty() || is_rooted(&relative) {
        relative.into_owned()
    } else {
        format!("{}{}", ensure_trailing_separator(&base), relative)
    }
}

/// Split a path into `[root, segment, ...]` after combining it with `current_dir`
pub fn path_components(path: &str, current_dir: &str) -> Vec<String> {
    let path = combine_paths(current_dir, path);
    let root_len = root_length(&path);
    let mut components = vec![path[..root_len].to_string()];
    let rest = &path[root_len..];
    if !rest.is_empty() {
        components.extend(rest.split('/').map(str::to_string));
        if components.last().is_some_and(|last| last.is_empty()) {
            components.pop();
        }
    }
    components
}

/// Resolve `.` and `..` segments and drop empty ones
pub fn reduce_path_components(components: Vec<String>) -> Vec<String> {
    let mut iter = components.into_iter();
    let Some(root) = iter.next() else {
        return Vec::new();
    };

    let mut reduced = vec![root];
    for component in iter {
        if component.is_empty() || component == "." {
            continue;
        }
        if component == ".." {
            if reduced.len() > 1 {
                if reduced.last().is_some_and(|last| last != "..") {
                    reduced.pop();
                    continue;
                }
            } else if !reduced[0].is_empty() {
                continue;
            }
        }
        reduced.push(component);
    }
    reduced
}

pub fn normalized_path_components(path: &str, current_dir: &str) -> Vec<String> {
    reduce_path_components(path_components(path, current_dir))
}

pub fn path_from_components(components: &[String]) -> String {
    let Some((root, rest)) = components.split_first() else {
        return String::new();
    };
    let root = if root.is_empty() {
        String::new()
    } else {
        ensure_trailing_separator(root)
    };
    format!("{root}{}", rest.join("/"))
}

/// Normalize separators and resolve relative segments, keeping a trailing separator
pub fn normalize_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let normalized = path_from_components(&normalized_path_components(&path, ""));
    if !normalized.is_empty() && has_trailing_separator(&path) {
        ensure_trailing_separator(&normalized)
    } else {
        normalized
    }
}

/// Resolve `file` against `current_dir` and normalize the result
pub fn normalized_absolute_path(file: &str, current_dir: &str) -> String {
    path_from_components(&normalized_path_components(file, current_dir))
}

pub fn directory_path(path: &str) -> String {
    let path = normalize_slashes(path);
    let root_len = root_length(&path);
    if root_len == path.len() {
        return path.into_owned();
    }
    let trimmed = remove_trailing_separator(&path);
    let cut = trimmed.rfind('/').unwrap_or(0).max(root_len);
    trimmed[..cut].to_string()
}

pub fn base_file_name(path: &str) -> &str {
    let root_len = root_length(path);
    if root_len == path.len() {
        return "";
    }
    let trimmed = remove_trailing_separator(path);
    match trimmed.rfind(['/', '\\']) {
        Some(index) if index + 1 >= root_len => &trimmed[index + 1..],
        _ => &trimmed[root_len..],
    }
}

pub fn has_extension(path: &str) -> bool {
    base_file_name(path).contains('.')
}

pub fn file_extension_is(path: &str, extension: &str) -> bool {
    path.len() > extension.len() && path.ends_with(extension)
}

pub fn file_extension_is_one_of<S: AsRef<str>>(path: &str, extensions: &[S]) -> bool {
    extensions
        .iter()
        .any(|extension| file_extension_is(path, extension.as_ref()))
}

pub fn remove_file_extension(path: &str) -> &str {
    EXTENSIONS_TO_REMOVE
        .iter()
        .find(|extension| file_extension_is(path, extension))
        .map(|extension| &path[..path.len() - extension.len()])
        .unwrap_or(path)
}

pub fn change_extension(path: &str, extension: &str) -> String {
    format!("{}{extension}", remove_file_extension(path))
}

fn components_equal(a: &str, b: &str, ignore_case: bool) -> bool {
    if ignore_case {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

/// Whether `child` is `parent` or lies beneath it
pub fn contains_path(parent: &str, child: &str, current_dir: &str, ignore_case: bool) -> bool {
    if parent == child {
        return true;
    }
    let parent_components = normalized_path_components(parent, current_dir);
    let child_components = normalized_path_components(child, current_dir);
    if child_components.len() < parent_components.len() {
        return false;
    }
    parent_components
        .iter()
        .zip(&child_components)
        .enumerate()
        .all(|(index, (p, c))| components_equal(p, c, ignore_case || index == 0))
}

/// Express `to` relative to the directory `from`; paths on different roots stay absolute
pub fn relative_path(from: &str, to: &str, ignore_case: bool) -> String {
    let from_components = normalized_path_components(from, "");
    let to_components = normalized_path_components(to, "");

    let start = from_components
        .iter()
        .zip(&to_components)
        .enumerate()
        .take_while(|(index, (f, t))| components_equal(f, t, ignore_case || *index == 0))
        .count();

    if start == 0 {
        return path_from_components(&to_components);
    }

    let mut relative = vec![String::new()];
    relative.extend(std::iter::repeat_n("..".to_string(), from_components.len() - start));
    relative.extend(to_components[start..].iter().cloned());
    path_from_components(&relative)
}

/// Key used for maps and visited sets: lower-cased on case-insensitive hosts
pub fn canonical_key(path: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        path.to_string()
    } else {
        path.to_lowercase()
    }
}

pub fn starts_with_config_dir_template(value: &str) -> bool {
    value
        .get(..CONFIG_DIR_TEMPLATE.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(CONFIG_DIR_TEMPLATE))
}

/// Replace a leading `${configDir}` with `./` resolved against `config_dir`
pub fn substitute_config_dir(value: &str, config_dir: &str) -> Option<String> {
    if !starts_with_config_dir_template(value) {
        return None;
    }
    let rest = &value[CONFIG_DIR_TEMPLATE.len()..];
    Some(normalized_absolute_path(&format!("./{rest}"), config_dir))
}
