//! Glob-to-regex compilation
//!
//! Include and exclude specs are translated into anchored regular
//! expressions. The translation depends on how the pattern is used:
//!
//! * [`Usage::Files`] matches complete file paths. `*` never matches the dot
//!   of a trailing `.min.js`, and `*`/`?` at the start of a segment never
//!   match a dot-file or a package directory (`node_modules`,
//!   `bower_components`, `jspm_packages`) unless that segment is spelled out.
//! * [`Usage::Directories`] matches every directory that could lead to a
//!   matching file, so each segment is optional.
//! * [`Usage::Exclude`] matches a path or any of its ancestors.
//!
//! The `regex` crate has no look-around. The two look-ahead rules above are
//! instead expressed by marking the candidate path before matching: the dot
//! of a trailing `.min.js` becomes [`MINIFIED_DOT`] and package directory
//! segments are prefixed with [`PACKAGE_DIRECTORY`]. Generated patterns
//! account for both markers, and [`CompiledPattern::is_match`] applies the
//! marking for its usage.

use crate::path::{
    combine_paths, contains_path, directory_path, has_extension, is_rooted, normalize_path,
    normalized_path_components, remove_trailing_separator,
};
use crate::{Result, TsconfError};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use tracing::trace;

/// Replaces the `.` of a trailing `.min.js` in file candidates
pub const MINIFIED_DOT: char = '\u{0}';

/// Prefixes package directory segments in file and directory candidates
pub const PACKAGE_DIRECTORY: char = '\u{1}';

const PACKAGE_DIRECTORIES: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

const MINIFIED_JS_SUFFIX: &str = ".min.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Usage {
    Files,
    Directories,
    Exclude,
}

impl Usage {
    fn single_asterisk(self) -> &'static str {
        match self {
            Usage::Files => r"[^/\x00]*",
            Usage::Directories | Usage::Exclude => "[^/]*",
        }
    }

    fn double_asterisk(self) -> &'static str {
        match self {
            Usage::Files | Usage::Directories => r"(/[^/.\x01][^/]*)*?",
            Usage::Exclude => "(/.+?)?",
        }
    }

    /// First character of a segment that starts with a wildcard
    fn leading_character(self) -> &'static str {
        match self {
            Usage::Files => r"[^./\x00\x01]",
            Usage::Directories => r"[^./\x01]",
            Usage::Exclude => "[^./]",
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            Usage::Exclude => "($|/)",
            Usage::Files | Usage::Directories => "$",
        }
    }
}

/// A final segment without `.`, `*` or `?` names a directory: match everything below it
pub fn is_implicit_glob(last_component: &str) -> bool {
    !last_component.contains(['.', '*', '?'])
}

fn is_package_directory(component: &str) -> bool {
    PACKAGE_DIRECTORIES
        .iter()
        .any(|name| component.eq_ignore_ascii_case(name))
}

fn push_literal(pattern: &mut String, character: char, usage: Usage) {
    match character {
        '*' => pattern.push_str(usage.single_asterisk()),
        '?' => pattern.push_str("[^/]"),
        '.' if usage == Usage::Files => pattern.push_str(r"[.\x00]"),
        c if c.is_alphanumeric() || c == '_' || c == '/' || c.is_whitespace() => pattern.push(c),
        c => pattern.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
    }
}

fn component_pattern(component: &str, usage: Usage) -> String {
    let mut pattern = String::new();
    if usage == Usage::Exclude {
        for character in component.chars() {
            push_literal(&mut pattern, character, usage);
        }
        return pattern;
    }

    let mut rest = component;
    if let Some(stripped) = component.strip_prefix('*') {
        pattern.push('(');
        pattern.push_str(usage.leading_character());
        pattern.push_str(usage.single_asterisk());
        pattern.push_str(")?");
        rest = stripped;
    } else if let Some(stripped) = component.strip_prefix('?') {
        pattern.push_str(usage.leading_character());
        rest = stripped;
    } else if is_package_directory(component) {
        pattern.push_str(r"\x01?");
    }
    for character in rest.chars() {
        push_literal(&mut pattern, character, usage);
    }
    pattern
}

/// Regex source for one spec, without anchors
///
/// Returns `None` for file and directory usage when the spec ends in `**`,
/// which can never name a file.
pub fn sub_pattern_from_spec(spec: &str, base_path: &str, usage: Usage) -> Option<String> {
    let mut components = normalized_path_components(spec, base_path);
    let last = components.last()?.clone();
    if usage != Usage::Exclude && last == "**" {
        return None;
    }

    components[0] = remove_trailing_separator(&components[0]).to_string();
    if components[0] == "/" {
        components[0].clear();
    }
    if usage != Usage::Exclude && is_implicit_glob(&last) {
        components.push("**".to_string());
        components.push("*".to_string());
    }

    let mut subpattern = String::new();
    let mut has_written_component = false;
    let mut optional_count = 0;
    for component in &components {
        if component == "**" {
            subpattern.push_str(usage.double_asterisk());
        } else {
            if usage == Usage::Directories {
                subpattern.push('(');
                optional_count += 1;
            }
            if has_written_component {
                subpattern.push('/');
            }
            subpattern.push_str(&component_pattern(component, usage));
        }
        has_written_component = true;
    }
    for _ in 0..optional_count {
        subpattern.push_str(")?");
    }
    Some(subpattern)
}

/// One sub-pattern per spec that produces one; `None` when there are no specs
pub fn wildcard_patterns(specs: &[String], base_path: &str, usage: Usage) -> Option<Vec<String>> {
    if specs.is_empty() {
        return None;
    }
    Some(
        specs
            .iter()
            .filter(|spec| !spec.is_empty())
            .filter_map(|spec| sub_pattern_from_spec(spec, base_path, usage))
            .collect(),
    )
}

/// All specs combined into a single anchored pattern
pub fn wildcard_pattern(specs: &[String], base_path: &str, usage: Usage) -> Option<String> {
    let patterns = wildcard_patterns(specs, base_path, usage)?;
    if patterns.is_empty() {
        return None;
    }
    let alternatives = patterns
        .iter()
        .map(|pattern| format!("({pattern})"))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!("^({alternatives}){}", usage.terminator()))
}

/// Longest wildcard-free directory prefix of an absolute include spec
pub fn include_base_path(absolute: &str) -> String {
    match absolute.find(['*', '?']) {
        Some(wildcard_offset) => {
            let end = absolute[..wildcard_offset].rfind('/').unwrap_or(0);
            absolute[..end].to_string()
        }
        None if has_extension(absolute) => {
            remove_trailing_separator(&directory_path(absolute)).to_string()
        }
        None => absolute.to_string(),
    }
}

/// Directories to start enumeration from: `path`, plus include bases outside it
pub fn base_paths(path: &str, includes: &[String], case_sensitive: bool) -> Vec<String> {
    let mut include_base_paths: Vec<String> = includes
        .iter()
        .map(|include| {
            let absolute = if is_rooted(include) {
                include.clone()
            } else {
                normalize_path(&combine_paths(path, include))
            };
            include_base_path(&absolute)
        })
        .collect();

    if case_sensitive {
        include_base_paths.sort();
    } else {
        include_base_paths.sort_by_key(|base| base.to_lowercase());
    }

    let mut base_paths = vec![path.to_string()];
    for include_base_path in include_base_paths {
        let covered = base_paths
            .iter()
            .any(|base| contains_path(base, &include_base_path, path, !case_sensitive));
        if !covered {
            base_paths.push(include_base_path);
        }
    }
    base_paths
}

/// Regex sources for a walk rooted at `path`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMatcherPatterns {
    /// `^pattern$` for each include spec that can match files
    pub include_file_patterns: Option<Vec<String>>,
    pub include_file_pattern: Option<String>,
    pub include_directory_pattern: Option<String>,
    pub exclude_pattern: Option<String>,
    pub base_paths: Vec<String>,
}

pub fn get_file_matcher_patterns(
    path: &str,
    excludes: &[String],
    includes: &[String],
    case_sensitive: bool,
    current_dir: &str,
) -> FileMatcherPatterns {
    let path = normalize_path(path);
    let current_dir = normalize_path(current_dir);
    let absolute_path = combine_paths(&current_dir, &path);

    FileMatcherPatterns {
        include_file_patterns: wildcard_patterns(includes, &absolute_path, Usage::Files)
            .map(|patterns| patterns.into_iter().map(|p| format!("^{p}$")).collect()),
        include_file_pattern: wildcard_pattern(includes, &absolute_path, Usage::Files),
        include_directory_pattern: wildcard_pattern(includes, &absolute_path, Usage::Directories),
        exclude_pattern: wildcard_pattern(excludes, &absolute_path, Usage::Exclude),
        base_paths: base_paths(&path, includes, case_sensitive),
    }
}

/// A generated pattern compiled for one usage
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    usage: Usage,
    case_sensitive: bool,
}

impl CompiledPattern {
    pub fn new(pattern: &str, usage: Usage, case_sensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| TsconfError::pattern_error(pattern, e))?;
        trace!("Compiled {:?} pattern {}", usage, pattern);
        Ok(Self {
            regex,
            usage,
            case_sensitive,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(&self.mark(path))
    }

    fn mark<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match self.usage {
            Usage::Exclude => Cow::Borrowed(path),
            Usage::Directories => mark_package_directories(path, self.case_sensitive),
            Usage::Files => match mark_package_directories(path, self.case_sensitive) {
                Cow::Borrowed(path) => mark_minified(path, self.case_sensitive),
                Cow::Owned(path) => Cow::Owned(mark_minified(&path, self.case_sensitive).into_owned()),
            },
        }
    }
}

fn mark_package_directories(path: &str, case_sensitive: bool) -> Cow<'_, str> {
    let is_marked = |component: &str| {
        if case_sensitive {
            PACKAGE_DIRECTORIES.contains(&component)
        } else {
            is_package_directory(component)
        }
    };
    if !path.split('/').any(is_marked) {
        return Cow::Borrowed(path);
    }
    let marked = path
        .split('/')
        .map(|component| {
            if is_marked(component) {
                format!("{PACKAGE_DIRECTORY}{component}")
            } else {
                component.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/");
    Cow::Owned(marked)
}

fn mark_minified(path: &str, case_sensitive: bool) -> Cow<'_, str> {
    let Some(dot) = path.len().checked_sub(MINIFIED_JS_SUFFIX.len()) else {
        return Cow::Borrowed(path);
    };
    let is_minified = path.get(dot..).is_some_and(|suffix| {
        if case_sensitive {
            suffix == MINIFIED_JS_SUFFIX
        } else {
            suffix.eq_ignore_ascii_case(MINIFIED_JS_SUFFIX)
        }
    });
    if !is_minified {
        return Cow::Borrowed(path);
    }
    let mut marked = String::with_capacity(path.len());
    marked.push_str(&path[..dot]);
    marked.push(MINIFIED_DOT);
    marked.push_str(&path[dot + 1..]);
    Cow::Owned(marked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn compile(spec: &str, usage: Usage) -> CompiledPattern {
        let pattern = match usage {
            Usage::Exclude => wildcard_pattern(&specs(&[spec]), "/proj", usage).unwrap(),
            _ => format!("^{}$", sub_pattern_from_spec(spec, "/proj", usage).unwrap()),
        };
        CompiledPattern::new(&pattern, usage, true).unwrap()
    }

    #[test]
    fn test_exclude_pattern_text() {
        let pattern = wildcard_pattern(
            &specs(&["node_modules", "src/**/*.spec.ts"]),
            "/proj",
            Usage::Exclude,
        );
        insta::assert_snapshot!(
            pattern.unwrap(),
            @r"^((/proj/node_modules)|(/proj/src(/.+?)?/[^/]*\.spec\.ts))($|/)"
        );
    }

    #[test]
    fn test_files_pattern_text() {
        let pattern = sub_pattern_from_spec("src/*.ts", "/proj", Usage::Files);
        insta::assert_snapshot!(
            pattern.unwrap(),
            @r"/proj/src/([^./\x00\x01][^/\x00]*)?[.\x00]ts"
        );
    }

    #[test]
    fn test_trailing_double_asterisk_yields_no_file_pattern() {
        assert_eq!(sub_pattern_from_spec("src/**", "/proj", Usage::Files), None);
        assert_eq!(sub_pattern_from_spec("src/**", "/proj", Usage::Directories), None);
        assert!(sub_pattern_from_spec("src/**", "/proj", Usage::Exclude).is_some());
    }

    #[test]
    fn test_implicit_glob_matches_everything_below() {
        let files = compile("src", Usage::Files);
        assert!(files.is_match("/proj/src/a.ts"));
        assert!(files.is_match("/proj/src/deep/nested/b.ts"));
        assert!(!files.is_match("/proj/srcs/a.ts"));
        assert!(!files.is_match("/proj/src/.hidden.ts"));
    }

    #[test]
    fn test_star_skips_minified_files() {
        let files = compile("**/*.js", Usage::Files);
        assert!(files.is_match("/proj/lib/app.js"));
        assert!(!files.is_match("/proj/lib/app.min.js"));

        let explicit = compile("**/*.min.js", Usage::Files);
        assert!(explicit.is_match("/proj/lib/app.min.js"));

        let literal = compile("lib/app.min.js", Usage::Files);
        assert!(literal.is_match("/proj/lib/app.min.js"));
    }

    #[test]
    fn test_wildcards_skip_package_directories() {
        let files = compile("**/*.ts", Usage::Files);
        assert!(files.is_match("/proj/src/a.ts"));
        assert!(!files.is_match("/proj/node_modules/pkg/index.ts"));
        assert!(!files.is_match("/proj/src/bower_components/x.ts"));

        let explicit = compile("node_modules/**/*.ts", Usage::Files);
        assert!(explicit.is_match("/proj/node_modules/pkg/index.ts"));

        let directories = compile("**/*", Usage::Directories);
        assert!(directories.is_match("/proj/src"));
        assert!(!directories.is_match("/proj/node_modules"));
        assert!(!directories.is_match("/proj/.git"));
    }

    #[test]
    fn test_directory_pattern_matches_prefixes() {
        let directories = compile("src/app/*.ts", Usage::Directories);
        assert!(directories.is_match("/proj"));
        assert!(directories.is_match("/proj/src"));
        assert!(directories.is_match("/proj/src/app"));
        assert!(!directories.is_match("/proj/lib"));
    }

    #[test]
    fn test_exclude_matches_descendants() {
        let exclude = compile("dist", Usage::Exclude);
        assert!(exclude.is_match("/proj/dist"));
        assert!(exclude.is_match("/proj/dist/a.js"));
        assert!(!exclude.is_match("/proj/distribution/a.js"));

        let exclude = compile("**/*.test.ts", Usage::Exclude);
        assert!(exclude.is_match("/proj/src/a.test.ts"));
        assert!(exclude.is_match("/proj/node_modules/a.test.ts"));
    }

    #[test]
    fn test_literal_characters_are_escaped() {
        let files = compile("src/(legacy)+[v1]/a.ts", Usage::Files);
        assert!(files.is_match("/proj/src/(legacy)+[v1]/a.ts"));
        assert!(!files.is_match("/proj/src/legacy/a.ts"));
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        let files = compile("src/?.ts", Usage::Files);
        assert!(files.is_match("/proj/src/a.ts"));
        assert!(!files.is_match("/proj/src/ab.ts"));
        assert!(!files.is_match("/proj/src/..ts"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let pattern = format!("^{}$", sub_pattern_from_spec("src/*.js", "/proj", Usage::Files).unwrap());
        let compiled = CompiledPattern::new(&pattern, Usage::Files, false).unwrap();
        assert!(compiled.is_match("/PROJ/Src/App.JS"));
        assert!(!compiled.is_match("/proj/src/app.MIN.js"));
    }

    #[test]
    fn test_include_base_path() {
        assert_eq!(include_base_path("/proj/src/**/*.ts"), "/proj/src");
        assert_eq!(include_base_path("/proj/src/a*.ts"), "/proj/src");
        assert_eq!(include_base_path("/proj/src/a.ts"), "/proj/src");
        assert_eq!(include_base_path("/proj/src"), "/proj/src");
    }

    #[test]
    fn test_base_paths_are_pruned() {
        let bases = base_paths(
            "/proj",
            &specs(&["src/**/*", "../shared/**/*", "../shared/lib/*.ts", "/other/a.ts"]),
            true,
        );
        assert_eq!(bases, specs(&["/proj", "/other", "/shared"]));
    }

    #[test]
    fn test_file_matcher_patterns() {
        let patterns = get_file_matcher_patterns(
            "/proj",
            &specs(&["dist"]),
            &specs(&["src/**/*", "src/**"]),
            true,
            "/",
        );
        assert_eq!(patterns.include_file_patterns.as_ref().map(Vec::len), Some(1));
        assert!(patterns.include_directory_pattern.is_some());
        assert_eq!(
            patterns.exclude_pattern.as_deref(),
            Some("^((/proj/dist))($|/)")
        );
        assert_eq!(patterns.base_paths, specs(&["/proj"]));

        let empty = get_file_matcher_patterns("/proj", &[], &[], true, "/");
        assert_eq!(empty.include_file_patterns, None);
        assert_eq!(empty.exclude_pattern, None);
    }
}
