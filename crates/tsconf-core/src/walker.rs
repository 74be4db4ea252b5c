//! Directory walk driven by compiled include/exclude patterns

use crate::host::{ConfigHost, entry_path};
use crate::matcher::{CompiledPattern, Usage, get_file_matcher_patterns};
use crate::path::{canonical_key, combine_paths, file_extension_is_one_of, normalize_path};
use crate::Result;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Inputs to [`match_files`]
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions<'a> {
    /// Accept only files with one of these extensions; `None` accepts all
    pub extensions: Option<&'a [String]>,
    pub excludes: &'a [String],
    pub includes: &'a [String],
    pub current_dir: &'a str,
    /// Number of directory levels to read; `None` is unbounded
    pub depth: Option<usize>,
}

struct Walk<'a, H: ConfigHost + ?Sized> {
    host: &'a H,
    extensions: Option<&'a [String]>,
    include_file_patterns: Option<Vec<CompiledPattern>>,
    include_directory_pattern: Option<CompiledPattern>,
    exclude_pattern: Option<CompiledPattern>,
    case_sensitive: bool,
    visited: HashSet<String>,
    /// One bucket per include pattern, so results come out in include order
    results: Vec<Vec<String>>,
}

/// Enumerate files below `path` that match the include specs and not the excludes
///
/// Each physical directory is read once per call even when it is reachable
/// through several base paths or symlinks.
pub fn match_files<H: ConfigHost + ?Sized>(
    host: &H,
    path: &str,
    options: WalkOptions<'_>,
) -> Result<Vec<String>> {
    let case_sensitive = host.use_case_sensitive_file_names();
    let path = normalize_path(path);
    let current_dir = normalize_path(options.current_dir);
    let patterns = get_file_matcher_patterns(
        &path,
        options.excludes,
        options.includes,
        case_sensitive,
        &current_dir,
    );

    let compile = |pattern: &str, usage| CompiledPattern::new(pattern, usage, case_sensitive);
    let include_file_patterns = patterns
        .include_file_patterns
        .as_ref()
        .map(|patterns| {
            patterns
                .iter()
                .map(|pattern| compile(pattern, Usage::Files))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    let include_directory_pattern = patterns
        .include_directory_pattern
        .as_deref()
        .map(|pattern| compile(pattern, Usage::Directories))
        .transpose()?;
    let exclude_pattern = patterns
        .exclude_pattern
        .as_deref()
        .map(|pattern| compile(pattern, Usage::Exclude))
        .transpose()?;

    let buckets = include_file_patterns.as_ref().map_or(1, Vec::len);
    let mut walk = Walk {
        host,
        extensions: options.extensions,
        include_file_patterns,
        include_directory_pattern,
        exclude_pattern,
        case_sensitive,
        visited: HashSet::new(),
        results: vec![Vec::new(); buckets],
    };

    for base_path in &patterns.base_paths {
        debug!("Walking {}", base_path);
        let absolute = combine_paths(&current_dir, base_path);
        walk.visit_directory(base_path, &absolute, options.depth)?;
    }

    Ok(walk.results.into_iter().flatten().collect())
}

impl<H: ConfigHost + ?Sized> Walk<'_, H> {
    fn visit_directory(&mut self, path: &str, absolute_path: &str, depth: Option<usize>) -> Result<()> {
        let canonical = canonical_key(&self.host.realpath(absolute_path), self.case_sensitive);
        if !self.visited.insert(canonical) {
            trace!("Already visited {}", absolute_path);
            return Ok(());
        }

        let entries = self.host.get_entries(path)?;
        let (mut files, mut directories): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|entry| entry.is_file);
        files.sort_by(|a, b| a.name.cmp(&b.name));
        directories.sort_by(|a, b| a.name.cmp(&b.name));

        for file in &files {
            let name = entry_path(path, &file.name);
            let absolute_name = entry_path(absolute_path, &file.name);
            if self
                .extensions
                .is_some_and(|extensions| !file_extension_is_one_of(&name, extensions))
            {
                continue;
            }
            if self
                .exclude_pattern
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(&absolute_name))
            {
                trace!("Excluded {}", absolute_name);
                continue;
            }
            match &self.include_file_patterns {
                None => self.results[0].push(name),
                Some(patterns) => {
                    if let Some(index) = patterns.iter().position(|p| p.is_match(&absolute_name)) {
                        self.results[index].push(name);
                    }
                }
            }
        }

        let depth = match depth {
            Some(1) => return Ok(()),
            Some(depth) => Some(depth.saturating_sub(1)),
            None => None,
        };

        for directory in &directories {
            let name = entry_path(path, &directory.name);
            let absolute_name = entry_path(absolute_path, &directory.name);
            let included = self
                .include_directory_pattern
                .as_ref()
                .is_none_or(|include| include.is_match(&absolute_name));
            let excluded = self
                .exclude_pattern
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(&absolute_name));
            if included && !excluded {
                self.visit_directory(&name, &absolute_name, depth)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn specs(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn project() -> MemoryHost {
        MemoryHost::new()
            .with_file("/proj/b.ts", "")
            .with_file("/proj/a.ts", "")
            .with_file("/proj/readme.md", "")
            .with_file("/proj/src/index.ts", "")
            .with_file("/proj/src/util/helpers.ts", "")
            .with_file("/proj/test/index.spec.ts", "")
            .with_file("/proj/node_modules/pkg/index.ts", "")
            .with_file("/proj/.cache/x.ts", "")
    }

    fn walk(host: &MemoryHost, includes: &[&str], excludes: &[&str]) -> Vec<String> {
        let extensions = specs(&[".ts"]);
        let includes = specs(includes);
        let excludes = specs(excludes);
        match_files(
            host,
            "/proj",
            WalkOptions {
                extensions: Some(&extensions),
                excludes: &excludes,
                includes: &includes,
                current_dir: "/proj",
                depth: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_walk_sorted_and_filtered() {
        let files = walk(&project(), &["**/*"], &[]);
        assert_eq!(
            files,
            specs(&[
                "/proj/a.ts",
                "/proj/b.ts",
                "/proj/src/index.ts",
                "/proj/src/util/helpers.ts",
                "/proj/test/index.spec.ts",
            ])
        );
    }

    #[test]
    fn test_results_grouped_by_include() {
        let files = walk(&project(), &["test/**/*", "src/**/*"], &[]);
        assert_eq!(
            files,
            specs(&[
                "/proj/test/index.spec.ts",
                "/proj/src/index.ts",
                "/proj/src/util/helpers.ts",
            ])
        );
    }

    #[test]
    fn test_excluded_directories_are_not_entered() {
        let files = walk(&project(), &["**/*"], &["src/util", "**/*.spec.ts"]);
        assert_eq!(
            files,
            specs(&["/proj/a.ts", "/proj/b.ts", "/proj/src/index.ts"])
        );
    }

    #[test]
    fn test_symlinked_directory_is_read_once() {
        let host = MemoryHost::new()
            .with_file("/proj/src/a.ts", "")
            .with_symlink("/proj/src/again", "/proj/src");
        let files = walk(&host, &["**/*"], &[]);
        assert_eq!(files, specs(&["/proj/src/a.ts"]));
    }

    #[test]
    fn test_depth_limit() {
        let host = project();
        let includes = specs(&["**/*"]);
        let files = match_files(
            &host,
            "/proj",
            WalkOptions {
                extensions: None,
                excludes: &[],
                includes: &includes,
                current_dir: "/proj",
                depth: Some(1),
            },
        )
        .unwrap();
        assert_eq!(files, specs(&["/proj/a.ts", "/proj/b.ts", "/proj/readme.md"]));
    }
}
