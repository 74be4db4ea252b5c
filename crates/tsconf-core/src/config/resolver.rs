//! Configuration resolution
//!
//! [`ConfigResolver`] turns a configuration document into a
//! [`ResolutionResult`]: it follows the `extends` chain, merges inherited
//! options and file specs, builds the spec set and walks the project tree.
//!
//! Each document goes through `Fresh -> InProgress -> Resolved | Circular`.
//! Cycles are detected with the chain of documents currently being resolved,
//! copied per branch so sibling `extends` entries never see each other's
//! progress. Problems are reported as diagnostics; only host I/O failures and
//! rejected patterns abort resolution with an error.

use super::cache::{CachedConfig, ExtendedConfigCache};
use super::document::{RawConfig, read_document};
use super::specs::{FileSpecSet, SpecSources, get_config_file_specs};
use crate::diagnostics::Diagnostic;
use crate::extensions::ExtraFileExtension;
use crate::file_names::get_file_names_from_config_specs;
use crate::host::ConfigHost;
use crate::options::descriptor::{COMPILE_ON_SAVE_OPTION, EXTENDS_OPTION};
use crate::options::{
    CompilerOptions, ConversionSource, OptionRegistry, OptionValue, convert_compiler_options,
    convert_value,
};
use crate::path::{
    canonical_key, combine_paths, directory_path, is_rooted, normalize_slashes,
    normalized_absolute_path, relative_path, starts_with_config_dir_template,
};
use crate::wildcard::get_wildcard_directories;
use crate::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, trace, warn};

/// Lifecycle of one document during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigState {
    Fresh,
    InProgress,
    Resolved,
    Circular,
}

/// One document with its inherited values merged in
#[derive(Debug, Clone)]
pub struct ParsedConfigNode {
    /// Normalized absolute path of the document
    pub path: String,
    pub raw: RawConfig,
    pub options: CompilerOptions,
    /// Resolved paths of the documents this one extends, in declaration order
    pub extends_targets: Vec<String>,
    /// Effective `files`/`include`/`exclude`: own value, else the inherited one
    pub files: Option<Value>,
    pub include: Option<Value>,
    pub exclude: Option<Value>,
    pub compile_on_save: Option<bool>,
    /// Every document reached through `extends`, transitively
    pub extended_source_files: Vec<String>,
    pub state: ConfigState,
}

impl ParsedConfigNode {
    fn new(path: &str, raw: RawConfig) -> Self {
        Self {
            path: path.to_string(),
            files: raw.files.clone(),
            include: raw.include.clone(),
            exclude: raw.exclude.clone(),
            raw,
            options: CompilerOptions::default(),
            extends_targets: Vec::new(),
            compile_on_save: None,
            extended_source_files: Vec::new(),
            state: ConfigState::Fresh,
        }
    }

    fn directory(&self) -> String {
        directory_path(&self.path)
    }

    /// Take an ancestor's values for everything this document leaves unset
    ///
    /// `files`, `include` and `exclude` are replaced as a whole and rebased onto
    /// this document's directory; options are merged field by field.
    fn inherit_from(&mut self, ancestor: &ParsedConfigNode, ignore_case: bool) {
        let rebase = relative_path(&self.directory(), &ancestor.directory(), ignore_case);
        if self.raw.files.is_none() && ancestor.files.is_some() {
            self.files = ancestor.files.as_ref().map(|specs| rebase_specs(specs, &rebase));
        }
        if self.raw.include.is_none() && ancestor.include.is_some() {
            self.include = ancestor.include.as_ref().map(|specs| rebase_specs(specs, &rebase));
        }
        if self.raw.exclude.is_none() && ancestor.exclude.is_some() {
            self.exclude = ancestor.exclude.as_ref().map(|specs| rebase_specs(specs, &rebase));
        }
        if self.raw.compile_on_save.is_none() && ancestor.compile_on_save.is_some() {
            self.compile_on_save = ancestor.compile_on_save;
        }

        for file in std::iter::once(&ancestor.path).chain(&ancestor.extended_source_files) {
            if !self.extended_source_files.contains(file) {
                self.extended_source_files.push(file.clone());
            }
        }
    }
}

/// Prefix relative string specs with the path from the inheriting document to the ancestor
fn rebase_specs(specs: &Value, relative: &str) -> Value {
    let Value::Array(items) = specs else {
        return specs.clone();
    };
    let rebased = items
        .iter()
        .map(|item| match item.as_str() {
            Some(spec) if !is_rooted(spec) && !starts_with_config_dir_template(spec) => {
                Value::String(combine_paths(relative, spec))
            }
            _ => item.clone(),
        })
        .collect();
    Value::Array(rebased)
}

/// Entry of the `references` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReference {
    /// Normalized absolute path of the referenced project
    pub path: String,
    /// Path as written
    pub original_path: String,
    pub prepend: bool,
    pub circular: bool,
}

/// Everything known about a project after resolution
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub config_file_path: String,
    #[serde(skip)]
    pub options: CompilerOptions,
    pub file_names: Vec<String>,
    pub project_references: Vec<ProjectReference>,
    /// Root document as written
    pub raw: RawConfig,
    pub specs: FileSpecSet,
    pub wildcard_directories: IndexMap<String, bool>,
    pub compile_on_save: Option<bool>,
    pub extended_source_files: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolutionResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// The effective configuration as a document, for `--showConfig`
    pub fn show_config(&self) -> Value {
        let mut config = Map::new();
        config.insert(
            "compilerOptions".to_string(),
            Value::Object(self.options.to_json()),
        );
        if !self.project_references.is_empty() {
            let references = self
                .project_references
                .iter()
                .map(|reference| serde_json::json!({ "path": reference.original_path }))
                .collect();
            config.insert("references".to_string(), Value::Array(references));
        }
        config.insert(
            "files".to_string(),
            Value::Array(self.file_names.iter().cloned().map(Value::String).collect()),
        );
        if let Some(include) = self.specs.include.as_ref().filter(|_| !self.specs.is_default_include) {
            config.insert("include".to_string(), string_array(include));
        }
        if let Some(exclude) = &self.specs.exclude {
            config.insert("exclude".to_string(), string_array(exclude));
        }
        if let Some(compile_on_save) = self.compile_on_save {
            config.insert("compileOnSave".to_string(), Value::Bool(compile_on_save));
        }
        Value::Object(config)
    }
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

/// Resolves configuration documents through a [`ConfigHost`]
pub struct ConfigResolver<'a, H: ConfigHost + ?Sized> {
    host: &'a H,
    registry: &'a OptionRegistry,
    extra_extensions: Vec<ExtraFileExtension>,
}

impl<'a, H: ConfigHost + ?Sized> ConfigResolver<'a, H> {
    pub fn new(host: &'a H, registry: &'a OptionRegistry) -> Self {
        Self {
            host,
            registry,
            extra_extensions: Vec::new(),
        }
    }

    /// Additional source extensions supported by the host
    pub fn with_extra_extensions(mut self, extra_extensions: Vec<ExtraFileExtension>) -> Self {
        self.extra_extensions = extra_extensions;
        self
    }

    fn ignore_case(&self) -> bool {
        !self.host.use_case_sensitive_file_names()
    }

    fn key(&self, path: &str) -> String {
        canonical_key(path, self.host.use_case_sensitive_file_names())
    }

    /// Resolve the document at `config_file`
    ///
    /// `existing_options` (typically parsed from the command line) take
    /// precedence over every configured value.
    pub fn resolve_config_file(
        &self,
        config_file: &str,
        existing_options: Option<&CompilerOptions>,
        cache: Option<&mut ExtendedConfigCache>,
    ) -> Result<ResolutionResult> {
        let config_file = normalized_absolute_path(config_file, "");
        info!("Resolving configuration {}", config_file);
        let mut diagnostics = Vec::new();
        let node = self.parse_config(&config_file, None, &[], cache, &mut diagnostics)?;
        self.finish(node, existing_options, diagnostics)
    }

    /// Resolve an already parsed document as if it were stored at `config_file`
    pub fn resolve_config_json(
        &self,
        json: &Value,
        config_file: &str,
        existing_options: Option<&CompilerOptions>,
        cache: Option<&mut ExtendedConfigCache>,
    ) -> Result<ResolutionResult> {
        let config_file = normalized_absolute_path(config_file, "");
        let mut diagnostics = Vec::new();
        let object = match json {
            Value::Object(object) => object.clone(),
            _ => {
                diagnostics.push(Diagnostic::root_not_object(&config_file).with_file(&config_file));
                Map::new()
            }
        };
        let node = self.parse_config(&config_file, Some(object), &[], cache, &mut diagnostics)?;
        self.finish(node, existing_options, diagnostics)
    }

    /// Parse one document and merge in everything it extends
    ///
    /// `stack` holds the documents currently being resolved above this one.
    pub fn parse_config(
        &self,
        path: &str,
        preloaded: Option<Map<String, Value>>,
        stack: &[String],
        mut cache: Option<&mut ExtendedConfigCache>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ParsedConfigNode> {
        let key = self.key(path);
        if stack.iter().any(|entry| self.key(entry) == key) {
            let mut chain = stack.to_vec();
            chain.push(path.to_string());
            warn!("Circular extends chain: {}", chain.join(" -> "));
            diagnostics.push(Diagnostic::circularity(&chain).with_file(path));

            // Best effort: the document as written, nothing merged
            let mut ignored = Vec::new();
            let object = match preloaded {
                Some(object) => object,
                None => read_document(self.host, path, &mut ignored)?,
            };
            let mut node = ParsedConfigNode::new(path, RawConfig::from_object(&object));
            node.state = ConfigState::Circular;
            return Ok(node);
        }

        let is_extended = !stack.is_empty();
        let cached = cache
            .as_deref()
            .filter(|_| is_extended)
            .and_then(|cache| cache.get(&key));
        if let Some(cached) = cached {
            debug!("Using cached extended configuration {}", path);
            diagnostics.extend(cached.diagnostics.iter().cloned());
            return Ok(cached.node.clone());
        }

        let mut own_diagnostics = Vec::new();
        let object = match preloaded {
            Some(object) => object,
            None => read_document(self.host, path, &mut own_diagnostics)?,
        };
        let node = self.parse_config_object(path, &object, stack, cache.as_deref_mut(), &mut own_diagnostics)?;

        if let Some(cache) = cache.filter(|_| is_extended) {
            cache.insert(
                key,
                CachedConfig {
                    node: node.clone(),
                    diagnostics: own_diagnostics.clone(),
                },
            );
        }
        diagnostics.extend(own_diagnostics);
        Ok(node)
    }

    fn parse_config_object(
        &self,
        path: &str,
        object: &Map<String, Value>,
        stack: &[String],
        mut cache: Option<&mut ExtendedConfigCache>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ParsedConfigNode> {
        let mut node = ParsedConfigNode::new(path, RawConfig::from_object(object));
        node.state = ConfigState::InProgress;
        let directory = node.directory();

        let mut own = Vec::new();
        node.options = convert_compiler_options(
            self.registry,
            node.raw.compiler_options.as_ref(),
            &directory,
            &mut own,
        );
        if let Some(raw) = &node.raw.compile_on_save {
            node.compile_on_save = match convert_value(
                &COMPILE_ON_SAVE_OPTION,
                raw,
                &directory,
                ConversionSource::ConfigFile,
                &mut own,
            ) {
                Some(OptionValue::Bool(flag)) => Some(flag),
                _ => None,
            };
        }
        let extends = node
            .raw
            .extends
            .as_ref()
            .map(|raw| self.extends_names(raw, &directory, &mut own))
            .unwrap_or_default();
        diagnostics.extend(own.into_iter().map(|d| d.with_file(path)));

        if !extends.is_empty() {
            // Each document resolves its ancestors on its own copy of the chain
            let mut branch = stack.to_vec();
            branch.push(path.to_string());

            let mut ancestors = Vec::new();
            for name in extends {
                if name.is_empty() {
                    diagnostics.push(Diagnostic::empty_string_option("extends").with_file(path));
                    continue;
                }
                let Some(target) = self.resolve_extends_path(&name, &directory) else {
                    diagnostics.push(Diagnostic::file_not_found(&name).with_file(path));
                    continue;
                };
                trace!("{} extends {}", path, target);
                node.extends_targets.push(target.clone());
                let ancestor = self.parse_config(&target, None, &branch, cache.as_deref_mut(), diagnostics)?;
                if ancestor.state != ConfigState::Circular {
                    ancestors.push(ancestor);
                }
            }

            for ancestor in &ancestors {
                node.inherit_from(ancestor, self.ignore_case());
            }
            // Later ancestors take precedence over earlier ones
            for ancestor in ancestors.iter().rev() {
                node.options.merge_with(&ancestor.options);
            }
        }

        node.state = ConfigState::Resolved;
        Ok(node)
    }

    fn extends_names(&self, raw: &Value, directory: &str, diagnostics: &mut Vec<Diagnostic>) -> Vec<String> {
        match convert_value(
            &EXTENDS_OPTION,
            raw,
            directory,
            ConversionSource::ConfigFile,
            diagnostics,
        ) {
            Some(OptionValue::List(names)) => names
                .into_iter()
                .filter_map(|name| match name {
                    OptionValue::String(name) => Some(name),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Locate the document named by an `extends` entry
    ///
    /// Paths (rooted, `./` or `../`) are resolved against the extending
    /// document, retrying with `.json` appended. Bare names are package
    /// lookups through `node_modules` directories walking upward.
    pub fn resolve_extends_path(&self, name: &str, directory: &str) -> Option<String> {
        let name = normalize_slashes(name);
        if is_rooted(&name) || name.starts_with("./") || name.starts_with("../") {
            let candidate = normalized_absolute_path(&name, directory);
            if self.host.file_exists(&candidate) {
                return Some(candidate);
            }
            if !candidate.ends_with(".json") {
                let with_extension = format!("{candidate}.json");
                if self.host.file_exists(&with_extension) {
                    return Some(with_extension);
                }
            }
            return None;
        }

        let mut current = directory.to_string();
        loop {
            let package = combine_paths(&combine_paths(&current, "node_modules"), &name);
            let candidates = [
                package.clone(),
                format!("{package}.json"),
                combine_paths(&package, "tsconfig.json"),
            ];
            if let Some(found) = candidates.into_iter().find(|c| self.host.file_exists(c)) {
                return Some(normalized_absolute_path(&found, ""));
            }
            let parent = directory_path(&current);
            if parent == current {
                return None;
            }
            current = parent;
        }
    }

    fn project_references(
        &self,
        raw: Option<&Value>,
        directory: &str,
        file: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ProjectReference> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        let Value::Array(entries) = raw else {
            diagnostics.push(Diagnostic::option_type_mismatch("references", "Array").with_file(file));
            return Vec::new();
        };

        let mut references = Vec::new();
        for entry in entries {
            let Some(original_path) = entry.get("path").and_then(Value::as_str) else {
                diagnostics.push(Diagnostic::option_type_mismatch("reference.path", "string").with_file(file));
                continue;
            };
            let flag = |name: &str| entry.get(name).and_then(Value::as_bool).unwrap_or(false);
            references.push(ProjectReference {
                path: normalized_absolute_path(original_path, directory),
                original_path: original_path.to_string(),
                prepend: flag("prepend"),
                circular: flag("circular"),
            });
        }
        references
    }

    fn finish(
        &self,
        node: ParsedConfigNode,
        existing_options: Option<&CompilerOptions>,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Result<ResolutionResult> {
        let directory = node.directory();
        let config_file = node.path.clone();

        let mut options = match existing_options {
            Some(existing) => {
                let mut options = existing.clone();
                options.merge_with(&node.options);
                options
            }
            None => node.options.clone(),
        };
        options.substitute_config_dir(&directory);

        let mut own = Vec::new();
        let specs = get_config_file_specs(
            SpecSources {
                files: node.files.as_ref(),
                include: node.include.as_ref(),
                exclude: node.exclude.as_ref(),
                has_references: node.raw.has_references(),
                has_extends: node.raw.extends.is_some(),
            },
            &options,
            &directory,
            &config_file,
            &mut own,
        );
        let project_references =
            self.project_references(node.raw.references.as_ref(), &directory, &config_file, &mut own);

        let file_names = get_file_names_from_config_specs(
            &specs,
            &directory,
            &options,
            self.host,
            &self.extra_extensions,
        )?;
        if file_names.is_empty() && node.files.is_none() && node.raw.references.is_none() {
            let include = serde_json::to_string(specs.include.as_deref().unwrap_or_default())
                .unwrap_or_default();
            let exclude = serde_json::to_string(specs.exclude.as_deref().unwrap_or_default())
                .unwrap_or_default();
            own.push(Diagnostic::no_inputs_found(&config_file, &include, &exclude));
        }
        diagnostics.extend(own.into_iter().map(|d| d.with_file(&config_file)));

        let wildcard_directories = get_wildcard_directories(
            &specs.validated_include,
            &specs.validated_exclude,
            &directory,
            self.host.use_case_sensitive_file_names(),
        )?;

        info!(
            "Resolved {}: {} files, {} diagnostics",
            config_file,
            file_names.len(),
            diagnostics.len()
        );

        Ok(ResolutionResult {
            config_file_path: config_file,
            options,
            file_names,
            project_references,
            raw: node.raw,
            specs,
            wildcard_directories,
            compile_on_save: node.compile_on_save,
            extended_source_files: node.extended_source_files,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::options::{ScriptTarget, Tristate};

    fn resolve(host: &MemoryHost, path: &str) -> ResolutionResult {
        let registry = OptionRegistry::new();
        ConfigResolver::new(host, &registry)
            .resolve_config_file(path, None, None)
            .unwrap()
    }

    #[test]
    fn test_resolve_without_extends() {
        let host = MemoryHost::new()
            .with_file("/proj/tsconfig.json", r#"{ "compilerOptions": { "strict": true } }"#)
            .with_file("/proj/src/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");

        assert_eq!(result.options.strict, Tristate::True);
        assert_eq!(result.file_names, vec!["/proj/src/a.ts"]);
        assert!(result.diagnostics.is_empty());
        assert!(result.specs.is_default_include);
        assert_eq!(result.wildcard_directories.get("/proj"), Some(&true));
    }

    #[test]
    fn test_extends_resolves_relative_and_appends_json() {
        let host = MemoryHost::new()
            .with_file("/proj/configs/base.json", r#"{ "compilerOptions": { "target": "es2017" } }"#)
            .with_file("/proj/tsconfig.json", r#"{ "extends": "./configs/base" }"#)
            .with_file("/proj/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");

        assert_eq!(result.options.target, Some(ScriptTarget::Es2017));
        assert_eq!(result.extended_source_files, vec!["/proj/configs/base.json"]);
    }

    #[test]
    fn test_extends_package_lookup() {
        let host = MemoryHost::new()
            .with_file(
                "/node_modules/@tsconfig/node20/tsconfig.json",
                r#"{ "compilerOptions": { "module": "node16" } }"#,
            )
            .with_file("/proj/tsconfig.json", r#"{ "extends": "@tsconfig/node20" }"#)
            .with_file("/proj/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");
        assert!(result.options.module.is_some());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_extends_target_keeps_siblings() {
        let host = MemoryHost::new()
            .with_file("/proj/base.json", r#"{ "compilerOptions": { "allowJs": true } }"#)
            .with_file(
                "/proj/tsconfig.json",
                r#"{ "extends": ["./missing.json", "", "./base.json"] }"#,
            )
            .with_file("/proj/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");

        assert_eq!(result.options.allow_js, Tristate::True);
        let codes: Vec<u32> = result.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![6053, 18051]);
        assert!(
            result
                .diagnostics
                .iter()
                .all(|d| d.file.as_deref() == Some("/proj/tsconfig.json"))
        );
    }

    #[test]
    fn test_circular_extends() {
        let host = MemoryHost::new()
            .with_file("/proj/a.json", r#"{ "extends": "./b.json", "compilerOptions": { "strict": true } }"#)
            .with_file("/proj/b.json", r#"{ "extends": "./a.json", "compilerOptions": { "noEmit": true } }"#)
            .with_file("/proj/x.ts", "");
        let result = resolve(&host, "/proj/a.json");

        let circular: Vec<_> = result
            .diagnostics
            .iter()
            .filter(|d| d.code == 18000)
            .collect();
        assert_eq!(circular.len(), 1);
        assert!(circular[0].message.contains("/proj/a.json -> /proj/b.json -> /proj/a.json"));
        assert_eq!(result.options.strict, Tristate::True);
        assert_eq!(result.options.no_emit, Tristate::True);
    }

    #[test]
    fn test_cache_replays_diagnostics() {
        let host = MemoryHost::new()
            .with_file("/proj/base.json", r#"{ "compilerOptions": { "bogus": 1 } }"#)
            .with_file("/proj/app/tsconfig.json", r#"{ "extends": "../base.json" }"#)
            .with_file("/proj/lib/tsconfig.json", r#"{ "extends": "../base.json" }"#)
            .with_file("/proj/app/a.ts", "")
            .with_file("/proj/lib/b.ts", "");
        let registry = OptionRegistry::new();
        let resolver = ConfigResolver::new(&host, &registry);
        let mut cache = ExtendedConfigCache::new();

        let app = resolver
            .resolve_config_file("/proj/app/tsconfig.json", None, Some(&mut cache))
            .unwrap();
        assert_eq!(cache.len(), 1);
        let lib = resolver
            .resolve_config_file("/proj/lib/tsconfig.json", None, Some(&mut cache))
            .unwrap();

        assert_eq!(app.diagnostics.len(), 1);
        assert_eq!(lib.diagnostics, app.diagnostics);
        assert_eq!(lib.file_names, vec!["/proj/lib/b.ts"]);
    }

    #[test]
    fn test_inherited_include_is_rebased() {
        let host = MemoryHost::new()
            .with_file("/proj/configs/base.json", r#"{ "include": ["../src/**/*"] }"#)
            .with_file("/proj/tsconfig.json", r#"{ "extends": "./configs/base.json" }"#)
            .with_file("/proj/src/a.ts", "")
            .with_file("/proj/other/b.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");

        assert_eq!(result.specs.include, Some(vec!["configs/../src/**/*".to_string()]));
        assert_eq!(result.file_names, vec!["/proj/src/a.ts"]);
    }

    #[test]
    fn test_project_references() {
        let host = MemoryHost::new()
            .with_file(
                "/proj/tsconfig.json",
                r#"{ "files": [], "references": [{ "path": "./packages/core", "prepend": true }, { "path": 1 }] }"#,
            );
        let result = resolve(&host, "/proj/tsconfig.json");

        assert_eq!(
            result.project_references,
            vec![ProjectReference {
                path: "/proj/packages/core".to_string(),
                original_path: "./packages/core".to_string(),
                prepend: true,
                circular: false,
            }]
        );
        // Only the malformed reference is reported; an empty `files` with references is fine
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code, 5024);
    }

    #[test]
    fn test_compile_on_save_is_inherited() {
        let host = MemoryHost::new()
            .with_file("/proj/base.json", r#"{ "compileOnSave": true }"#)
            .with_file("/proj/tsconfig.json", r#"{ "extends": "./base.json" }"#)
            .with_file("/proj/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");
        assert_eq!(result.compile_on_save, Some(true));
    }

    #[test]
    fn test_resolve_config_json() {
        let host = MemoryHost::new().with_file("/proj/a.ts", "");
        let registry = OptionRegistry::new();
        let json = serde_json::json!({ "compilerOptions": { "outDir": "dist" } });
        let result = ConfigResolver::new(&host, &registry)
            .resolve_config_json(&json, "/proj/tsconfig.json", None, None)
            .unwrap();
        assert_eq!(result.options.out_dir.as_deref(), Some("/proj/dist"));
        assert_eq!(result.specs.exclude, Some(vec!["/proj/dist".to_string()]));
        assert_eq!(result.file_names, vec!["/proj/a.ts"]);
    }

    #[test]
    fn test_show_config() {
        let host = MemoryHost::new()
            .with_file(
                "/proj/tsconfig.json",
                r#"{ "compilerOptions": { "strict": true }, "exclude": ["dist"] }"#,
            )
            .with_file("/proj/a.ts", "");
        let result = resolve(&host, "/proj/tsconfig.json");
        assert_eq!(
            result.show_config(),
            serde_json::json!({
                "compilerOptions": { "strict": true },
                "files": ["/proj/a.ts"],
                "exclude": ["dist"]
            })
        );
    }
}
