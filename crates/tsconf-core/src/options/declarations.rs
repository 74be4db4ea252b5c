//! The compiler option table
//!
//! One macro invocation declares every recognized option exactly once: the
//! typed [`CompilerOptions`] field, the descriptor used to convert raw values,
//! and the setter/reader pair shared by the JSON converter, the command-line
//! parser, merging and `showConfig` output.

use super::descriptor::{
    FILE_PATH_ELEMENT, JSX_MAP, LIB_ELEMENT, MODULE_DETECTION_MAP, MODULE_MAP,
    MODULE_RESOLUTION_MAP, NEW_LINE_MAP, OptionDescriptor, STRING_ELEMENT, TARGET_MAP,
};
use super::types::{
    JsxEmit, ModuleDetectionKind, ModuleKind, ModuleResolutionKind, NewLineKind, ScriptTarget,
    Tristate,
};
use super::value::{OptionField, OptionValue};
use crate::path::substitute_config_dir;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A registered option: its descriptor plus typed access to its field
pub struct OptionDeclaration {
    pub descriptor: OptionDescriptor,
    pub set: fn(&mut CompilerOptions, Option<OptionValue>),
    pub get: fn(&CompilerOptions) -> Option<OptionValue>,
}

impl OptionDeclaration {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

impl std::fmt::Debug for OptionDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionDeclaration")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

macro_rules! compiler_options {
    ($($field:ident: $ty:ty = $descriptor:expr;)*) => {
        /// Typed compiler options
        ///
        /// Booleans are [`Tristate`] and everything else is an `Option`, so a
        /// field left unset by one document can be filled in from the
        /// documents it extends.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct CompilerOptions {
            $(pub $field: $ty,)*
            /// Directory of the document that defined `paths`
            pub paths_base_path: Option<String>,
        }

        impl CompilerOptions {
            /// Fill every unset field from `other`; fields already set win
            pub fn merge_with(&mut self, other: &CompilerOptions) {
                let inherit_paths = self.paths.is_none();
                $(
                    if self.$field.is_unset() {
                        self.$field = other.$field.clone();
                    }
                )*
                if inherit_paths {
                    self.paths_base_path = other.paths_base_path.clone();
                }
            }
        }

        pub static OPTION_DECLARATIONS: &[OptionDeclaration] = &[
            $(
                OptionDeclaration {
                    descriptor: $descriptor,
                    set: |options, value| options.$field.set_option_value(value),
                    get: |options| options.$field.to_option_value(),
                },
            )*
        ];
    };
}

compiler_options! {
    // Command line only
    help: Tristate = OptionDescriptor::boolean("help").short("h").command_line_only();
    version: Tristate = OptionDescriptor::boolean("version").short("v").command_line_only();
    watch: Tristate = OptionDescriptor::boolean("watch").short("w").command_line_only();
    init: Tristate = OptionDescriptor::boolean("init").command_line_only();
    project: Option<String> =
        OptionDescriptor::string("project").short("p").file_path().command_line_only();
    show_config: Tristate = OptionDescriptor::boolean("showConfig").command_line_only();
    list_files_only: Tristate = OptionDescriptor::boolean("listFilesOnly").command_line_only();

    // Language and environment
    target: Option<ScriptTarget> = OptionDescriptor::enumeration("target", TARGET_MAP).short("t");
    lib: Option<Vec<String>> = OptionDescriptor::list("lib", &LIB_ELEMENT);
    jsx: Option<JsxEmit> = OptionDescriptor::enumeration("jsx", JSX_MAP);
    jsx_factory: Option<String> = OptionDescriptor::string("jsxFactory");
    jsx_fragment_factory: Option<String> = OptionDescriptor::string("jsxFragmentFactory");
    jsx_import_source: Option<String> = OptionDescriptor::string("jsxImportSource");
    react_namespace: Option<String> = OptionDescriptor::string("reactNamespace");
    no_lib: Tristate = OptionDescriptor::boolean("noLib");
    experimental_decorators: Tristate = OptionDescriptor::boolean("experimentalDecorators");
    emit_decorator_metadata: Tristate = OptionDescriptor::boolean("emitDecoratorMetadata");
    use_define_for_class_fields: Tristate = OptionDescriptor::boolean("useDefineForClassFields");
    module_detection: Option<ModuleDetectionKind> =
        OptionDescriptor::enumeration("moduleDetection", MODULE_DETECTION_MAP);

    // Modules
    module: Option<ModuleKind> = OptionDescriptor::enumeration("module", MODULE_MAP).short("m");
    module_resolution: Option<ModuleResolutionKind> =
        OptionDescriptor::enumeration("moduleResolution", MODULE_RESOLUTION_MAP);
    base_url: Option<String> = OptionDescriptor::string("baseUrl").file_path();
    paths: Option<IndexMap<String, Vec<String>>> = OptionDescriptor::object("paths");
    root_dirs: Option<Vec<String>> = OptionDescriptor::list("rootDirs", &FILE_PATH_ELEMENT);
    type_roots: Option<Vec<String>> = OptionDescriptor::list("typeRoots", &FILE_PATH_ELEMENT);
    types: Option<Vec<String>> = OptionDescriptor::list("types", &STRING_ELEMENT);
    module_suffixes: Option<Vec<String>> =
        OptionDescriptor::list("moduleSuffixes", &STRING_ELEMENT).preserve_falsy();
    custom_conditions: Option<Vec<String>> =
        OptionDescriptor::list("customConditions", &STRING_ELEMENT);
    allow_arbitrary_extensions: Tristate = OptionDescriptor::boolean("allowArbitraryExtensions");
    allow_importing_ts_extensions: Tristate =
        OptionDescriptor::boolean("allowImportingTsExtensions");
    allow_umd_global_access: Tristate = OptionDescriptor::boolean("allowUmdGlobalAccess");
    resolve_json_module: Tristate = OptionDescriptor::boolean("resolveJsonModule");
    resolve_package_json_exports: Tristate =
        OptionDescriptor::boolean("resolvePackageJsonExports");
    resolve_package_json_imports: Tristate =
        OptionDescriptor::boolean("resolvePackageJsonImports");
    no_resolve: Tristate = OptionDescriptor::boolean("noResolve");

    // JavaScript support
    allow_js: Tristate = OptionDescriptor::boolean("allowJs");
    check_js: Tristate = OptionDescriptor::boolean("checkJs");
    max_node_module_js_depth: Option<f64> = OptionDescriptor::number("maxNodeModuleJsDepth");

    // Emit
    declaration: Tristate = OptionDescriptor::boolean("declaration").short("d");
    declaration_map: Tristate = OptionDescriptor::boolean("declarationMap");
    emit_declaration_only: Tristate = OptionDescriptor::boolean("emitDeclarationOnly");
    source_map: Tristate = OptionDescriptor::boolean("sourceMap");
    inline_source_map: Tristate = OptionDescriptor::boolean("inlineSourceMap");
    inline_sources: Tristate = OptionDescriptor::boolean("inlineSources");
    out_file: Option<String> = OptionDescriptor::string("outFile").file_path();
    out_dir: Option<String> = OptionDescriptor::string("outDir").file_path();
    root_dir: Option<String> = OptionDescriptor::string("rootDir").file_path();
    declaration_dir: Option<String> = OptionDescriptor::string("declarationDir").file_path();
    ts_build_info_file: Option<String> = OptionDescriptor::string("tsBuildInfoFile").file_path();
    source_root: Option<String> = OptionDescriptor::string("sourceRoot");
    map_root: Option<String> = OptionDescriptor::string("mapRoot");
    remove_comments: Tristate = OptionDescriptor::boolean("removeComments");
    no_emit: Tristate = OptionDescriptor::boolean("noEmit");
    no_emit_on_error: Tristate = OptionDescriptor::boolean("noEmitOnError");
    import_helpers: Tristate = OptionDescriptor::boolean("importHelpers");
    downlevel_iteration: Tristate = OptionDescriptor::boolean("downlevelIteration");
    new_line: Option<NewLineKind> = OptionDescriptor::enumeration("newLine", NEW_LINE_MAP);
    preserve_const_enums: Tristate = OptionDescriptor::boolean("preserveConstEnums");

    // Interop constraints
    isolated_modules: Tristate = OptionDescriptor::boolean("isolatedModules");
    verbatim_module_syntax: Tristate = OptionDescriptor::boolean("verbatimModuleSyntax");
    allow_synthetic_default_imports: Tristate =
        OptionDescriptor::boolean("allowSyntheticDefaultImports");
    es_module_interop: Tristate = OptionDescriptor::boolean("esModuleInterop");
    preserve_symlinks: Tristate = OptionDescriptor::boolean("preserveSymlinks");
    force_consistent_casing_in_file_names: Tristate =
        OptionDescriptor::boolean("forceConsistentCasingInFileNames");

    // Type checking
    strict: Tristate = OptionDescriptor::boolean("strict");
    no_implicit_any: Tristate = OptionDescriptor::boolean("noImplicitAny");
    strict_null_checks: Tristate = OptionDescriptor::boolean("strictNullChecks");
    strict_function_types: Tristate = OptionDescriptor::boolean("strictFunctionTypes");
    strict_bind_call_apply: Tristate = OptionDescriptor::boolean("strictBindCallApply");
    strict_property_initialization: Tristate =
        OptionDescriptor::boolean("strictPropertyInitialization");
    no_implicit_this: Tristate = OptionDescriptor::boolean("noImplicitThis");
    always_strict: Tristate = OptionDescriptor::boolean("alwaysStrict");
    no_unused_locals: Tristate = OptionDescriptor::boolean("noUnusedLocals");
    no_unused_parameters: Tristate = OptionDescriptor::boolean("noUnusedParameters");
    exact_optional_property_types: Tristate =
        OptionDescriptor::boolean("exactOptionalPropertyTypes");
    no_implicit_returns: Tristate = OptionDescriptor::boolean("noImplicitReturns");
    no_fallthrough_cases_in_switch: Tristate =
        OptionDescriptor::boolean("noFallthroughCasesInSwitch");
    no_unchecked_indexed_access: Tristate = OptionDescriptor::boolean("noUncheckedIndexedAccess");
    no_implicit_override: Tristate = OptionDescriptor::boolean("noImplicitOverride");
    allow_unused_labels: Tristate = OptionDescriptor::boolean("allowUnusedLabels");
    allow_unreachable_code: Tristate = OptionDescriptor::boolean("allowUnreachableCode");

    // Projects and completeness
    composite: Tristate = OptionDescriptor::boolean("composite");
    incremental: Tristate = OptionDescriptor::boolean("incremental").short("i");
    skip_lib_check: Tristate = OptionDescriptor::boolean("skipLibCheck");
    skip_default_lib_check: Tristate = OptionDescriptor::boolean("skipDefaultLibCheck");

    // Output formatting and diagnostics
    pretty: Tristate = OptionDescriptor::boolean("pretty");
    list_files: Tristate = OptionDescriptor::boolean("listFiles");
    list_emitted_files: Tristate = OptionDescriptor::boolean("listEmittedFiles");
    explain_files: Tristate = OptionDescriptor::boolean("explainFiles");
    trace_resolution: Tristate = OptionDescriptor::boolean("traceResolution");
    extended_diagnostics: Tristate = OptionDescriptor::boolean("extendedDiagnostics");
    locale: Option<String> = OptionDescriptor::string("locale");
}

impl CompilerOptions {
    /// Replace leading `${configDir}` tokens in path-valued options
    ///
    /// Applies to file-path options, lists of file paths and the substitution
    /// lists of `paths`.
    pub fn substitute_config_dir(&mut self, config_dir: &str) {
        for declaration in OPTION_DECLARATIONS {
            let descriptor = &declaration.descriptor;
            let is_paths = descriptor.name == "paths";
            if !descriptor.holds_file_paths() && !is_paths {
                continue;
            }
            let Some(value) = (declaration.get)(self) else {
                continue;
            };
            if let Some(substituted) = substitute_value(&value, config_dir) {
                (declaration.set)(self, Some(substituted));
            }
        }
    }

    /// Only the options that are set, keyed by JSON name, for `showConfig`
    pub fn to_json(&self) -> Map<String, Value> {
        OPTION_DECLARATIONS
            .iter()
            .filter(|declaration| !declaration.descriptor.is_command_line_only)
            .filter_map(|declaration| {
                let value = (declaration.get)(self)?;
                Some((
                    declaration.name().to_string(),
                    value.to_json(&declaration.descriptor),
                ))
            })
            .collect()
    }
}

/// Returns the substituted value, or `None` when nothing changed
fn substitute_value(value: &OptionValue, config_dir: &str) -> Option<OptionValue> {
    match value {
        OptionValue::String(path) => substitute_config_dir(path, config_dir).map(OptionValue::String),
        OptionValue::List(items) => {
            let mut changed = false;
            let items = items
                .iter()
                .map(|item| match substitute_value(item, config_dir) {
                    Some(substituted) => {
                        changed = true;
                        substituted
                    }
                    None => item.clone(),
                })
                .collect();
            changed.then_some(OptionValue::List(items))
        }
        OptionValue::Object(map) => {
            let mut changed = false;
            let map = map
                .iter()
                .map(|(key, entry)| {
                    let entry = match entry {
                        Value::Array(items) => Value::Array(
                            items
                                .iter()
                                .map(|item| match item.as_str().and_then(|s| substitute_config_dir(s, config_dir)) {
                                    Some(substituted) => {
                                        changed = true;
                                        Value::String(substituted)
                                    }
                                    None => item.clone(),
                                })
                                .collect(),
                        ),
                        other => other.clone(),
                    };
                    (key.clone(), entry)
                })
                .collect();
            changed.then_some(OptionValue::Object(map))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_option_names_are_unique() {
        let mut seen = HashSet::new();
        for declaration in OPTION_DECLARATIONS {
            assert!(seen.insert(declaration.name()), "duplicate {}", declaration.name());
        }
    }

    #[test]
    fn test_list_declarations_carry_an_element() {
        for declaration in OPTION_DECLARATIONS {
            let descriptor = &declaration.descriptor;
            if matches!(
                descriptor.kind,
                crate::options::OptionKind::List | crate::options::OptionKind::ListOrElement
            ) {
                assert!(descriptor.element.is_some(), "{} has no element", descriptor.name);
            }
        }
    }

    #[test]
    fn test_merge_keeps_child_values() {
        let mut child = CompilerOptions {
            target: Some(ScriptTarget::Es2020),
            strict: Tristate::False,
            ..Default::default()
        };
        let parent = CompilerOptions {
            target: Some(ScriptTarget::Es2017),
            strict: Tristate::True,
            allow_js: Tristate::True,
            out_dir: Some("/base/dist".into()),
            ..Default::default()
        };

        child.merge_with(&parent);
        assert_eq!(child.target, Some(ScriptTarget::Es2020));
        assert_eq!(child.strict, Tristate::False);
        assert_eq!(child.allow_js, Tristate::True);
        assert_eq!(child.out_dir.as_deref(), Some("/base/dist"));
    }

    #[test]
    fn test_merge_carries_paths_base_path_with_paths() {
        let mut paths = IndexMap::new();
        paths.insert("@/*".to_string(), vec!["src/*".to_string()]);
        let parent = CompilerOptions {
            paths: Some(paths),
            paths_base_path: Some("/base".into()),
            ..Default::default()
        };

        let mut child = CompilerOptions::default();
        child.merge_with(&parent);
        assert_eq!(child.paths_base_path.as_deref(), Some("/base"));

        let mut own = CompilerOptions {
            paths: Some(IndexMap::new()),
            paths_base_path: Some("/proj".into()),
            ..Default::default()
        };
        own.merge_with(&parent);
        assert_eq!(own.paths_base_path.as_deref(), Some("/proj"));
    }

    #[test]
    fn test_substitute_config_dir() {
        let mut paths = IndexMap::new();
        paths.insert("@/*".to_string(), vec!["${configDir}/src/*".to_string()]);
        let mut options = CompilerOptions {
            out_dir: Some("${configDir}/dist".into()),
            root_dirs: Some(vec!["${configDir}/a".into(), "/abs/b".into()]),
            paths: Some(paths),
            types: Some(vec!["${configDir}/not-a-path".into()]),
            ..Default::default()
        };

        options.substitute_config_dir("/proj");
        assert_eq!(options.out_dir.as_deref(), Some("/proj/dist"));
        assert_eq!(
            options.root_dirs,
            Some(vec!["/proj/a".to_string(), "/abs/b".to_string()])
        );
        assert_eq!(options.paths.as_ref().unwrap()["@/*"], vec!["/proj/src/*".to_string()]);
        assert_eq!(options.types, Some(vec!["${configDir}/not-a-path".to_string()]));
    }

    #[test]
    fn test_to_json_skips_unset_and_command_line_only() {
        let options = CompilerOptions {
            strict: Tristate::True,
            module: Some(ModuleKind::CommonJs),
            show_config: Tristate::True,
            ..Default::default()
        };
        let json = options.to_json();
        assert_eq!(json.len(), 2);
        assert_eq!(json["strict"], Value::Bool(true));
        assert_eq!(json["module"], Value::String("commonjs".into()));
    }
}
