//! Supported source extensions
//!
//! Extensions come in priority groups. Within a group an earlier extension
//! shadows a later one for the same file stem, so `a.ts` wins over `a.js`.

use crate::options::{CompilerOptions, ModuleResolutionKind};

pub const TS: &str = ".ts";
pub const TSX: &str = ".tsx";
pub const DTS: &str = ".d.ts";
pub const JS: &str = ".js";
pub const JSX: &str = ".jsx";
pub const JSON: &str = ".json";

const SUPPORTED_TS_EXTENSIONS: &[&[&str]] = &[
    &[TS, TSX, DTS],
    &[".cts", ".d.cts"],
    &[".mts", ".d.mts"],
];

const ALL_SUPPORTED_EXTENSIONS: &[&[&str]] = &[
    &[TS, TSX, DTS, JS, JSX],
    &[".cts", ".d.cts", ".cjs"],
    &[".mts", ".d.mts", ".mjs"],
];

/// How the host treats files with an extra extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraExtensionKind {
    /// Handled by a host plugin; always included
    Deferred,
    /// Script treated like JavaScript; included only with `allowJs`
    JavaScript,
    Other,
}

/// Host-supplied extension beyond the built-in ones, e.g. `.vue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraFileExtension {
    pub extension: String,
    pub kind: ExtraExtensionKind,
}

impl ExtraFileExtension {
    pub fn new(extension: impl Into<String>, kind: ExtraExtensionKind) -> Self {
        Self {
            extension: extension.into(),
            kind,
        }
    }
}

/// `checkJs` implies `allowJs` unless `allowJs` is set explicitly
pub fn allows_js(options: &CompilerOptions) -> bool {
    options
        .allow_js
        .as_bool()
        .or(options.check_js.as_bool())
        .unwrap_or(false)
}

/// JSON modules are on when requested, or by default under bundler resolution
pub fn resolves_json_modules(options: &CompilerOptions) -> bool {
    options
        .resolve_json_module
        .as_bool()
        .unwrap_or(options.module_resolution == Some(ModuleResolutionKind::Bundler))
}

fn to_groups(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|ext| ext.to_string()).collect())
        .collect()
}

/// Priority groups of source extensions for these options
pub fn supported_extensions(
    options: &CompilerOptions,
    extra_extensions: &[ExtraFileExtension],
) -> Vec<Vec<String>> {
    let need_js = allows_js(options);
    let builtins = if need_js {
        ALL_SUPPORTED_EXTENSIONS
    } else {
        SUPPORTED_TS_EXTENSIONS
    };

    let mut groups = to_groups(builtins);
    for extra in extra_extensions {
        let is_builtin = builtins
            .iter()
            .any(|group| group.contains(&extra.extension.as_str()));
        let include = extra.kind == ExtraExtensionKind::Deferred
            || (need_js && extra.kind == ExtraExtensionKind::JavaScript && !is_builtin);
        if include {
            groups.push(vec![extra.extension.clone()]);
        }
    }
    groups
}

/// Source extension groups plus a `.json` group when JSON modules are resolved
pub fn supported_extensions_with_json(
    options: &CompilerOptions,
    supported: &[Vec<String>],
) -> Vec<Vec<String>> {
    let mut groups = supported.to_vec();
    if resolves_json_modules(options) {
        groups.push(vec![JSON.to_string()]);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Tristate;

    #[test]
    fn test_ts_only_groups() {
        let groups = supported_extensions(&CompilerOptions::default(), &[]);
        assert_eq!(groups[0], vec![".ts", ".tsx", ".d.ts"]);
        assert_eq!(groups.len(), 3);
        assert!(!groups.iter().flatten().any(|ext| ext == ".js"));
    }

    #[test]
    fn test_allow_js_groups() {
        let options = CompilerOptions {
            allow_js: Tristate::True,
            ..Default::default()
        };
        let groups = supported_extensions(&options, &[]);
        assert_eq!(groups[0], vec![".ts", ".tsx", ".d.ts", ".js", ".jsx"]);
        assert_eq!(groups[2], vec![".mts", ".d.mts", ".mjs"]);
    }

    #[test]
    fn test_check_js_implies_allow_js() {
        let options = CompilerOptions {
            check_js: Tristate::True,
            ..Default::default()
        };
        assert!(allows_js(&options));

        let options = CompilerOptions {
            check_js: Tristate::True,
            allow_js: Tristate::False,
            ..Default::default()
        };
        assert!(!allows_js(&options));
    }

    #[test]
    fn test_extra_extensions() {
        let extras = vec![
            ExtraFileExtension::new(".vue", ExtraExtensionKind::Deferred),
            ExtraFileExtension::new(".es", ExtraExtensionKind::JavaScript),
            ExtraFileExtension::new(".js", ExtraExtensionKind::JavaScript),
            ExtraFileExtension::new(".txt", ExtraExtensionKind::Other),
        ];

        let groups = supported_extensions(&CompilerOptions::default(), &extras);
        assert_eq!(groups.last(), Some(&vec![".vue".to_string()]));
        assert_eq!(groups.len(), 4);

        let options = CompilerOptions {
            allow_js: Tristate::True,
            ..Default::default()
        };
        let groups = supported_extensions(&options, &extras);
        assert_eq!(groups.len(), 5);
        assert_eq!(groups[4], vec![".es"]);
    }

    #[test]
    fn test_json_group() {
        let options = CompilerOptions {
            resolve_json_module: Tristate::True,
            ..Default::default()
        };
        let supported = supported_extensions(&options, &[]);
        let with_json = supported_extensions_with_json(&options, &supported);
        assert_eq!(with_json.last(), Some(&vec![".json".to_string()]));

        let bundler = CompilerOptions {
            module_resolution: Some(ModuleResolutionKind::Bundler),
            ..Default::default()
        };
        assert!(resolves_json_modules(&bundler));
    }
}
