//! Compiler options given as command-line arguments
//!
//! Uses the same descriptor table as configuration documents, so every option
//! accepted in `compilerOptions` is also accepted as `--name value`.

use crate::diagnostics::Diagnostic;
use crate::options::{
    CompilerOptions, ConversionSource, OptionDeclaration, OptionKind, OptionRegistry,
    convert_value,
};
use crate::path::normalized_absolute_path;
use serde_json::Value;
use tracing::debug;

/// Options and file names collected from an argument list
#[derive(Debug, Clone, Default)]
pub struct ParsedCommandLine {
    pub options: CompilerOptions,
    pub file_names: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `args` (without the program name)
///
/// Option names are matched case-insensitively, either as `--name` or through
/// a short alias such as `-p`. Any argument that is not an option is a file
/// name, resolved against `current_dir`.
pub fn parse_command_line<S: AsRef<str>>(
    registry: &OptionRegistry,
    args: &[S],
    current_dir: &str,
) -> ParsedCommandLine {
    let mut parsed = ParsedCommandLine::default();
    let mut index = 0;

    while index < args.len() {
        let arg = args[index].as_ref();
        index += 1;

        let Some(name) = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) else {
            parsed
                .file_names
                .push(normalized_absolute_path(arg, current_dir));
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let Some(declaration) = registry.get_ignore_case(name) else {
            parsed
                .diagnostics
                .push(Diagnostic::unknown_option(arg, registry.suggest(name)));
            continue;
        };

        let next = args.get(index).map(AsRef::as_ref);
        let (raw, consumed) = match raw_argument(declaration, next, &mut parsed.diagnostics) {
            Some(argument) => argument,
            None => continue,
        };
        index += consumed;

        if let Some(value) = convert_value(
            &declaration.descriptor,
            &raw,
            current_dir,
            ConversionSource::CommandLine,
            &mut parsed.diagnostics,
        ) {
            debug!("Command-line option {} = {:?}", declaration.name(), value);
            (declaration.set)(&mut parsed.options, Some(value));
        }
    }

    parsed
}

/// JSON form of the option's argument and the number of arguments it used
fn raw_argument(
    declaration: &OptionDeclaration,
    next: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<(Value, usize)> {
    let descriptor = &declaration.descriptor;
    match descriptor.kind {
        OptionKind::Boolean => match next {
            Some("true") => Some((Value::Bool(true), 1)),
            Some("false") => Some((Value::Bool(false), 1)),
            _ => Some((Value::Bool(true), 0)),
        },
        OptionKind::Object => {
            diagnostics.push(Diagnostic::config_file_only(descriptor.name));
            None
        }
        _ => {
            let Some(argument) = next else {
                diagnostics.push(Diagnostic::option_expects_argument(descriptor.name));
                return None;
            };
            let value = match descriptor.kind {
                OptionKind::List | OptionKind::ListOrElement => Value::Array(
                    argument
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(|item| Value::String(item.to_string()))
                        .collect(),
                ),
                OptionKind::Number => match argument.parse::<f64>() {
                    Ok(number) => serde_json::Number::from_f64(number)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    Err(_) => Value::String(argument.to_string()),
                },
                _ => Value::String(argument.to_string()),
            };
            Some((value, 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ModuleKind, ScriptTarget, Tristate};

    fn parse(args: &[&str]) -> ParsedCommandLine {
        parse_command_line(&OptionRegistry::new(), args, "/work")
    }

    #[test]
    fn test_options_and_file_names() {
        let parsed = parse(&["--target", "ES2020", "--strict", "src/a.ts", "-m", "commonjs"]);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.options.target, Some(ScriptTarget::Es2020));
        assert_eq!(parsed.options.module, Some(ModuleKind::CommonJs));
        assert_eq!(parsed.options.strict, Tristate::True);
        assert_eq!(parsed.file_names, vec!["/work/src/a.ts"]);
    }

    #[test]
    fn test_boolean_takes_optional_value() {
        let parsed = parse(&["--allowJs", "false", "--checkJs", "a.js"]);
        assert_eq!(parsed.options.allow_js, Tristate::False);
        assert_eq!(parsed.options.check_js, Tristate::True);
        assert_eq!(parsed.file_names, vec!["/work/a.js"]);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        let parsed = parse(&["--ALLOWJS", "--outdir", "build"]);
        assert_eq!(parsed.options.allow_js, Tristate::True);
        assert_eq!(parsed.options.out_dir.as_deref(), Some("/work/build"));
    }

    #[test]
    fn test_lists_split_on_commas() {
        let parsed = parse(&["--lib", "es2015,dom", "--types", "node, jest"]);
        assert_eq!(
            parsed.options.lib,
            Some(vec!["lib.es2015.d.ts".to_string(), "lib.dom.d.ts".to_string()])
        );
        assert_eq!(
            parsed.options.types,
            Some(vec!["node".to_string(), "jest".to_string()])
        );
    }

    #[test]
    fn test_command_line_only_options_are_accepted() {
        let parsed = parse(&["--listFilesOnly", "-p", "packages/app"]);
        assert!(parsed.diagnostics.is_empty());
        assert_eq!(parsed.options.list_files_only, Tristate::True);
        assert_eq!(parsed.options.project.as_deref(), Some("/work/packages/app"));
    }

    #[test]
    fn test_problems_are_diagnosed() {
        let parsed = parse(&["--paths", "--alowJs", "--target", "es1999", "--outDir"]);
        let codes: Vec<u32> = parsed.diagnostics.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![6230, 5025, 6046, 6044]);
        assert!(parsed.diagnostics[1].message.contains("'allowJs'"));
        assert_eq!(parsed.options, CompilerOptions::default());
    }

    #[test]
    fn test_number_option() {
        let parsed = parse(&["--maxNodeModuleJsDepth", "2"]);
        assert_eq!(parsed.options.max_node_module_js_depth, Some(2.0));

        let parsed = parse(&["--maxNodeModuleJsDepth", "deep"]);
        assert_eq!(parsed.diagnostics[0].code, 5024);
    }
}
