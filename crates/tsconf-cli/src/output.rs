//! Output formatting
//!
//! Results go to stdout; in human format diagnostics go to stderr so the
//! listing can be piped.

use crate::OutputFormat;
use crate::project::{Command, LoadedProject};
use anyhow::Result;
use colored::*;
use serde::Serialize;
use tsconf_core::{Diagnostic, Severity};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a, T: Serialize> {
    config_file: Option<&'a str>,
    #[serde(flatten)]
    payload: T,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilesPayload<'a> {
    file_names: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchPayload {
    wildcard_directories: serde_json::Map<String, serde_json::Value>,
}

/// Output formatter for different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_colors: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_colors: bool) -> Self {
        Self { format, use_colors }
    }

    pub fn print(&self, command: Command, project: &LoadedProject) -> Result<()> {
        match (command, self.format) {
            (Command::ShowConfig, _) => {
                self.print_diagnostics(&project.diagnostics);
                println!("{}", serde_json::to_string_pretty(&project.show_config())?);
            }
            (Command::Files, OutputFormat::Human) => {
                self.print_diagnostics(&project.diagnostics);
                for file in &project.file_names {
                    println!("{file}");
                }
            }
            (Command::WatchDirs, OutputFormat::Human) => {
                self.print_diagnostics(&project.diagnostics);
                for (path, recursive) in project.watch_directories() {
                    if recursive {
                        println!("{path} {}", self.paint("(recursive)", |s| s.dimmed()));
                    } else {
                        println!("{path}");
                    }
                }
            }
            (Command::Files, OutputFormat::Json) => {
                self.print_json(project, FilesPayload {
                    file_names: &project.file_names,
                })?;
            }
            (Command::WatchDirs, OutputFormat::Json) => {
                let wildcard_directories = project
                    .watch_directories()
                    .into_iter()
                    .map(|(path, recursive)| (path.to_string(), serde_json::Value::Bool(recursive)))
                    .collect();
                self.print_json(project, WatchPayload {
                    wildcard_directories,
                })?;
            }
        }
        Ok(())
    }

    fn print_json<T: Serialize>(&self, project: &LoadedProject, payload: T) -> Result<()> {
        let report = JsonReport {
            config_file: project.config_file.as_deref(),
            payload,
            diagnostics: &project.diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

    fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
        for diagnostic in diagnostics {
            eprintln!("{}", self.format_diagnostic(diagnostic));
        }
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        if errors > 0 {
            let summary = format!(
                "Found {errors} error{}.",
                if errors == 1 { "" } else { "s" }
            );
            eprintln!("\n{}", self.paint(&summary, |s| s.red().bold()));
        }
    }

    fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let severity = diagnostic.severity.to_string();
        let severity = match diagnostic.severity {
            Severity::Error => self.paint(&severity, |s| s.red().bold()),
            Severity::Warning => self.paint(&severity, |s| s.yellow().bold()),
            Severity::Info => self.paint(&severity, |s| s.blue()),
        };
        let code = self.paint(&format!("TS{}", diagnostic.code), |s| s.dimmed());
        match &diagnostic.file {
            Some(file) => format!(
                "{}: {severity} {code}: {}",
                self.paint(file, |s| s.cyan()),
                diagnostic.message
            ),
            None => format!("{severity} {code}: {}", diagnostic.message),
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
