//! Locating and resolving the project named on the command line

use anyhow::{Result, bail};
use std::path::Path;
use tracing::{debug, info};
use tsconf_core::path::{combine_paths, directory_path, normalize_slashes, normalized_absolute_path};
use tsconf_core::{
    CompilerOptions, ConfigHost, ConfigResolver, Diagnostic, OptionRegistry, RealFileSystem,
    ResolutionResult, parse_command_line,
};

const CONFIG_FILE_NAME: &str = "tsconfig.json";

/// Watched directory and whether its subdirectories are watched too
pub type WatchDirectories<'a> = Vec<(&'a str, bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Files,
    ShowConfig,
    WatchDirs,
}

/// What the compiler would be asked to build
#[derive(Debug)]
pub struct LoadedProject {
    /// `None` when source files were given on the command line instead
    pub config_file: Option<String>,
    pub options: CompilerOptions,
    pub file_names: Vec<String>,
    pub resolution: Option<ResolutionResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedProject {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn watch_directories(&self) -> WatchDirectories<'_> {
        self.resolution
            .as_ref()
            .map(|resolution| {
                resolution
                    .wildcard_directories
                    .iter()
                    .map(|(path, recursive)| (path.as_str(), *recursive))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Effective configuration as a document
    pub fn show_config(&self) -> serde_json::Value {
        match &self.resolution {
            Some(resolution) => resolution.show_config(),
            None => serde_json::json!({
                "compilerOptions": self.options.to_json(),
                "files": self.file_names,
            }),
        }
    }
}

/// Resolve the project for `args`
///
/// The project comes from `--project` (on this tool or among the compiler
/// arguments), else from source files on the command line, else from the
/// nearest `tsconfig.json` in `current_dir` or one of its parents.
pub fn load(current_dir: &Path, project: Option<&Path>, args: &[String]) -> Result<LoadedProject> {
    let host = RealFileSystem::new();
    let registry = OptionRegistry::new();
    let current_dir = normalize_slashes(&current_dir.to_string_lossy()).into_owned();

    let command_line = parse_command_line(&registry, args, &current_dir);
    let project = project
        .map(|path| normalized_absolute_path(&normalize_slashes(&path.to_string_lossy()), &current_dir))
        .or_else(|| command_line.options.project.clone());

    let config_file = match project {
        Some(project) => {
            if !command_line.file_names.is_empty() {
                bail!("Option 'project' cannot be mixed with source files on a command line.");
            }
            let config_file = if Path::new(&project).is_dir() {
                combine_paths(&project, CONFIG_FILE_NAME)
            } else {
                project
            };
            if !host.file_exists(&config_file) {
                bail!("Cannot find a {CONFIG_FILE_NAME} file at the specified path: '{config_file}'.");
            }
            config_file
        }
        None if !command_line.file_names.is_empty() => {
            debug!("Using {} source files from the command line", command_line.file_names.len());
            return Ok(LoadedProject {
                config_file: None,
                options: command_line.options,
                file_names: command_line.file_names,
                resolution: None,
                diagnostics: command_line.diagnostics,
            });
        }
        None => match find_config_file(&host, &current_dir) {
            Some(config_file) => config_file,
            None => bail!("No {CONFIG_FILE_NAME} found in '{current_dir}' or any parent directory."),
        },
    };

    info!("Using project {}", config_file);
    let resolution = ConfigResolver::new(&host, &registry).resolve_config_file(
        &config_file,
        Some(&command_line.options),
        None,
    )?;

    let mut diagnostics = command_line.diagnostics;
    diagnostics.extend(resolution.diagnostics.iter().cloned());
    Ok(LoadedProject {
        config_file: Some(config_file),
        options: resolution.options.clone(),
        file_names: resolution.file_names.clone(),
        resolution: Some(resolution),
        diagnostics,
    })
}

/// Nearest `tsconfig.json` in `start` or one of its ancestors
fn find_config_file<H: ConfigHost>(host: &H, start: &str) -> Option<String> {
    let mut directory = start.to_string();
    loop {
        let candidate = combine_paths(&directory, CONFIG_FILE_NAME);
        if host.file_exists(&candidate) {
            return Some(candidate);
        }
        let parent = directory_path(&directory);
        if parent == directory {
            return None;
        }
        directory = parent;
    }
}
