//! tsconf CLI
//!
//! Resolves a project configuration and reports what a compiler would see:
//! the input files, the effective configuration and the directories to watch.

mod output;
mod project;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use output::OutputFormatter;
use std::path::PathBuf;
use tsconf_core::init_tracing_with_default;

#[derive(Parser)]
#[command(name = "tsconf")]
#[command(about = "Inspect tsconfig-style project configuration")]
#[command(version = tsconf_core::VERSION)]
#[command(
    long_about = "tsconf resolves a project configuration file the way a compiler front end does:\n\
it follows `extends`, merges compiler options and expands include/exclude globs.\n\
\n\
Examples:\n  \
tsconf files                         # Input files of ./tsconfig.json\n  \
tsconf -p packages/app show-config   # Effective configuration of a package\n  \
tsconf files --allowJs               # Override compiler options\n  \
tsconf --format json watch-dirs      # Directories to watch, as JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project configuration file, or a directory containing tsconfig.json
    #[arg(short, long, global = true, env = "TSCONF_PROJECT")]
    project: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "human")]
    format: OutputFormat,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the input files of the project
    Files(CompilerArgs),

    /// Print the effective configuration
    #[command(alias = "showConfig")]
    ShowConfig(CompilerArgs),

    /// List the directories a watcher must observe
    WatchDirs(CompilerArgs),
}

/// Compiler options and file names, as accepted by the compiler itself
#[derive(Args, Debug, Clone, Default)]
struct CompilerArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMPILER_ARGS")]
    args: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON format for programmatic consumption
    Json,
}

fn main() {
    let cli = Cli::parse();

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    let log_level = match cli.verbose {
        0 => "tsconf=error",
        1 => "tsconf=warn",
        2 => "tsconf=info",
        3 => "tsconf=debug",
        _ => "tsconf=trace",
    };
    init_tracing_with_default(log_level);

    match run_command(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

/// Returns whether the project resolved without errors
fn run_command(cli: Cli) -> Result<bool> {
    let formatter = OutputFormatter::new(cli.format, !cli.no_color);
    let current_dir = std::env::current_dir()?;

    let (args, command) = match &cli.command {
        Commands::Files(args) => (args, project::Command::Files),
        Commands::ShowConfig(args) => (args, project::Command::ShowConfig),
        Commands::WatchDirs(args) => (args, project::Command::WatchDirs),
    };

    let project = project::load(&current_dir, cli.project.as_deref(), &args.args)?;
    formatter.print(command, &project)?;
    Ok(!project.has_errors())
}
