//! tsconf core
//!
//! Project configuration resolution for tsconfig-style compiler front ends:
//! the compiler option table, JSON value conversion, `extends` chains with
//! cycle detection, include/exclude glob compilation, the project file walk
//! and the set of directories to watch.

pub mod command_line;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extensions;
pub mod file_names;
pub mod host;
pub mod matcher;
pub mod options;
pub mod path;
pub mod result;
pub mod walker;
pub mod wildcard;

pub use command_line::{ParsedCommandLine, parse_command_line};
pub use config::{
    ConfigResolver, ConfigState, ExtendedConfigCache, FileSpecSet, ParsedConfigNode,
    ProjectReference, RawConfig, ResolutionResult,
};
pub use diagnostics::{Diagnostic, DiagnosticCategory, Severity};
pub use error::{ErrorKind, TsconfError};
pub use extensions::{ExtraExtensionKind, ExtraFileExtension};
pub use file_names::get_file_names_from_config_specs;
pub use host::{ConfigHost, DirEntry, MemoryHost, RealFileSystem};
pub use matcher::{CompiledPattern, Usage};
pub use options::{CompilerOptions, OptionRegistry, OptionValue};
pub use result::Result;
pub use walker::{WalkOptions, match_files};
pub use wildcard::get_wildcard_directories;

/// Initialize tracing for the library
pub fn init_tracing() {
    init_tracing_with_default("tsconf=info");
}

/// Initialize tracing with `default_filter` unless `RUST_LOG` is set
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn init_tracing_with_default(default_filter: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
