//! Configuration documents and their resolution through `extends`

pub mod cache;
pub mod document;
pub mod resolver;
pub mod specs;

pub use cache::{CachedConfig, ExtendedConfigCache};
pub use document::{RawConfig, parse_document, read_document};
pub use resolver::{ConfigResolver, ConfigState, ParsedConfigNode, ProjectReference, ResolutionResult};
pub use specs::{
    DEFAULT_INCLUDE_SPEC, FileSpecSet, SpecSources, get_config_file_specs, validate_specs,
};
