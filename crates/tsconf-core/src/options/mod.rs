//! Compiler option model: descriptors, the option table and JSON conversion

pub mod convert;
pub mod declarations;
pub mod descriptor;
pub mod registry;
pub mod types;
pub mod value;

pub use convert::{ConversionSource, convert_compiler_options, convert_value};
pub use declarations::{CompilerOptions, OPTION_DECLARATIONS, OptionDeclaration};
pub use descriptor::{OptionDescriptor, OptionKind};
pub use registry::OptionRegistry;
pub use types::{
    EnumValue, JsxEmit, ModuleDetectionKind, ModuleKind, ModuleResolutionKind, NewLineKind,
    ScriptTarget, Tristate,
};
pub use value::{OptionField, OptionValue};
