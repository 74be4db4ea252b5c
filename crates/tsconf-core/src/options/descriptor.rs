//! Option descriptors
//!
//! A descriptor states how one raw value is interpreted: its kind, the element
//! descriptor for lists, the accepted keys for enums, and a few flags. The
//! constructors are `const` so the whole option table can live in statics.

use super::types::{
    EnumValue, JsxEmit, ModuleDetectionKind, ModuleKind, ModuleResolutionKind, NewLineKind,
    ScriptTarget,
};

/// Shape of the value an option accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    String,
    Number,
    Boolean,
    List,
    ListOrElement,
    Enum,
    Object,
}

/// Lower-cased key to enum value
pub type EnumMap = &'static [(&'static str, EnumValue)];

#[derive(Debug, Clone, Copy)]
pub struct OptionDescriptor {
    pub name: &'static str,
    /// Single-dash alias accepted on the command line
    pub short_name: Option<&'static str>,
    pub kind: OptionKind,
    /// Present for `List` and `ListOrElement`, absent otherwise
    pub element: Option<&'static OptionDescriptor>,
    /// Present for `Enum`, absent otherwise
    pub enum_map: Option<EnumMap>,
    pub is_file_path: bool,
    pub disallow_null_or_undefined: bool,
    pub is_command_line_only: bool,
    pub list_preserve_falsy_values: bool,
}

impl OptionDescriptor {
    const fn with_kind(name: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            short_name: None,
            kind,
            element: None,
            enum_map: None,
            is_file_path: false,
            disallow_null_or_undefined: false,
            is_command_line_only: false,
            list_preserve_falsy_values: false,
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::with_kind(name, OptionKind::String)
    }

    pub const fn number(name: &'static str) -> Self {
        Self::with_kind(name, OptionKind::Number)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::with_kind(name, OptionKind::Boolean)
    }

    pub const fn object(name: &'static str) -> Self {
        Self::with_kind(name, OptionKind::Object)
    }

    pub const fn enumeration(name: &'static str, map: EnumMap) -> Self {
        Self {
            enum_map: Some(map),
            ..Self::with_kind(name, OptionKind::Enum)
        }
    }

    pub const fn list(name: &'static str, element: &'static OptionDescriptor) -> Self {
        Self {
            element: Some(element),
            ..Self::with_kind(name, OptionKind::List)
        }
    }

    pub const fn list_or_element(name: &'static str, element: &'static OptionDescriptor) -> Self {
        Self {
            element: Some(element),
            ..Self::with_kind(name, OptionKind::ListOrElement)
        }
    }

    pub const fn short(self, short_name: &'static str) -> Self {
        Self {
            short_name: Some(short_name),
            ..self
        }
    }

    pub const fn file_path(self) -> Self {
        Self {
            is_file_path: true,
            ..self
        }
    }

    pub const fn disallow_null(self) -> Self {
        Self {
            disallow_null_or_undefined: true,
            ..self
        }
    }

    pub const fn command_line_only(self) -> Self {
        Self {
            is_command_line_only: true,
            ..self
        }
    }

    pub const fn preserve_falsy(self) -> Self {
        Self {
            list_preserve_falsy_values: true,
            ..self
        }
    }

    /// Whether this option, or the elements of this list option, are file paths
    pub fn holds_file_paths(&self) -> bool {
        self.is_file_path || self.element.is_some_and(|element| element.is_file_path)
    }

    /// Type name used in "requires a value of type" diagnostics
    pub fn type_name(&self) -> String {
        match self.kind {
            OptionKind::String | OptionKind::Enum => "string".to_string(),
            OptionKind::Number => "number".to_string(),
            OptionKind::Boolean => "boolean".to_string(),
            OptionKind::Object => "object".to_string(),
            OptionKind::List => "Array".to_string(),
            OptionKind::ListOrElement => {
                let element = self
                    .element
                    .map(|element| element.type_name())
                    .unwrap_or_else(|| "string".to_string());
                format!("{element} or Array")
            }
        }
    }

    /// Accepted enum keys, quoted and comma separated
    pub fn enum_keys(&self) -> String {
        self.enum_map
            .unwrap_or(&[])
            .iter()
            .map(|(key, _)| format!("'{key}'"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn lookup_enum(&self, key: &str) -> Option<EnumValue> {
        let key = key.to_lowercase();
        self.enum_map?
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }

    /// Reverse lookup used when writing options back out as JSON
    pub fn enum_key_of(&self, value: EnumValue) -> Option<&'static str> {
        self.enum_map?
            .iter()
            .find(|(_, candidate)| *candidate == value)
            .map(|(key, _)| *key)
    }
}

pub static TARGET_MAP: &[(&str, EnumValue)] = &[
    ("es3", EnumValue::Target(ScriptTarget::Es3)),
    ("es5", EnumValue::Target(ScriptTarget::Es5)),
    ("es6", EnumValue::Target(ScriptTarget::Es2015)),
    ("es2015", EnumValue::Target(ScriptTarget::Es2015)),
    ("es2016", EnumValue::Target(ScriptTarget::Es2016)),
    ("es2017", EnumValue::Target(ScriptTarget::Es2017)),
    ("es2018", EnumValue::Target(ScriptTarget::Es2018)),
    ("es2019", EnumValue::Target(ScriptTarget::Es2019)),
    ("es2020", EnumValue::Target(ScriptTarget::Es2020)),
    ("es2021", EnumValue::Target(ScriptTarget::Es2021)),
    ("es2022", EnumValue::Target(ScriptTarget::Es2022)),
    ("es2023", EnumValue::Target(ScriptTarget::Es2023)),
    ("esnext", EnumValue::Target(ScriptTarget::EsNext)),
];

pub static MODULE_MAP: &[(&str, EnumValue)] = &[
    ("none", EnumValue::Module(ModuleKind::None)),
    ("commonjs", EnumValue::Module(ModuleKind::CommonJs)),
    ("amd", EnumValue::Module(ModuleKind::Amd)),
    ("system", EnumValue::Module(ModuleKind::System)),
    ("umd", EnumValue::Module(ModuleKind::Umd)),
    ("es6", EnumValue::Module(ModuleKind::Es2015)),
    ("es2015", EnumValue::Module(ModuleKind::Es2015)),
    ("es2020", EnumValue::Module(ModuleKind::Es2020)),
    ("es2022", EnumValue::Module(ModuleKind::Es2022)),
    ("esnext", EnumValue::Module(ModuleKind::EsNext)),
    ("node16", EnumValue::Module(ModuleKind::Node16)),
    ("nodenext", EnumValue::Module(ModuleKind::NodeNext)),
    ("preserve", EnumValue::Module(ModuleKind::Preserve)),
];

pub static MODULE_RESOLUTION_MAP: &[(&str, EnumValue)] = &[
    ("node10", EnumValue::ModuleResolution(ModuleResolutionKind::Node10)),
    ("node", EnumValue::ModuleResolution(ModuleResolutionKind::Node10)),
    ("classic", EnumValue::ModuleResolution(ModuleResolutionKind::Classic)),
    ("node16", EnumValue::ModuleResolution(ModuleResolutionKind::Node16)),
    ("nodenext", EnumValue::ModuleResolution(ModuleResolutionKind::NodeNext)),
    ("bundler", EnumValue::ModuleResolution(ModuleResolutionKind::Bundler)),
];

pub static MODULE_DETECTION_MAP: &[(&str, EnumValue)] = &[
    ("auto", EnumValue::ModuleDetection(ModuleDetectionKind::Auto)),
    ("legacy", EnumValue::ModuleDetection(ModuleDetectionKind::Legacy)),
    ("force", EnumValue::ModuleDetection(ModuleDetectionKind::Force)),
];

pub static JSX_MAP: &[(&str, EnumValue)] = &[
    ("preserve", EnumValue::Jsx(JsxEmit::Preserve)),
    ("react-native", EnumValue::Jsx(JsxEmit::ReactNative)),
    ("react", EnumValue::Jsx(JsxEmit::React)),
    ("react-jsx", EnumValue::Jsx(JsxEmit::ReactJsx)),
    ("react-jsxdev", EnumValue::Jsx(JsxEmit::ReactJsxDev)),
];

pub static NEW_LINE_MAP: &[(&str, EnumValue)] = &[
    ("crlf", EnumValue::NewLine(NewLineKind::CarriageReturnLineFeed)),
    ("lf", EnumValue::NewLine(NewLineKind::LineFeed)),
];

pub static LIB_MAP: &[(&str, EnumValue)] = &[
    ("es5", EnumValue::Lib("lib.es5.d.ts")),
    ("es6", EnumValue::Lib("lib.es2015.d.ts")),
    ("es2015", EnumValue::Lib("lib.es2015.d.ts")),
    ("es7", EnumValue::Lib("lib.es2016.d.ts")),
    ("es2016", EnumValue::Lib("lib.es2016.d.ts")),
    ("es2017", EnumValue::Lib("lib.es2017.d.ts")),
    ("es2018", EnumValue::Lib("lib.es2018.d.ts")),
    ("es2019", EnumValue::Lib("lib.es2019.d.ts")),
    ("es2020", EnumValue::Lib("lib.es2020.d.ts")),
    ("es2021", EnumValue::Lib("lib.es2021.d.ts")),
    ("es2022", EnumValue::Lib("lib.es2022.d.ts")),
    ("es2023", EnumValue::Lib("lib.es2023.d.ts")),
    ("esnext", EnumValue::Lib("lib.esnext.d.ts")),
    ("dom", EnumValue::Lib("lib.dom.d.ts")),
    ("dom.iterable", EnumValue::Lib("lib.dom.iterable.d.ts")),
    ("dom.asynciterable", EnumValue::Lib("lib.dom.asynciterable.d.ts")),
    ("webworker", EnumValue::Lib("lib.webworker.d.ts")),
    ("webworker.importscripts", EnumValue::Lib("lib.webworker.importscripts.d.ts")),
    ("scripthost", EnumValue::Lib("lib.scripthost.d.ts")),
    ("es2015.core", EnumValue::Lib("lib.es2015.core.d.ts")),
    ("es2015.collection", EnumValue::Lib("lib.es2015.collection.d.ts")),
    ("es2015.iterable", EnumValue::Lib("lib.es2015.iterable.d.ts")),
    ("es2015.promise", EnumValue::Lib("lib.es2015.promise.d.ts")),
    ("es2015.symbol", EnumValue::Lib("lib.es2015.symbol.d.ts")),
    ("es2017.object", EnumValue::Lib("lib.es2017.object.d.ts")),
    ("es2017.string", EnumValue::Lib("lib.es2017.string.d.ts")),
    ("es2018.asynciterable", EnumValue::Lib("lib.es2018.asynciterable.d.ts")),
    ("es2019.array", EnumValue::Lib("lib.es2019.array.d.ts")),
    ("es2020.bigint", EnumValue::Lib("lib.es2020.bigint.d.ts")),
    ("es2022.error", EnumValue::Lib("lib.es2022.error.d.ts")),
    ("esnext.disposable", EnumValue::Lib("lib.esnext.disposable.d.ts")),
    ("decorators", EnumValue::Lib("lib.decorators.d.ts")),
];

pub static STRING_ELEMENT: OptionDescriptor = OptionDescriptor::string("element");

pub static FILE_PATH_ELEMENT: OptionDescriptor =
    OptionDescriptor::string("element").file_path().disallow_null();

pub static LIB_ELEMENT: OptionDescriptor =
    OptionDescriptor::enumeration("lib", LIB_MAP).disallow_null();

/// Root-level `extends`: one path or a list of paths
pub static EXTENDS_OPTION: OptionDescriptor =
    OptionDescriptor::list_or_element("extends", &STRING_ELEMENT).preserve_falsy();

/// Root-level `compileOnSave`
pub static COMPILE_ON_SAVE_OPTION: OptionDescriptor = OptionDescriptor::boolean("compileOnSave");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_lookup_is_case_insensitive() {
        let target = OptionDescriptor::enumeration("target", TARGET_MAP);
        assert_eq!(
            target.lookup_enum("ES2017"),
            Some(EnumValue::Target(ScriptTarget::Es2017))
        );
        assert_eq!(target.lookup_enum("es1999"), None);
        assert_eq!(
            target.enum_key_of(EnumValue::Target(ScriptTarget::Es2015)),
            Some("es6")
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(EXTENDS_OPTION.type_name(), "string or Array");
        assert_eq!(
            OptionDescriptor::list("types", &STRING_ELEMENT).type_name(),
            "Array"
        );
        assert_eq!(LIB_ELEMENT.type_name(), "string");
        assert!(OptionDescriptor::list("rootDirs", &FILE_PATH_ELEMENT).holds_file_paths());
    }
}
