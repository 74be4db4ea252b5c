//! Typed values for compiler options

/// Three-valued flag distinguishing "not set" from an explicit `false`
///
/// Inheritance relies on this: only `Unknown` fields are filled from an
/// extended configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tristate {
    #[default]
    Unknown,
    False,
    True,
}

impl Tristate {
    pub fn is_true(self) -> bool {
        self == Tristate::True
    }

    pub fn is_unknown(self) -> bool {
        self == Tristate::Unknown
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            Tristate::Unknown => None,
            Tristate::False => Some(false),
            Tristate::True => Some(true),
        }
    }
}

impl From<bool> for Tristate {
    fn from(value: bool) -> Self {
        if value { Tristate::True } else { Tristate::False }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptTarget {
    Es3,
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Es2023,
    EsNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    None,
    CommonJs,
    Amd,
    Umd,
    System,
    Es2015,
    Es2020,
    Es2022,
    EsNext,
    Node16,
    NodeNext,
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleResolutionKind {
    Classic,
    Node10,
    Node16,
    NodeNext,
    Bundler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleDetectionKind {
    Auto,
    Legacy,
    Force,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsxEmit {
    Preserve,
    ReactNative,
    React,
    ReactJsx,
    ReactJsxDev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewLineKind {
    CarriageReturnLineFeed,
    LineFeed,
}

/// Closed set of values an enum-kinded option can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    Target(ScriptTarget),
    Module(ModuleKind),
    ModuleResolution(ModuleResolutionKind),
    ModuleDetection(ModuleDetectionKind),
    Jsx(JsxEmit),
    NewLine(NewLineKind),
    /// Library declaration file name, e.g. `lib.es2015.d.ts`
    Lib(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tristate_defaults_to_unknown() {
        assert_eq!(Tristate::default(), Tristate::Unknown);
        assert_eq!(Tristate::from(false), Tristate::False);
        assert_eq!(Tristate::True.as_bool(), Some(true));
        assert_eq!(Tristate::Unknown.as_bool(), None);
        assert!(ScriptTarget::Es2020 > ScriptTarget::Es2017);
    }
}
