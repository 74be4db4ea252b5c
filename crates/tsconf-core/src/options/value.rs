//! Typed option values and their mapping onto `CompilerOptions` fields

use super::descriptor::{OptionDescriptor, OptionKind};
use super::types::{
    EnumValue, JsxEmit, ModuleDetectionKind, ModuleKind, ModuleResolutionKind, NewLineKind,
    ScriptTarget, Tristate,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Result of converting one raw value against a descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
    Enum(EnumValue),
    List(Vec<OptionValue>),
    Object(Map<String, Value>),
}

impl OptionValue {
    /// `false`, `0` and `""` are dropped from lists unless the descriptor preserves them
    pub fn is_falsy(&self) -> bool {
        match self {
            OptionValue::Bool(value) => !value,
            OptionValue::Number(value) => *value == 0.0 || value.is_nan(),
            OptionValue::String(value) => value.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Render back to JSON, using enum keys rather than internal values
    pub fn to_json(&self, descriptor: &OptionDescriptor) -> Value {
        match self {
            OptionValue::Bool(value) => Value::Bool(*value),
            OptionValue::Number(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            OptionValue::String(value) => match lib_key(descriptor, value) {
                Some(key) => Value::String(key.to_string()),
                None => Value::String(value.clone()),
            },
            OptionValue::Enum(value) => descriptor
                .enum_key_of(*value)
                .map(|key| Value::String(key.to_string()))
                .unwrap_or(Value::Null),
            OptionValue::List(items) => {
                let element = descriptor.element.unwrap_or(descriptor);
                Value::Array(items.iter().map(|item| item.to_json(element)).collect())
            }
            OptionValue::Object(map) => Value::Object(map.clone()),
        }
    }
}

/// `lib` entries are stored as file names; map them back to the key the user wrote
fn lib_key(descriptor: &OptionDescriptor, file_name: &str) -> Option<&'static str> {
    if descriptor.kind != OptionKind::Enum {
        return None;
    }
    descriptor.enum_key_of(EnumValue::Lib(lib_file_name(descriptor, file_name)?))
}

fn lib_file_name(descriptor: &OptionDescriptor, file_name: &str) -> Option<&'static str> {
    descriptor.enum_map?.iter().find_map(|(_, value)| match value {
        EnumValue::Lib(name) if *name == file_name => Some(*name),
        _ => None,
    })
}

/// A `CompilerOptions` field that can be written from, and read back as, an [`OptionValue`]
pub trait OptionField: Default + Clone {
    /// Store a converted value; `None` resets the field to unset
    fn set_option_value(&mut self, value: Option<OptionValue>);

    fn to_option_value(&self) -> Option<OptionValue>;

    /// Unset fields are filled in from extended configurations
    fn is_unset(&self) -> bool;
}

impl OptionField for Tristate {
    fn set_option_value(&mut self, value: Option<OptionValue>) {
        *self = match value {
            Some(OptionValue::Bool(value)) => Tristate::from(value),
            _ => Tristate::Unknown,
        };
    }

    fn to_option_value(&self) -> Option<OptionValue> {
        self.as_bool().map(OptionValue::Bool)
    }

    fn is_unset(&self) -> bool {
        self.is_unknown()
    }
}

impl OptionField for Option<String> {
    fn set_option_value(&mut self, value: Option<OptionValue>) {
        *self = match value {
            Some(OptionValue::String(value)) => Some(value),
            _ => None,
        };
    }

    fn to_option_value(&self) -> Option<OptionValue> {
        self.clone().map(OptionValue::String)
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl OptionField for Option<f64> {
    fn set_option_value(&mut self, value: Option<OptionValue>) {
        *self = match value {
            Some(OptionValue::Number(value)) => Some(value),
            _ => None,
        };
    }

    fn to_option_value(&self) -> Option<OptionValue> {
        self.map(OptionValue::Number)
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl OptionField for Option<Vec<String>> {
    fn set_option_value(&mut self, value: Option<OptionValue>) {
        *self = match value {
            Some(OptionValue::List(items)) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        OptionValue::String(value) => Some(value),
                        OptionValue::Enum(EnumValue::Lib(name)) => Some(name.to_string()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        };
    }

    fn to_option_value(&self) -> Option<OptionValue> {
        self.as_ref().map(|items| {
            OptionValue::List(items.iter().cloned().map(OptionValue::String).collect())
        })
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

/// `paths`: pattern to substitution list; entries that are not string arrays are ignored
impl OptionField for Option<IndexMap<String, Vec<String>>> {
    fn set_option_value(&mut self, value: Option<OptionValue>) {
        *self = match value {
            Some(OptionValue::Object(map)) => Some(
                map.into_iter()
                    .filter_map(|(pattern, substitutions)| {
                        let Value::Array(substitutions) = substitutions else {
                            return None;
                        };
                        let substitutions = substitutions
                            .into_iter()
                            .filter_map(|s| s.as_str().map(str::to_string))
                            .collect();
                        Some((pattern, substitutions))
                    })
                    .collect(),
            ),
            _ => None,
        };
    }

    fn to_option_value(&self) -> Option<OptionValue> {
        self.as_ref().map(|paths| {
            OptionValue::Object(
                paths
                    .iter()
                    .map(|(pattern, substitutions)| {
                        let substitutions = substitutions
                            .iter()
                            .map(|s| Value::String(s.clone()))
                            .collect();
                        (pattern.clone(), Value::Array(substitutions))
                    })
                    .collect(),
            )
        })
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

macro_rules! enum_option_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl OptionField for Option<$ty> {
                fn set_option_value(&mut self, value: Option<OptionValue>) {
                    *self = match value {
                        Some(OptionValue::Enum(EnumValue::$variant(value))) => Some(value),
                        _ => None,
                    };
                }

                fn to_option_value(&self) -> Option<OptionValue> {
                    self.map(|value| OptionValue::Enum(EnumValue::$variant(value)))
                }

                fn is_unset(&self) -> bool {
                    self.is_none()
                }
            }
        )*
    };
}

enum_option_field! {
    ScriptTarget => Target,
    ModuleKind => Module,
    ModuleResolutionKind => ModuleResolution,
    ModuleDetectionKind => ModuleDetection,
    JsxEmit => Jsx,
    NewLineKind => NewLine,
}
