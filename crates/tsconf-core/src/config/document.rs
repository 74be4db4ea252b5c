//! Reading configuration documents
//!
//! Documents are JSON with comments and trailing commas, parsed with `json5`.
//! A document that cannot be read or parsed, or whose root is not an object,
//! is diagnosed and treated as `{}` so resolution can continue.

use crate::diagnostics::Diagnostic;
use crate::host::ConfigHost;
use crate::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Root-level properties of one document, as authored
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile_on_save: Option<Value>,
}

impl RawConfig {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        // `null` is the same as leaving the property out
        let field = |name: &str| object.get(name).filter(|value| !value.is_null()).cloned();
        Self {
            extends: field("extends"),
            compiler_options: field("compilerOptions"),
            files: field("files"),
            include: field("include"),
            exclude: field("exclude"),
            references: field("references"),
            compile_on_save: field("compileOnSave"),
        }
    }

    /// Whether `references` is present and lists at least one project
    pub fn has_references(&self) -> bool {
        match &self.references {
            Some(Value::Array(references)) => !references.is_empty(),
            Some(_) => true,
            None => false,
        }
    }
}

/// Parse document text into a JSON object
pub fn parse_document(text: &str, file: &str, diagnostics: &mut Vec<Diagnostic>) -> Map<String, Value> {
    if text.trim().is_empty() {
        return Map::new();
    }

    let value: Value = match json5::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse {}: {}", file, e);
            diagnostics.push(Diagnostic::parse_failure(file, &e.to_string()).with_file(file));
            return Map::new();
        }
    };

    match value {
        Value::Object(object) => object,
        _ => {
            diagnostics.push(Diagnostic::root_not_object(file).with_file(file));
            Map::new()
        }
    }
}

/// Read and parse a document through the host
///
/// A missing file is a diagnostic; only genuine I/O failures are errors.
pub fn read_document<H: ConfigHost + ?Sized>(
    host: &H,
    file: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Map<String, Value>> {
    match host.read_file(file)? {
        Some(text) => {
            debug!("Read configuration document {}", file);
            Ok(parse_document(&text, file, diagnostics))
        }
        None => {
            diagnostics.push(Diagnostic::cannot_read_file(file).with_file(file));
            Ok(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticCategory;
    use crate::host::MemoryHost;
    use serde_json::json;

    #[test]
    fn test_parse_jsonc_document() {
        let mut diagnostics = Vec::new();
        let text = r#"{
            // base settings
            "extends": "./base.json",
            "compilerOptions": { "strict": true, },
            "include": ["src"],
        }"#;

        let object = parse_document(text, "/proj/tsconfig.json", &mut diagnostics);
        assert!(diagnostics.is_empty());

        let raw = RawConfig::from_object(&object);
        assert_eq!(raw.extends, Some(json!("./base.json")));
        assert_eq!(raw.include, Some(json!(["src"])));
        assert_eq!(raw.files, None);
        assert!(!raw.has_references());
    }

    #[test]
    fn test_malformed_document_recovers_as_empty() {
        let mut diagnostics = Vec::new();
        let object = parse_document("{ \"include\": [", "/proj/tsconfig.json", &mut diagnostics);
        assert!(object.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].category, DiagnosticCategory::SyntaxRecovery);

        let mut diagnostics = Vec::new();
        let object = parse_document("[1, 2]", "/proj/tsconfig.json", &mut diagnostics);
        assert!(object.is_empty());
        assert_eq!(diagnostics[0].code, 5092);
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        let mut diagnostics = Vec::new();
        assert!(parse_document("  \n", "/proj/tsconfig.json", &mut diagnostics).is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_read_missing_document() {
        let host = MemoryHost::new();
        let mut diagnostics = Vec::new();
        let object = read_document(&host, "/proj/tsconfig.json", &mut diagnostics).unwrap();
        assert!(object.is_empty());
        assert_eq!(diagnostics[0].code, 5083);
    }

    #[test]
    fn test_null_properties_are_absent() {
        let object = json!({ "files": null, "references": [] });
        let raw = RawConfig::from_object(object.as_object().unwrap());
        assert_eq!(raw.files, None);
        assert!(!raw.has_references());
    }
}
