//! Diagnostic types produced while resolving a configuration
//!
//! Diagnostics are accumulated, never thrown. Each carries a stable numeric
//! code, a [`DiagnosticCategory`] describing which stage produced it, and the
//! file it refers to when one is known.

use serde::{Deserialize, Serialize};

/// Represents a diagnostic message from configuration resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable numeric identifier of the message
    pub code: u32,
    /// Stage of resolution that produced the diagnostic
    pub category: DiagnosticCategory,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Configuration document the diagnostic refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Which stage of resolution produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticCategory {
    /// Malformed document recovered as a best-effort literal
    SyntaxRecovery,
    /// Wrong value kind, unknown option, misplaced command-line option
    Schema,
    /// Invalid include/exclude glob spec
    Spec,
    /// Missing extends target or circular extends chain
    Resolution,
    /// Empty `files` list or zero matched inputs
    EmptyResult,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational messages
    Info,
    /// Warnings that should be addressed
    Warning,
    /// Errors that must be fixed
    Error,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn new(code: u32, category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            severity: Severity::Error,
            message: message.into(),
            file: None,
        }
    }

    /// Attach the document this diagnostic refers to
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Override the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    // Message catalog. Codes are stable so callers can filter on them.

    pub fn unknown_option(name: &str, suggestion: Option<&str>) -> Self {
        match suggestion {
            Some(suggestion) => Self::new(
                5025,
                DiagnosticCategory::Schema,
                format!("Unknown compiler option '{name}'. Did you mean '{suggestion}'?"),
            ),
            None => Self::new(
                5023,
                DiagnosticCategory::Schema,
                format!("Unknown compiler option '{name}'."),
            ),
        }
    }

    pub fn option_type_mismatch(name: &str, expected: &str) -> Self {
        Self::new(
            5024,
            DiagnosticCategory::Schema,
            format!("Compiler option '{name}' requires a value of type {expected}."),
        )
    }

    pub fn invalid_enum_value(name: &str, accepted: &str) -> Self {
        Self::new(
            6046,
            DiagnosticCategory::Schema,
            format!("Argument for '--{name}' option must be: {accepted}."),
        )
    }

    pub fn command_line_only(name: &str) -> Self {
        Self::new(
            6064,
            DiagnosticCategory::Schema,
            format!("Option '{name}' can only be specified on command line."),
        )
    }

    pub fn config_file_only(name: &str) -> Self {
        Self::new(
            6230,
            DiagnosticCategory::Schema,
            format!(
                "Option '{name}' can only be specified in 'tsconfig.json' file or set to 'null' on command line."
            ),
        )
    }

    pub fn option_expects_argument(name: &str) -> Self {
        Self::new(
            6044,
            DiagnosticCategory::Schema,
            format!("Compiler option '{name}' expects an argument."),
        )
    }

    pub fn empty_string_option(name: &str) -> Self {
        Self::new(
            18051,
            DiagnosticCategory::Schema,
            format!("Compiler option '{name}' cannot be given an empty string."),
        )
    }

    pub fn root_not_object(file: &str) -> Self {
        Self::new(
            5092,
            DiagnosticCategory::SyntaxRecovery,
            format!("The root value of a '{file}' file must be an object."),
        )
    }

    pub fn parse_failure(file: &str, reason: &str) -> Self {
        Self::new(
            5014,
            DiagnosticCategory::SyntaxRecovery,
            format!("Failed to parse file '{file}': {reason}."),
        )
    }

    pub fn cannot_read_file(file: &str) -> Self {
        Self::new(
            5083,
            DiagnosticCategory::Resolution,
            format!("Cannot read file '{file}'."),
        )
    }

    pub fn file_not_found(file: &str) -> Self {
        Self::new(
            6053,
            DiagnosticCategory::Resolution,
            format!("File '{file}' not found."),
        )
    }

    pub fn circularity(chain: &[String]) -> Self {
        Self::new(
            18000,
            DiagnosticCategory::Resolution,
            format!(
                "Circularity detected while resolving configuration: {}",
                chain.join(" -> ")
            ),
        )
    }

    pub fn trailing_recursive_wildcard(spec: &str) -> Self {
        Self::new(
            5010,
            DiagnosticCategory::Spec,
            format!(
                "File specification cannot end in a recursive directory wildcard ('**'): '{spec}'."
            ),
        )
    }

    pub fn parent_after_recursive_wildcard(spec: &str) -> Self {
        Self::new(
            5065,
            DiagnosticCategory::Spec,
            format!(
                "File specification cannot contain a parent directory ('..') that appears after a recursive directory wildcard ('**'): '{spec}'."
            ),
        )
    }

    pub fn empty_files_list(config_file: &str) -> Self {
        Self::new(
            18002,
            DiagnosticCategory::EmptyResult,
            format!("The 'files' list in config file '{config_file}' is empty."),
        )
    }

    pub fn no_inputs_found(config_file: &str, include: &str, exclude: &str) -> Self {
        Self::new(
            18003,
            DiagnosticCategory::EmptyResult,
            format!(
                "No inputs were found in config file '{config_file}'. Specified 'include' paths were '{include}' and 'exclude' paths were '{exclude}'."
            ),
        )
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}: ")?;
        }
        write!(f, "{} TS{}: {}", self.severity, self.code, self.message)
    }
}
