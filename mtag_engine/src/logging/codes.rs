//! Consolidated event codes and classification system
//!
//! Single source of truth for all error and success codes, their metadata,
//! and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Word scanner event codes (the scanner degrades instead of failing)
pub mod scanner {
    use super::Code;

    pub const WORD_TRUNCATED: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
}

/// Tag engine event codes (non-fatal by design)
pub mod engine {
    use super::Code;

    pub const UNMATCHED_BLOCK_END: Code = Code::new("E040");
    pub const BLOCKS_OPEN_AT_EOF: Code = Code::new("E041");
    pub const EMPTY_FUNCTION_NAME: Code = Code::new("E042");
    pub const TAG_LIMIT_REACHED: Code = Code::new("E043");
    pub const NESTING_LIMIT_REACHED: Code = Code::new("E044");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");

    pub const SCAN_COMPLETE: Code = Code::new("I020");
    pub const TAGGING_COMPLETE: Code = Code::new("I030");

    pub const BATCH_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the failing input",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check configuration and environment variables",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File does not have .m extension",
                "Rename file with .m extension or disable the requirement",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or split the source",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is empty when content expected",
                "Provide a file with content or check file integrity",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in file",
                "Convert file to UTF-8 encoding",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path provided",
                "Provide a valid file path",
            ),
        );

        // Scanner events
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Scanner",
                Severity::Low,
                true,
                false,
                "Scanned word exceeds maximum length and was truncated",
                "Shorten the identifier in the source",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Scanner",
                Severity::Low,
                true,
                false,
                "String literal not terminated before end of line",
                "None required; the string is treated as closed at line end",
            ),
        );

        // Engine events
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Engine",
                Severity::Low,
                true,
                false,
                "Standalone end with no open block",
                "None required; the end keyword is ignored",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Engine",
                Severity::Low,
                true,
                false,
                "Blocks still open at end of input",
                "None required; open blocks are abandoned",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Engine",
                Severity::Low,
                true,
                false,
                "Function declaration with no discoverable name",
                "Check the function signature on the flagged line",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Engine",
                Severity::Medium,
                true,
                false,
                "Per-file tag limit reached; further tags dropped",
                "Split the source or raise the compiled limit",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Engine",
                Severity::Medium,
                true,
                false,
                "Nesting depth threshold reached; processing continues",
                "Check the input for runaway block openings",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get severity for a code (defaults to Low for unknown/success codes)
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Low)
}

/// Get category for a code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.category)
        .unwrap_or_else(|| {
            if code.starts_with('I') {
                "Success"
            } else {
                "Unknown"
            }
        })
}

/// Get description for a code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for a code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

/// Check if an error with this code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|m| m.recoverable)
        .unwrap_or(true)
}

/// Check if an error with this code requires halting
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}
