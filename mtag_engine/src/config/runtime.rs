// RUNTIME PREFERENCES (user experience; limits stay in constants)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .m extension (user preference, not a limit)
    pub require_m_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,

    /// Whether to log debug information for non-MATLAB files
    pub log_non_matlab_processing: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_m_extension: env::var("MTAG_REQUIRE_M_EXTENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var("MTAG_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_non_matlab_processing: env::var("MTAG_LOG_NON_MATLAB_PROCESSING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePreferences {
    /// Whether to drop tags with an empty name before they reach the sink
    pub filter_empty_names: bool,

    /// Whether to record non-fatal diagnostics (unmatched end, open blocks)
    pub record_diagnostics: bool,

    /// Whether to log each emitted tag at debug level
    pub log_emitted_tags: bool,
}

impl Default for EnginePreferences {
    fn default() -> Self {
        Self {
            filter_empty_names: env::var("MTAG_FILTER_EMPTY_NAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            record_diagnostics: env::var("MTAG_RECORD_DIAGNOSTICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            log_emitted_tags: env::var("MTAG_LOG_EMITTED_TAGS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

/// Log level as a runtime preference (converted to the event level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warning" | "warn" => Some(LogLevel::Warning),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level emitted by the global logger
    pub min_log_level: LogLevel,

    /// Whether to emit structured (JSON) events instead of plain lines
    pub use_structured_logging: bool,

    /// Whether console logging is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var("MTAG_LOG_LEVEL")
                .ok()
                .and_then(|v| LogLevel::from_str(&v))
                .unwrap_or(LogLevel::Info),
            use_structured_logging: env::var("MTAG_STRUCTURED_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("MTAG_CONSOLE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

/// All runtime preferences gathered in one place.
///
/// Resolution order: `mtag.toml` (if present) overrides environment
/// variables, which override the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub file_processor: FileProcessorPreferences,
    pub engine: EnginePreferences,
    pub logging: LoggingPreferences,
}

impl Preferences {
    /// Load preferences, applying a TOML file over the env-var defaults
    pub fn load_from_file(path: &Path) -> Result<Self, toml::de::Error> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Load preferences from `mtag.toml` in the working directory, if any
    pub fn load() -> Self {
        Self::load_from_file(Path::new("mtag.toml")).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert!(prefs.engine.record_diagnostics);
        assert!(!prefs.engine.filter_empty_names);
        assert!(prefs.logging.enable_console_logging);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_str("nope"), None);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mtag.toml");
        fs::write(
            &path,
            "[engine]\nfilter_empty_names = true\nrecord_diagnostics = false\nlog_emitted_tags = false\n",
        )
        .unwrap();

        let prefs = Preferences::load_from_file(&path).unwrap();
        assert!(prefs.engine.filter_empty_names);
        assert!(!prefs.engine.record_diagnostics);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let prefs = Preferences::load_from_file(Path::new("does-not-exist.toml")).unwrap();
        assert!(prefs.logging.enable_console_logging);
    }
}
