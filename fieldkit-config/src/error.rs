//! Error types for widget configuration handling

use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A macro has no value in the context and no default
    #[error("Unresolved macro '{name}'")]
    UnresolvedMacro { name: String },

    /// Macro values kept expanding into further macros
    #[error("Macro expansion did not terminate for: {input}")]
    MacroRecursion { input: String },

    /// Configuration is not valid JSON
    #[error("Invalid JSON configuration: {message}")]
    InvalidJson { message: String },
}

impl ConfigError {
    /// Create an unresolved macro error
    pub fn unresolved(name: impl Into<String>) -> Self {
        ConfigError::UnresolvedMacro { name: name.into() }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::InvalidJson {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_display() {
        let err = ConfigError::unresolved("site.root");
        assert_eq!(err.to_string(), "Unresolved macro 'site.root'");
    }

    #[test]
    fn test_json_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = source.into();
        assert!(err.to_string().starts_with("Invalid JSON configuration"));
    }
}
