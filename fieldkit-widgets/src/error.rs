//! Error types for the widget registry

use crate::dataview::PluginCapability;
use fieldkit_config::ConfigError;
use thiserror::Error;

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Errors that can occur in widget registry operations
#[derive(Debug, Error)]
pub enum WidgetError {
    /// No widget registered under this name
    #[error("unknown widget: {name}")]
    UnknownWidget { name: String },

    /// The configuration payload was rejected at bind time
    #[error("invalid configuration for widget '{widget}': {cause}")]
    Configuration {
        widget: String,
        #[source]
        cause: ConfigurationCause,
    },

    /// Building the client editor configuration failed
    #[error("cannot assemble configuration for widget '{widget}': {message}")]
    Assembly { widget: String, message: String },

    /// The widget does not support the requested operation
    #[error("widget '{widget}' does not support {operation}")]
    Unsupported {
        widget: String,
        operation: &'static str,
    },

    /// One batch binds the same field twice
    #[error("field '{field}' is bound more than once")]
    DuplicateBinding { field: String },

    /// Field binding definitions could not be read
    #[error("YAML error: {0}")]
    Bindings(#[from] serde_yaml_ng::Error),

    /// Configuration store error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WidgetError {
    pub(crate) fn configuration(widget: &str, cause: ConfigurationCause) -> Self {
        WidgetError::Configuration {
            widget: widget.to_string(),
            cause,
        }
    }

    pub(crate) fn assembly(widget: &str, message: impl Into<String>) -> Self {
        WidgetError::Assembly {
            widget: widget.to_string(),
            message: message.into(),
        }
    }
}

/// Why a configuration was rejected
#[derive(Debug, Error)]
pub enum ConfigurationCause {
    #[error(transparent)]
    MalformedJson(ConfigError),

    #[error("configuration must be a JSON object")]
    NotAnObject,

    #[error("missing key '{0}'")]
    MissingKey(&'static str),

    #[error("unknown view class '{0}'")]
    UnknownViewClass(String),

    #[error("'{name}' does not provide the {capability} capability")]
    MissingCapability {
        name: String,
        capability: PluginCapability,
    },

    #[error("view '{name}' rejected its configuration: {message}")]
    ViewRejected { name: String, message: String },
}
