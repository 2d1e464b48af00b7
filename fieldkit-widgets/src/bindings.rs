//! Design-time field bindings.
//!
//! A schema declares which widget edits each field:
//!
//! ```yaml
//! - field: layout
//!   widget: select
//!   configuration: "wide|Wide layout;narrow*|Narrow layout"
//! - field: teaser
//!   widget: ade-image-gallery
//!   configuration: '{"startup": "/images/"}'
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use fieldkit_config::WidgetConfiguration;

/// One field bound to a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub field: String,
    /// Registration name or alias of the widget
    pub widget: String,
    #[serde(default)]
    pub configuration: WidgetConfiguration,
}

impl FieldBinding {
    pub fn new(
        field: impl Into<String>,
        widget: impl Into<String>,
        configuration: impl Into<WidgetConfiguration>,
    ) -> Self {
        Self {
            field: field.into(),
            widget: widget.into(),
            configuration: configuration.into(),
        }
    }

    /// Parse a YAML list of bindings
    pub fn load_yaml(yaml: &str) -> Result<Vec<FieldBinding>> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }
}
