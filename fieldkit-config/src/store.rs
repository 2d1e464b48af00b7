//! The configuration string owned by one widget instance.

use crate::macros::{contains_macros, resolve_value, MacroResolver};
use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// Raw widget configuration plus a lazily parsed JSON view.
///
/// The string never changes after construction. A different configuration
/// means a different value, so the JSON view is parsed once and shared by any
/// number of readers, including concurrent first readers.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WidgetConfiguration {
    raw: String,
    json: OnceLock<Result<Value, String>>,
}

impl WidgetConfiguration {
    /// Wrap a configuration string
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            json: OnceLock::new(),
        }
    }

    /// The configuration exactly as it was bound
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True for empty or whitespace-only configurations
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Apply macro resolution when a resolver is supplied.
    ///
    /// Without a resolver, or when the string holds no macros, the raw string
    /// is returned borrowed.
    pub fn resolved(&self, context: Option<&dyn MacroResolver>) -> ConfigResult<Cow<'_, str>> {
        match context {
            Some(resolver) if contains_macros(&self.raw) => {
                resolver.resolve_macros(&self.raw).map(Cow::Owned)
            }
            _ => Ok(Cow::Borrowed(&self.raw)),
        }
    }

    fn parsed(&self) -> &Result<Value, String> {
        self.json
            .get_or_init(|| serde_json::from_str(self.raw.trim()).map_err(|e| e.to_string()))
    }

    /// The configuration parsed as JSON, if it is JSON.
    pub fn json(&self) -> Option<&Value> {
        self.parsed().as_ref().ok()
    }

    /// The configuration parsed as JSON, reporting why it is not.
    pub fn parse_json(&self) -> ConfigResult<&Value> {
        self.parsed()
            .as_ref()
            .map_err(|message| ConfigError::InvalidJson {
                message: message.clone(),
            })
    }

    /// The JSON view with macros resolved inside its string values.
    ///
    /// Macros are resolved per JSON string, so substituted text can never
    /// change the structure of the document. Without a resolver, or when the
    /// configuration holds no macros, the cached view is returned borrowed.
    pub fn resolved_json(
        &self,
        context: Option<&dyn MacroResolver>,
    ) -> ConfigResult<Cow<'_, Value>> {
        let value = self.parse_json()?;
        match context {
            Some(resolver) if contains_macros(&self.raw) => {
                let mut value = value.clone();
                resolve_value(resolver, &mut value)?;
                Ok(Cow::Owned(value))
            }
            _ => Ok(Cow::Borrowed(value)),
        }
    }
}

impl fmt::Debug for WidgetConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetConfiguration").field(&self.raw).finish()
    }
}

impl fmt::Display for WidgetConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for WidgetConfiguration {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for WidgetConfiguration {}

impl From<String> for WidgetConfiguration {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for WidgetConfiguration {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<WidgetConfiguration> for String {
    fn from(config: WidgetConfiguration) -> Self {
        config.raw
    }
}
