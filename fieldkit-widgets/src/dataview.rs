//! Data views for the complex data-view widget.
//!
//! A data-view widget is configured with a JSON object naming a view class:
//!
//! ```json
//! {"viewClass": "people", "configuration": {"columns": ["name", "mail"]}}
//! ```
//!
//! View classes are looked up in a [`ViewTypeRegistry`], normally a
//! [`PluginRegistry`] filled at startup with statically known factories.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{ConfigurationCause, Result, WidgetError};
use fieldkit_config::WidgetConfiguration;

/// Key naming the view class in a data-view configuration
pub const VIEW_CLASS_KEY: &str = "viewClass";
/// Key holding the settings handed to the view factory
pub const VIEW_CONFIGURATION_KEY: &str = "configuration";

/// What a plugin type can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginCapability {
    DataView,
    ValueFormatter,
}

impl fmt::Display for PluginCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginCapability::DataView => f.write_str("data-view"),
            PluginCapability::ValueFormatter => f.write_str("value-formatter"),
        }
    }
}

/// A tabular view over external data.
pub trait DataView: Send + Sync {
    /// Column names shown by the client
    fn columns(&self) -> Vec<String>;
}

/// Builds a data view from the `configuration` value.
pub type DataViewFactory = fn(&Value) -> std::result::Result<Box<dyn DataView>, String>;

/// One registered plugin type.
#[derive(Clone)]
pub struct PluginType {
    name: String,
    capabilities: BTreeSet<PluginCapability>,
    data_view: Option<DataViewFactory>,
}

impl PluginType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has(&self, capability: PluginCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// The factory, if this type really is a data view.
    pub fn data_view_factory(&self) -> Option<DataViewFactory> {
        self.data_view.filter(|_| self.has(PluginCapability::DataView))
    }
}

impl fmt::Debug for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginType")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

/// Resolves view class keys.
pub trait ViewTypeRegistry: Send + Sync {
    fn lookup(&self, key: &str) -> Option<&PluginType>;
}

/// Plugin types registered at startup.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    types: HashMap<String, PluginType>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a data view factory under `key`
    pub fn register_data_view(&mut self, key: impl Into<String>, factory: DataViewFactory) {
        let name = key.into();
        debug!(%name, "registered data view");
        self.types.insert(
            name.clone(),
            PluginType {
                name,
                capabilities: [PluginCapability::DataView].into_iter().collect(),
                data_view: Some(factory),
            },
        );
    }

    /// Register a plugin that is not a data view.
    ///
    /// A data-view capability without a factory cannot be honoured and is dropped.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        capabilities: impl IntoIterator<Item = PluginCapability>,
    ) {
        let name = key.into();
        let capabilities: BTreeSet<_> = capabilities
            .into_iter()
            .filter(|capability| {
                let keep = *capability != PluginCapability::DataView;
                if !keep {
                    warn!(%name, "data-view capability needs a factory, ignoring it");
                }
                keep
            })
            .collect();
        self.types.insert(
            name.clone(),
            PluginType {
                name,
                capabilities,
                data_view: None,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl ViewTypeRegistry for PluginRegistry {
    fn lookup(&self, key: &str) -> Option<&PluginType> {
        self.types.get(key)
    }
}

/// Validate a data-view configuration and build its view.
pub(crate) fn configure_data_view(
    widget: &str,
    configuration: &WidgetConfiguration,
    types: &dyn ViewTypeRegistry,
) -> Result<Arc<dyn DataView>> {
    let fail = |cause| WidgetError::configuration(widget, cause);

    let value = configuration
        .parse_json()
        .map_err(|e| fail(ConfigurationCause::MalformedJson(e)))?;
    let Value::Object(settings) = value else {
        return Err(fail(ConfigurationCause::NotAnObject));
    };
    let class = settings
        .get(VIEW_CLASS_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| fail(ConfigurationCause::MissingKey(VIEW_CLASS_KEY)))?;
    let plugin = types
        .lookup(class)
        .ok_or_else(|| fail(ConfigurationCause::UnknownViewClass(class.to_string())))?;
    let factory = plugin.data_view_factory().ok_or_else(|| {
        fail(ConfigurationCause::MissingCapability {
            name: class.to_string(),
            capability: PluginCapability::DataView,
        })
    })?;

    let view_settings = settings
        .get(VIEW_CONFIGURATION_KEY)
        .cloned()
        .unwrap_or(Value::Null);
    let view = factory(&view_settings).map_err(|message| {
        fail(ConfigurationCause::ViewRejected {
            name: class.to_string(),
            message,
        })
    })?;
    Ok(Arc::from(view))
}
