//! Client editor configuration for gallery widgets.
//!
//! The rich client editor receives one JSON object per gallery field. Callers
//! pass a base object with their own settings; the widget adds its own keys
//! but never replaces one the caller already set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::context::{Messages, RepositoryFolders, WidgetParameter};
use crate::error::{Result, WidgetError};
use crate::widget::Widget;

pub const KEY_GALLERY_TYPE: &str = "galleryType";
pub const KEY_TYPES: &str = "types";
pub const KEY_TAB_CONFIG: &str = "tabConfig";
pub const KEY_UPLOAD_FOLDER: &str = "uploadFolder";
pub const KEY_STARTUP_FOLDER: &str = "startupFolder";
pub const KEY_STARTUP_TYPE: &str = "startupType";
pub const KEY_CURRENT_ELEMENT: &str = "currentElement";
pub const KEY_USE_FORMATS: &str = "useFormats";
pub const KEY_IMAGE_FORMATS: &str = "imageFormats";
pub const KEY_IMAGE_FORMAT_NAMES: &str = "imageFormatNames";

/// The JSON configuration string of a gallery widget.
///
/// A blank configuration means all defaults.
///
/// ```json
/// {"startup": "/images/", "type": "folder", "formats": ["1:1", "16:9"], "formatnames": "Square|Wide"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfiguration {
    /// Folder or gallery the dialog opens at
    pub startup: Option<String>,
    /// Whether `startup` names a folder or a gallery
    #[serde(rename = "type")]
    pub startup_type: Option<String>,
    #[serde(rename = "tabconfig")]
    pub tab_config: Option<String>,
    #[serde(rename = "useformats")]
    pub use_formats: Option<bool>,
    pub formats: Vec<String>,
    /// Pipe separated display names, one per format
    #[serde(rename = "formatnames")]
    pub format_names: Option<String>,
}

impl GalleryConfiguration {
    /// Read the typed configuration from a widget's JSON view.
    pub fn from_json(value: &Value) -> std::result::Result<Self, String> {
        Self::deserialize(value).map_err(|e| format!("malformed gallery configuration: {e}"))
    }
}

/// Build the client editor configuration of a gallery widget.
///
/// Keys already present in `base` are kept as they are.
pub fn assemble(
    widget: &Widget,
    base: &Map<String, Value>,
    cms: &dyn RepositoryFolders,
    resource_path: &str,
    messages: &dyn Messages,
    parameter: &dyn WidgetParameter,
) -> Result<Map<String, Value>> {
    let gallery = widget.gallery_configuration()?;
    assemble_with(widget, &gallery, base, cms, resource_path, messages, parameter)
}

/// [`assemble`] over an already read, possibly macro-resolved, configuration.
///
/// Only `gallery` carries configuration text. The upload folder and the
/// current element are used exactly as the repository and the field give them.
pub(crate) fn assemble_with(
    widget: &Widget,
    gallery: &GalleryConfiguration,
    base: &Map<String, Value>,
    cms: &dyn RepositoryFolders,
    resource_path: &str,
    messages: &dyn Messages,
    parameter: &dyn WidgetParameter,
) -> Result<Map<String, Value>> {
    let policy = widget
        .variant()
        .gallery
        .ok_or_else(|| WidgetError::Unsupported {
            widget: widget.name().to_string(),
            operation: "dynamic configuration",
        })?;

    let mut fragment = Map::new();
    fragment.insert(
        KEY_GALLERY_TYPE.to_string(),
        Value::from(policy.gallery_type()),
    );
    fragment.insert(
        KEY_TYPES.to_string(),
        Value::from(policy.resource_types().to_vec()),
    );
    let tabs = gallery
        .tab_config
        .as_deref()
        .unwrap_or(policy.default_tab_config());
    fragment.insert(KEY_TAB_CONFIG.to_string(), Value::from(tabs));
    if let Some(startup) = &gallery.startup {
        fragment.insert(KEY_STARTUP_FOLDER.to_string(), Value::from(startup.as_str()));
    }
    if let Some(startup_type) = &gallery.startup_type {
        fragment.insert(
            KEY_STARTUP_TYPE.to_string(),
            Value::from(startup_type.as_str()),
        );
    }

    let folder_type = format!("{}gallery", policy.gallery_type());
    match cms.lookup_folder(resource_path, &folder_type) {
        Some(folder) if !folder.trim().is_empty() => {
            fragment.insert(KEY_UPLOAD_FOLDER.to_string(), Value::from(folder));
        }
        _ => debug!(widget = %widget.name(), %folder_type, resource_path, "no upload folder"),
    }

    let current = parameter.string_value();
    if !current.is_empty() {
        fragment.insert(KEY_CURRENT_ELEMENT.to_string(), Value::from(current));
    }

    if let Some(contributor) = widget.variant().contributor {
        let extra = contributor
            .contribute(gallery, messages)
            .map_err(|message| WidgetError::assembly(widget.name(), message))?;
        fragment.extend(extra);
    }

    Ok(merge_first_writer_wins(base.clone(), fragment))
}

/// Add `fragment` to `base` without replacing existing keys.
pub fn merge_first_writer_wins(
    mut base: Map<String, Value>,
    fragment: Map<String, Value>,
) -> Map<String, Value> {
    for (key, value) in fragment {
        if base.contains_key(&key) {
            trace!(%key, "keeping caller value");
            continue;
        }
        base.insert(key, value);
    }
    base
}
