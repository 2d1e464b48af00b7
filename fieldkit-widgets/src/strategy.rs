//! Pluggable behaviors that make up a widget variant.
//!
//! A variant does not override methods. It picks one implementation of each
//! strategy below, see [`crate::variants`].

use serde_json::{Map, Value};

use crate::context::{EditContext, Messages};
use crate::gallery::{
    GalleryConfiguration, KEY_IMAGE_FORMATS, KEY_IMAGE_FORMAT_NAMES, KEY_USE_FORMATS,
};
use crate::options::{parse_options, OptionList};

/// Where a widget's options come from.
pub trait OptionSource: Send + Sync {
    fn options(&self, configuration: &str, ctx: &EditContext<'_>) -> OptionList;
}

/// The widget has no options.
pub struct NoOptions;

impl OptionSource for NoOptions {
    fn options(&self, _configuration: &str, _ctx: &EditContext<'_>) -> OptionList {
        OptionList::default()
    }
}

/// Options are the parsed configuration string.
pub struct ConfiguredOptions;

impl OptionSource for ConfiguredOptions {
    fn options(&self, configuration: &str, _ctx: &EditContext<'_>) -> OptionList {
        parse_options(configuration)
    }
}

/// Options come from a system list unless the configuration names its own.
pub struct ProvidedOptions {
    pub list: &'static str,
}

impl OptionSource for ProvidedOptions {
    fn options(&self, configuration: &str, ctx: &EditContext<'_>) -> OptionList {
        if !configuration.trim().is_empty() {
            return parse_options(configuration);
        }
        ctx.provider
            .and_then(|provider| provider.options(self.list))
            .unwrap_or_default()
    }
}

/// Whether and how a widget previews its value.
pub trait PreviewPolicy: Send + Sync {
    fn supports_preview(&self) -> bool;

    /// The resource to preview for `value`, if any.
    fn preview_target<'v>(&self, value: &'v str) -> Option<&'v str>;
}

pub struct NoPreview;

impl PreviewPolicy for NoPreview {
    fn supports_preview(&self) -> bool {
        false
    }

    fn preview_target<'v>(&self, _value: &'v str) -> Option<&'v str> {
        None
    }
}

/// Previews values that are repository paths.
pub struct ResourcePreview;

impl PreviewPolicy for ResourcePreview {
    fn supports_preview(&self) -> bool {
        true
    }

    fn preview_target<'v>(&self, value: &'v str) -> Option<&'v str> {
        let value = value.trim();
        value.starts_with('/').then_some(value)
    }
}

/// Gallery tag and permitted resource types.
pub trait GalleryTypePolicy: Send + Sync {
    /// Short tag such as `image`; the upload folder type is this plus `gallery`.
    fn gallery_type(&self) -> &'static str;

    fn resource_types(&self) -> &'static [&'static str];

    /// Tab configuration used when the widget configuration names none.
    fn default_tab_config(&self) -> &'static str;
}

/// A gallery policy described entirely by data.
pub struct GalleryType {
    pub name: &'static str,
    pub resource_types: &'static [&'static str],
    pub tab_config: &'static str,
}

impl GalleryType {
    pub const DOWNLOAD: GalleryType = GalleryType {
        name: "download",
        resource_types: &["binary", "plain"],
        tab_config: "selectDoc",
    };
    pub const IMAGE: GalleryType = GalleryType {
        name: "image",
        resource_types: &["image"],
        tab_config: "selectMedia",
    };
    pub const LINK: GalleryType = GalleryType {
        name: "link",
        resource_types: &["pointer"],
        tab_config: "selectDoc",
    };
    pub const HTML: GalleryType = GalleryType {
        name: "html",
        resource_types: &["htmlredirect", "plain"],
        tab_config: "selectDoc",
    };
    pub const TABLE: GalleryType = GalleryType {
        name: "table",
        resource_types: &["plain"],
        tab_config: "selectDoc",
    };
    pub const ADVANCED: GalleryType = GalleryType {
        name: "advanced",
        resource_types: &["binary", "image", "plain", "pointer"],
        tab_config: "selectAll",
    };
}

impl GalleryTypePolicy for GalleryType {
    fn gallery_type(&self) -> &'static str {
        self.name
    }

    fn resource_types(&self) -> &'static [&'static str] {
        self.resource_types
    }

    fn default_tab_config(&self) -> &'static str {
        self.tab_config
    }
}

/// Widget-specific keys added to the client editor configuration.
pub trait DynamicConfigContributor: Send + Sync {
    /// The fragment to merge, or a message describing the malformed input.
    fn contribute(
        &self,
        gallery: &GalleryConfiguration,
        messages: &dyn Messages,
    ) -> Result<Map<String, Value>, String>;
}

/// Fixed image formats for image galleries.
pub struct ImageFormats;

impl DynamicConfigContributor for ImageFormats {
    fn contribute(
        &self,
        gallery: &GalleryConfiguration,
        messages: &dyn Messages,
    ) -> Result<Map<String, Value>, String> {
        let names: Vec<String> = match gallery.format_names.as_deref() {
            Some(names) if !names.trim().is_empty() => names
                .split('|')
                .map(str::trim)
                .map(|name| messages.key_or(name, name))
                .collect(),
            _ => Vec::new(),
        };
        if !names.is_empty() && names.len() != gallery.formats.len() {
            return Err(format!(
                "{} format names given for {} formats",
                names.len(),
                gallery.formats.len()
            ));
        }

        let use_formats = gallery.use_formats.unwrap_or(!gallery.formats.is_empty());
        let formats = serde_json::to_value(&gallery.formats).map_err(|e| e.to_string())?;
        let names = serde_json::to_value(&names).map_err(|e| e.to_string())?;

        let mut fragment = Map::new();
        fragment.insert(KEY_USE_FORMATS.to_string(), Value::Bool(use_formats));
        fragment.insert(KEY_IMAGE_FORMATS.to_string(), formats);
        fragment.insert(KEY_IMAGE_FORMAT_NAMES.to_string(), names);
        Ok(fragment)
    }
}
