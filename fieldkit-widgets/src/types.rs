//! Core widget types.
//!
//! A widget kind names one editing control. Kinds serialize to the stable
//! registration names used by schema bindings and the client editor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Resource galleries available to the classic editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryKind {
    Download,
    Image,
    Link,
    Html,
    Table,
}

/// Galleries rendered by the rich client editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdeGalleryKind {
    Download,
    Image,
}

/// Widgets that edit a whole nested structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplexKind {
    DataView,
    Default,
}

/// Every editing control the registry knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Checkbox,
    Select,
    RadioSelect,
    ComboSelect,
    FilterSelect,
    TypeFilter,
    Html,
    HttpUpload,
    Plaintext,
    Gallery(GalleryKind),
    AdeGallery(AdeGalleryKind),
    AdvancedGallery,
    ElementViewSelect,
    DisplayTypeSelect,
    SerialDate,
    Complex(ComplexKind),
}

impl WidgetKind {
    /// All built-in kinds, in registration order.
    pub const ALL: [WidgetKind; 22] = [
        WidgetKind::Checkbox,
        WidgetKind::Select,
        WidgetKind::RadioSelect,
        WidgetKind::ComboSelect,
        WidgetKind::FilterSelect,
        WidgetKind::TypeFilter,
        WidgetKind::Html,
        WidgetKind::HttpUpload,
        WidgetKind::Plaintext,
        WidgetKind::Gallery(GalleryKind::Download),
        WidgetKind::Gallery(GalleryKind::Image),
        WidgetKind::Gallery(GalleryKind::Link),
        WidgetKind::Gallery(GalleryKind::Html),
        WidgetKind::Gallery(GalleryKind::Table),
        WidgetKind::AdeGallery(AdeGalleryKind::Download),
        WidgetKind::AdeGallery(AdeGalleryKind::Image),
        WidgetKind::AdvancedGallery,
        WidgetKind::ElementViewSelect,
        WidgetKind::DisplayTypeSelect,
        WidgetKind::SerialDate,
        WidgetKind::Complex(ComplexKind::DataView),
        WidgetKind::Complex(ComplexKind::Default),
    ];

    /// Stable registration name. Renaming one is a breaking change.
    pub fn name(self) -> &'static str {
        match self {
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Select => "select",
            WidgetKind::RadioSelect => "radio-select",
            WidgetKind::ComboSelect => "combo-select",
            WidgetKind::FilterSelect => "filter-select",
            WidgetKind::TypeFilter => "type-filter",
            WidgetKind::Html => "html",
            WidgetKind::HttpUpload => "http-upload",
            WidgetKind::Plaintext => "plaintext",
            WidgetKind::Gallery(GalleryKind::Download) => "download-gallery",
            WidgetKind::Gallery(GalleryKind::Image) => "image-gallery",
            WidgetKind::Gallery(GalleryKind::Link) => "link-gallery",
            WidgetKind::Gallery(GalleryKind::Html) => "html-gallery",
            WidgetKind::Gallery(GalleryKind::Table) => "table-gallery",
            WidgetKind::AdeGallery(AdeGalleryKind::Download) => "ade-download-gallery",
            WidgetKind::AdeGallery(AdeGalleryKind::Image) => "ade-image-gallery",
            WidgetKind::AdvancedGallery => "advanced-gallery",
            WidgetKind::ElementViewSelect => "element-view-select",
            WidgetKind::DisplayTypeSelect => "display-type-select",
            WidgetKind::SerialDate => "serial-date",
            WidgetKind::Complex(ComplexKind::DataView) => "data-view",
            WidgetKind::Complex(ComplexKind::Default) => "complex",
        }
    }

    /// Look a kind up by its registration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Whether the kind chooses from an option list.
    pub fn is_select(self) -> bool {
        matches!(
            self,
            WidgetKind::Select
                | WidgetKind::RadioSelect
                | WidgetKind::ComboSelect
                | WidgetKind::FilterSelect
                | WidgetKind::TypeFilter
                | WidgetKind::ElementViewSelect
                | WidgetKind::DisplayTypeSelect
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for WidgetKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for WidgetKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        WidgetKind::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown widget kind: {name}")))
    }
}

/// Capability flags read by the editor UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    SupportsPreview,
    SupportsDynamicJson,
    ComplexWidget,
}

/// What the editor UI knows about a widget without instantiating it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    pub name: String,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
}

impl WidgetDescriptor {
    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
