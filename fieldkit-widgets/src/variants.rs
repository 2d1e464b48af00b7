//! The built-in variant records.
//!
//! Each widget kind maps to one [`Variant`]: a choice of strategies plus the
//! descriptor flags the editor UI reads.

use crate::strategy::{
    ConfiguredOptions, DynamicConfigContributor, GalleryType, GalleryTypePolicy, ImageFormats,
    NoOptions, NoPreview, OptionSource, PreviewPolicy, ProvidedOptions, ResourcePreview,
};
use crate::types::{AdeGalleryKind, Capability, ComplexKind, GalleryKind, WidgetKind};

/// Strategies and flags of one widget kind.
#[derive(Clone, Copy)]
pub struct Variant {
    pub is_internal: bool,
    pub capabilities: &'static [Capability],
    pub options: &'static dyn OptionSource,
    pub preview: &'static dyn PreviewPolicy,
    pub gallery: Option<&'static dyn GalleryTypePolicy>,
    pub contributor: Option<&'static dyn DynamicConfigContributor>,
}

impl Variant {
    const PLAIN: Variant = Variant {
        is_internal: false,
        capabilities: &[],
        options: &NoOptions,
        preview: &NoPreview,
        gallery: None,
        contributor: None,
    };

    const SELECT: Variant = Variant {
        options: &ConfiguredOptions,
        ..Variant::PLAIN
    };

    const fn gallery(policy: &'static GalleryType) -> Variant {
        Variant {
            capabilities: &[Capability::SupportsPreview],
            preview: &ResourcePreview,
            gallery: Some(policy),
            ..Variant::PLAIN
        }
    }

    const fn ade_gallery(policy: &'static GalleryType) -> Variant {
        Variant {
            capabilities: &[Capability::SupportsPreview, Capability::SupportsDynamicJson],
            preview: &ResourcePreview,
            gallery: Some(policy),
            ..Variant::PLAIN
        }
    }

    const fn internal_select(list: &'static ProvidedOptions) -> Variant {
        Variant {
            is_internal: true,
            options: list,
            ..Variant::PLAIN
        }
    }
}

static RESOURCE_TYPES: ProvidedOptions = ProvidedOptions {
    list: "resource-types",
};
static ELEMENT_VIEWS: ProvidedOptions = ProvidedOptions {
    list: "element-views",
};
static DISPLAY_TYPES: ProvidedOptions = ProvidedOptions {
    list: "display-types",
};

/// The variant record for `kind`.
pub fn variant(kind: WidgetKind) -> Variant {
    match kind {
        WidgetKind::Checkbox
        | WidgetKind::Html
        | WidgetKind::HttpUpload
        | WidgetKind::Plaintext
        | WidgetKind::SerialDate => Variant::PLAIN,
        WidgetKind::Select
        | WidgetKind::RadioSelect
        | WidgetKind::ComboSelect
        | WidgetKind::FilterSelect => Variant::SELECT,
        WidgetKind::TypeFilter => Variant::internal_select(&RESOURCE_TYPES),
        WidgetKind::ElementViewSelect => Variant::internal_select(&ELEMENT_VIEWS),
        WidgetKind::DisplayTypeSelect => Variant::internal_select(&DISPLAY_TYPES),
        WidgetKind::Gallery(GalleryKind::Download) => Variant::gallery(&GalleryType::DOWNLOAD),
        WidgetKind::Gallery(GalleryKind::Image) => Variant::gallery(&GalleryType::IMAGE),
        WidgetKind::Gallery(GalleryKind::Link) => Variant {
            capabilities: &[],
            preview: &NoPreview,
            ..Variant::gallery(&GalleryType::LINK)
        },
        WidgetKind::Gallery(GalleryKind::Html) => Variant {
            capabilities: &[],
            preview: &NoPreview,
            ..Variant::gallery(&GalleryType::HTML)
        },
        WidgetKind::Gallery(GalleryKind::Table) => Variant {
            capabilities: &[],
            preview: &NoPreview,
            ..Variant::gallery(&GalleryType::TABLE)
        },
        WidgetKind::AdeGallery(AdeGalleryKind::Download) => {
            Variant::ade_gallery(&GalleryType::DOWNLOAD)
        }
        WidgetKind::AdeGallery(AdeGalleryKind::Image) => Variant {
            contributor: Some(&ImageFormats),
            ..Variant::ade_gallery(&GalleryType::IMAGE)
        },
        WidgetKind::AdvancedGallery => Variant {
            capabilities: &[Capability::SupportsDynamicJson],
            preview: &NoPreview,
            ..Variant::ade_gallery(&GalleryType::ADVANCED)
        },
        WidgetKind::Complex(ComplexKind::DataView) | WidgetKind::Complex(ComplexKind::Default) => {
            Variant {
                capabilities: &[Capability::ComplexWidget],
                ..Variant::PLAIN
            }
        }
    }
}
