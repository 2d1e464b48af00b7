//! Widget instances.
//!
//! A [`Widget`] is one kind plus one configuration string. Registry
//! prototypes carry an empty configuration; rendering always works on a
//! configured copy obtained from [`Widget::configure`].

use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

use crate::context::{DialogContext, EditContext, FormFields, WidgetParameter};
use crate::dataview::{configure_data_view, DataView, ViewTypeRegistry};
use crate::error::{Result, WidgetError};
use crate::gallery::{self, GalleryConfiguration};
use crate::options::OptionList;
use crate::render;
use crate::types::{Capability, ComplexKind, WidgetDescriptor, WidgetKind};
use crate::variants::{variant, Variant};
use fieldkit_config::{ConfigError, MacroResolver, WidgetConfiguration};

/// A widget kind bound to a configuration string.
#[derive(Clone)]
pub struct Widget {
    kind: WidgetKind,
    variant: Variant,
    configuration: WidgetConfiguration,
    data_view: Option<Arc<dyn DataView>>,
}

impl Widget {
    /// The unconfigured prototype of `kind`
    pub fn prototype(kind: WidgetKind) -> Self {
        Self {
            kind,
            variant: variant(kind),
            configuration: WidgetConfiguration::default(),
            data_view: None,
        }
    }

    /// A new widget of the same kind carrying `configuration`.
    ///
    /// `self` is left untouched. Data-view widgets validate their view class
    /// against `types` here, so a bad payload fails at bind time rather than
    /// during rendering.
    pub fn configure(
        &self,
        configuration: impl Into<WidgetConfiguration>,
        types: &dyn ViewTypeRegistry,
    ) -> Result<Widget> {
        let configuration = configuration.into();
        let data_view = match self.kind {
            WidgetKind::Complex(ComplexKind::DataView) => {
                Some(configure_data_view(self.name(), &configuration, types)?)
            }
            _ => None,
        };
        trace!(widget = %self.kind, configuration = %configuration, "configured widget");
        Ok(Widget {
            kind: self.kind,
            variant: self.variant,
            configuration,
            data_view,
        })
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Registration name of the kind
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn descriptor(&self) -> WidgetDescriptor {
        WidgetDescriptor {
            name: self.name().to_string(),
            is_internal: self.variant.is_internal,
            capabilities: self.variant.capabilities.iter().copied().collect(),
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.variant.capabilities.contains(&capability)
    }

    pub fn configuration(&self) -> &WidgetConfiguration {
        &self.configuration
    }

    pub(crate) fn variant(&self) -> &Variant {
        &self.variant
    }

    /// The configuration with macros resolved.
    ///
    /// Resolution failures are logged and the raw configuration is used.
    pub fn effective_configuration(&self, ctx: &EditContext<'_>) -> Cow<'_, str> {
        match self.configuration.resolved(ctx.macros) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(
                    widget = %self.name(),
                    %error,
                    "macro resolution failed, using raw configuration"
                );
                Cow::Borrowed(self.configuration.raw())
            }
        }
    }

    /// The options this widget offers.
    pub fn options(&self, ctx: &EditContext<'_>) -> OptionList {
        let configuration = self.effective_configuration(ctx);
        self.variant.options.options(&configuration, ctx)
    }

    /// The value shown for the parameter's stored value.
    ///
    /// Select-style widgets fall back to the effective default when the stored
    /// value is not one of their options.
    pub fn selected_value(&self, ctx: &EditContext<'_>, parameter: &dyn WidgetParameter) -> String {
        let stored = parameter.string_value();
        if !self.kind.is_select() {
            return stored.to_string();
        }
        self.options(ctx).selected(stored).to_string()
    }

    pub fn supports_preview(&self) -> bool {
        self.variant.preview.supports_preview()
    }

    /// The resource to preview for `value`
    pub fn preview_target<'v>(&self, value: &'v str) -> Option<&'v str> {
        self.variant.preview.preview_target(value)
    }

    /// Gallery tag such as `image`, for gallery widgets
    pub fn gallery_type(&self) -> Option<&'static str> {
        self.variant.gallery.map(|policy| policy.gallery_type())
    }

    /// Resource types the gallery may pick from
    pub fn resource_types(&self) -> &'static [&'static str] {
        self.variant
            .gallery
            .map(|policy| policy.resource_types())
            .unwrap_or(&[])
    }

    /// The typed gallery configuration, read from the configuration's JSON view.
    pub fn gallery_configuration(&self) -> Result<GalleryConfiguration> {
        self.resolved_gallery_configuration(None)
    }

    /// The gallery configuration with macros resolved inside its JSON strings.
    fn resolved_gallery_configuration(
        &self,
        macros: Option<&dyn MacroResolver>,
    ) -> Result<GalleryConfiguration> {
        if self.configuration.is_blank() {
            return Ok(GalleryConfiguration::default());
        }
        let json = self
            .configuration
            .resolved_json(macros)
            .map_err(|error| match error {
                ConfigError::InvalidJson { message } => WidgetError::assembly(
                    self.name(),
                    format!("malformed gallery configuration: {message}"),
                ),
                other => WidgetError::Config(other),
            })?;
        GalleryConfiguration::from_json(&json)
            .map_err(|message| WidgetError::assembly(self.name(), message))
    }

    /// The validated data view of a configured data-view widget
    pub fn data_view(&self) -> Option<&dyn DataView> {
        self.data_view.as_deref()
    }

    /// Render the editing control for `parameter`.
    pub fn render(
        &self,
        ctx: &EditContext<'_>,
        dialog: DialogContext,
        parameter: &dyn WidgetParameter,
    ) -> String {
        render::render(self, ctx, dialog, parameter)
    }

    /// Store the submitted form value in `parameter`.
    ///
    /// Unchecked checkboxes submit nothing, so a missing field reads as
    /// `false`. Other widgets leave the parameter alone when their field is
    /// missing.
    pub fn read_submitted_value(&self, form: &FormFields, parameter: &mut dyn WidgetParameter) {
        let submitted = form
            .get(parameter.id())
            .and_then(|values| values.first())
            .map(String::as_str);

        let value = match (self.kind, submitted) {
            (WidgetKind::Checkbox, submitted) => {
                let checked = submitted.is_some_and(|v| !v.trim().eq_ignore_ascii_case("false"));
                checked.to_string()
            }
            (WidgetKind::HttpUpload, Some(file)) => {
                let name = upload_file_name(file);
                if name.is_empty() {
                    return;
                }
                name.to_string()
            }
            (_, Some(value)) => value.to_string(),
            (_, None) => return,
        };
        trace!(widget = %self.name(), field = %parameter.name(), %value, "read submitted value");
        parameter.set_string_value(value);
    }

    /// The client editor configuration for this widget.
    ///
    /// Only widgets with the dynamic JSON capability support this. Macros are
    /// resolved in the widget's configuration only; the base object, the
    /// upload folder and the field's current value are used as given.
    pub fn dynamic_configuration(
        &self,
        base: &Map<String, Value>,
        ctx: &EditContext<'_>,
        parameter: &dyn WidgetParameter,
    ) -> Result<Map<String, Value>> {
        if !self.has(Capability::SupportsDynamicJson) {
            return Err(WidgetError::Unsupported {
                widget: self.name().to_string(),
                operation: "dynamic configuration",
            });
        }
        let gallery = self.resolved_gallery_configuration(ctx.macros)?;
        gallery::assemble_with(
            self,
            &gallery,
            base,
            ctx.repository,
            ctx.resource_path,
            ctx.messages,
            parameter,
        )
    }
}

/// Browsers send either a bare file name or a full client path.
fn upload_file_name(submitted: &str) -> &str {
    submitted
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(submitted)
        .trim()
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("kind", &self.kind)
            .field("configuration", &self.configuration)
            .field("data_view", &self.data_view.is_some())
            .finish()
    }
}
