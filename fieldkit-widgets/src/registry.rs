//! WidgetRegistry: prototypes by name, schema type defaults and field bindings.
//!
//! Prototypes are registered once at startup and never change afterwards.
//! Every lookup that hands out a widget for rendering returns a configured
//! copy, so callers never share state with the registry.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::bindings::FieldBinding;
use crate::dataview::{PluginRegistry, ViewTypeRegistry};
use crate::error::{Result, WidgetError};
use crate::types::{WidgetDescriptor, WidgetKind};
use crate::widget::Widget;
use fieldkit_config::WidgetConfiguration;

/// Default widgets for schema value types.
const DEFAULT_TYPE_MAPPINGS: [(&str, &str); 5] = [
    ("boolean", "checkbox"),
    ("string", "plaintext"),
    ("html", "html"),
    ("vfs-file", "download-gallery"),
    ("serial-date", "serial-date"),
];

#[derive(Clone)]
pub struct WidgetRegistry {
    prototypes: HashMap<String, Widget>,
    aliases: HashMap<String, String>,
    type_mappings: HashMap<String, String>,
    bindings: HashMap<String, Widget>,
    view_types: Arc<dyn ViewTypeRegistry>,
}

impl WidgetRegistry {
    /// An empty registry with no view classes
    pub fn new() -> Self {
        Self {
            prototypes: HashMap::new(),
            aliases: HashMap::new(),
            type_mappings: HashMap::new(),
            bindings: HashMap::new(),
            view_types: Arc::new(PluginRegistry::new()),
        }
    }

    /// A registry holding every built-in widget and the default type mappings.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in WidgetKind::ALL {
            registry.register(kind.name(), Widget::prototype(kind));
        }
        for (schema_type, widget) in DEFAULT_TYPE_MAPPINGS {
            registry
                .type_mappings
                .insert(schema_type.to_string(), widget.to_string());
        }
        debug!(
            widgets = registry.prototypes.len(),
            types = registry.type_mappings.len(),
            "registered built-in widgets"
        );
        registry
    }

    /// Use `view_types` to validate data-view configurations.
    pub fn with_view_types(mut self, view_types: Arc<dyn ViewTypeRegistry>) -> Self {
        self.view_types = view_types;
        self
    }

    /// Register a prototype, replacing any previous one of that name.
    pub fn register(&mut self, name: impl Into<String>, prototype: Widget) {
        let name = name.into();
        debug!(%name, kind = %prototype.kind(), "registered widget");
        self.prototypes.insert(name, prototype);
    }

    /// Let `alias` resolve to the widget registered as `name`.
    pub fn register_alias(&mut self, alias: impl Into<String>, name: &str) -> Result<()> {
        self.require(name)?;
        let alias = alias.into();
        debug!(%alias, %name, "registered widget alias");
        self.aliases.insert(alias, name.to_string());
        Ok(())
    }

    /// Use the widget `name` for fields of `schema_type`.
    pub fn map_type(&mut self, schema_type: impl Into<String>, name: &str) -> Result<()> {
        self.require(name)?;
        let schema_type = schema_type.into();
        debug!(%schema_type, widget = %name, "mapped schema type");
        self.type_mappings.insert(schema_type, name.to_string());
        Ok(())
    }

    /// The widget name used for fields of `schema_type`
    pub fn widget_for_type(&self, schema_type: &str) -> Option<&str> {
        self.type_mappings.get(schema_type).map(String::as_str)
    }

    /// The prototype registered under `name` or an alias of it
    pub fn prototype(&self, name: &str) -> Option<&Widget> {
        self.prototypes.get(name).or_else(|| {
            self.aliases
                .get(name)
                .and_then(|target| self.prototypes.get(target))
        })
    }

    fn require(&self, name: &str) -> Result<&Widget> {
        self.prototype(name).ok_or_else(|| WidgetError::UnknownWidget {
            name: name.to_string(),
        })
    }

    /// A configured instance of the widget `name`.
    ///
    /// Fails for unknown names and for configurations the widget rejects.
    pub fn create(
        &self,
        name: &str,
        configuration: impl Into<WidgetConfiguration>,
    ) -> Result<Widget> {
        self.require(name)?
            .configure(configuration, self.view_types.as_ref())
    }

    /// A configured instance of the default widget for `schema_type`
    pub fn create_for_type(
        &self,
        schema_type: &str,
        configuration: impl Into<WidgetConfiguration>,
    ) -> Result<Widget> {
        let name = self
            .widget_for_type(schema_type)
            .ok_or_else(|| WidgetError::UnknownWidget {
                name: schema_type.to_string(),
            })?;
        self.create(name, configuration)
    }

    /// Bind `field` to a configured widget.
    ///
    /// Nothing changes when the widget is unknown or rejects the configuration.
    pub fn bind(
        &mut self,
        field: impl Into<String>,
        name: &str,
        configuration: impl Into<WidgetConfiguration>,
    ) -> Result<()> {
        let widget = self.create(name, configuration)?;
        let field = field.into();
        debug!(%field, widget = %name, "bound field");
        self.bindings.insert(field, widget);
        Ok(())
    }

    /// Bind several fields at once.
    ///
    /// Every binding is validated first; on error none of them is stored.
    /// A field may appear only once per batch.
    pub fn bind_all(&mut self, bindings: impl IntoIterator<Item = FieldBinding>) -> Result<()> {
        let mut seen = HashSet::new();
        let configured = bindings
            .into_iter()
            .map(|binding| -> Result<(String, Widget)> {
                if !seen.insert(binding.field.clone()) {
                    warn!(field = %binding.field, "field bound twice in one batch");
                    return Err(WidgetError::DuplicateBinding {
                        field: binding.field,
                    });
                }
                let widget = self.create(&binding.widget, binding.configuration)?;
                Ok((binding.field, widget))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(count = configured.len(), "bound fields");
        self.bindings.extend(configured);
        Ok(())
    }

    /// Bind every field listed in a YAML binding document
    pub fn bind_yaml(&mut self, yaml: &str) -> Result<()> {
        self.bind_all(FieldBinding::load_yaml(yaml)?)
    }

    /// The widget bound to `field`
    pub fn binding(&self, field: &str) -> Option<&Widget> {
        self.bindings.get(field)
    }

    /// A fresh copy of the widget bound to `field`, for one render.
    pub fn instance_for(&self, field: &str) -> Option<Widget> {
        self.bindings.get(field).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.prototypes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Descriptors of the registered widgets, sorted by name.
    ///
    /// Internal widgets are only listed when `include_internal` is set.
    pub fn descriptors(&self, include_internal: bool) -> Vec<WidgetDescriptor> {
        let mut descriptors: Vec<WidgetDescriptor> = self
            .prototypes
            .iter()
            .map(|(name, prototype)| WidgetDescriptor {
                name: name.clone(),
                ..prototype.descriptor()
            })
            .filter(|descriptor| include_internal || !descriptor.is_internal)
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("widgets", &self.names())
            .field("aliases", &self.aliases)
            .field("type_mappings", &self.type_mappings)
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Capability, GalleryKind};
    use rstest::rstest;

    #[test]
    fn builtins_are_registered() {
        let registry = WidgetRegistry::with_builtins();
        assert_eq!(registry.len(), WidgetKind::ALL.len());
        for kind in WidgetKind::ALL {
            assert_eq!(registry.prototype(kind.name()).unwrap().kind(), kind);
        }
    }

    #[test]
    fn unknown_widget_fails() {
        let registry = WidgetRegistry::with_builtins();
        let err = registry.create("slider", "").unwrap_err();
        assert!(matches!(err, WidgetError::UnknownWidget { name } if name == "slider"));
    }

    #[test]
    fn create_leaves_prototype_unconfigured() {
        let registry = WidgetRegistry::with_builtins();
        let widget = registry.create("select", "a;b*").unwrap();
        assert_eq!(widget.configuration().raw(), "a;b*");
        assert!(registry.prototype("select").unwrap().configuration().is_blank());
    }

    #[rstest]
    #[case("boolean", WidgetKind::Checkbox)]
    #[case("string", WidgetKind::Plaintext)]
    #[case("vfs-file", WidgetKind::Gallery(GalleryKind::Download))]
    fn default_type_mappings(#[case] schema_type: &str, #[case] expected: WidgetKind) {
        let registry = WidgetRegistry::with_builtins();
        let widget = registry.create_for_type(schema_type, "").unwrap();
        assert_eq!(widget.kind(), expected);
    }

    #[test]
    fn map_type_requires_known_widget() {
        let mut registry = WidgetRegistry::with_builtins();
        registry.map_type("string", "html").unwrap();
        assert_eq!(registry.widget_for_type("string"), Some("html"));
        assert!(registry.map_type("color", "color-picker").is_err());
        assert!(registry.create_for_type("color", "").is_err());
    }

    #[test]
    fn aliases_resolve() {
        let mut registry = WidgetRegistry::with_builtins();
        registry.register_alias("SelectorWidget", "select").unwrap();
        let widget = registry.create("SelectorWidget", "x").unwrap();
        assert_eq!(widget.kind(), WidgetKind::Select);
        assert!(registry.register_alias("Old", "missing").is_err());
        assert!(!registry.names().contains(&"SelectorWidget"));
    }

    #[test]
    fn bind_and_instance() {
        let mut registry = WidgetRegistry::with_builtins();
        registry.bind("layout", "select", "wide;narrow*").unwrap();
        let instance = registry.instance_for("layout").unwrap();
        assert_eq!(instance.configuration().raw(), "wide;narrow*");
        assert!(registry.instance_for("missing").is_none());
    }

    #[test]
    fn bind_all_is_atomic() {
        let mut registry = WidgetRegistry::with_builtins();
        let result = registry.bind_all([
            FieldBinding::new("layout", "select", "a;b"),
            FieldBinding::new("people", "data-view", "{broken"),
        ]);
        assert!(matches!(result, Err(WidgetError::Configuration { .. })));
        assert!(registry.binding("layout").is_none());
    }

    #[test]
    fn bind_all_rejects_duplicate_field() {
        let mut registry = WidgetRegistry::with_builtins();
        registry.bind("layout", "select", "kept").unwrap();
        let result = registry.bind_all([
            FieldBinding::new("layout", "select", "a;b"),
            FieldBinding::new("title", "plaintext", ""),
            FieldBinding::new("layout", "radio-select", "c;d"),
        ]);
        assert!(matches!(
            result,
            Err(WidgetError::DuplicateBinding { ref field }) if field == "layout"
        ));
        assert_eq!(registry.binding("layout").unwrap().configuration().raw(), "kept");
        assert!(registry.binding("title").is_none());
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WidgetRegistry>();
    }

    #[test]
    fn bind_yaml() {
        let mut registry = WidgetRegistry::with_builtins();
        registry
            .bind_yaml("- field: visible\n  widget: checkbox\n- field: body\n  widget: html\n")
            .unwrap();
        assert_eq!(registry.binding("body").unwrap().kind(), WidgetKind::Html);
    }

    #[test]
    fn descriptors_hide_internal_widgets() {
        let registry = WidgetRegistry::with_builtins();
        let public = registry.descriptors(false);
        let all = registry.descriptors(true);
        assert_eq!(all.len(), public.len() + 3);
        assert!(public.iter().all(|d| !d.is_internal));
        assert!(all
            .iter()
            .any(|d| d.name == "ade-image-gallery" && d.has(Capability::SupportsDynamicJson)));
    }

    #[test]
    fn custom_registration_name() {
        let mut registry = WidgetRegistry::new();
        assert!(registry.is_empty());
        registry.register("yes-no", Widget::prototype(WidgetKind::Checkbox));
        let widget = registry.create("yes-no", "").unwrap();
        assert_eq!(widget.kind(), WidgetKind::Checkbox);
        assert_eq!(registry.descriptors(true)[0].name, "yes-no");
    }
}
