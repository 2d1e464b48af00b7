//! End-to-end tests: registry lookup, configuration, option selection and
//! client configuration assembly.

use fieldkit_widgets::{
    ConfigurationCause, DataView, DialogContext, EditContext, FieldBinding, FieldValue,
    MacroContext, MessageBundle, NoFolders, PluginRegistry, RepositoryFolders, SelectOption,
    WidgetError, WidgetRegistry,
};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Repository with one download and one image gallery folder per site.
struct SiteFolders;

impl RepositoryFolders for SiteFolders {
    fn lookup_folder(&self, resource_path: &str, folder_type: &str) -> Option<String> {
        let site = resource_path.strip_prefix("/sites/")?.split('/').next()?;
        match folder_type {
            "downloadgallery" | "imagegallery" => Some(format!("/sites/{site}/{folder_type}/")),
            _ => None,
        }
    }
}

struct Columns(Vec<String>);

impl DataView for Columns {
    fn columns(&self) -> Vec<String> {
        self.0.clone()
    }
}

fn people_view(_: &Value) -> Result<Box<dyn DataView>, String> {
    Ok(Box::new(Columns(vec!["name".into(), "mail".into()])))
}

fn plugins() -> Arc<PluginRegistry> {
    let mut plugins = PluginRegistry::new();
    plugins.register_data_view("people", people_view);
    Arc::new(plugins)
}

fn registry() -> WidgetRegistry {
    WidgetRegistry::with_builtins().with_view_types(plugins())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn select_options_and_selection() {
    let registry = registry();
    let widget = registry.create("select", "a|b;c*|d").unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &NoFolders);

    let options = widget.options(&ctx);
    assert_eq!(
        options.options(),
        &[
            SelectOption::new("a").with_label("b"),
            SelectOption::new("c").with_label("d").as_default(),
        ]
    );
    assert_eq!(widget.selected_value(&ctx, &FieldValue::new("f", "a")), "a");
    assert_eq!(widget.selected_value(&ctx, &FieldValue::new("f", "z")), "c");
}

#[test]
fn empty_configuration_selects_nothing() {
    let registry = registry();
    let widget = registry.create("select", "").unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &NoFolders);

    assert!(widget.options(&ctx).is_empty());
    for stored in ["", "a", "anything"] {
        assert_eq!(widget.selected_value(&ctx, &FieldValue::new("f", stored)), "");
    }
}

#[test]
fn image_gallery_formats() {
    let registry = registry();
    let widget = registry
        .create(
            "ade-image-gallery",
            r#"{"formats": ["1:1", "16:9"], "formatnames": "Square|Wide"}"#,
        )
        .unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &SiteFolders);
    let field = FieldValue::new("teaser", "/sites/a/imagegallery/cat.png");

    let config = widget
        .dynamic_configuration(&Map::new(), &ctx, &field)
        .unwrap();
    assert_eq!(config["useFormats"], json!(true));
    assert_eq!(config["imageFormats"], json!(["1:1", "16:9"]));
    assert_eq!(config["imageFormatNames"], json!(["Square", "Wide"]));
    assert_eq!(config["galleryType"], json!("image"));
    assert_eq!(config["types"], json!(["image"]));
    assert_eq!(config["uploadFolder"], json!("/sites/a/imagegallery/"));
    assert_eq!(config["currentElement"], json!("/sites/a/imagegallery/cat.png"));
}

#[test]
fn base_upload_folder_is_kept() {
    let registry = registry();
    let widget = registry.create("ade-download-gallery", "").unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &SiteFolders);
    let field = FieldValue::new("file", "");
    let base = object(json!({"uploadFolder": "/custom/"}));

    assert_eq!(
        SiteFolders.lookup_folder("/sites/a/index.html", "downloadgallery"),
        Some("/sites/a/downloadgallery/".to_string())
    );
    let config = widget.dynamic_configuration(&base, &ctx, &field).unwrap();
    assert_eq!(config["uploadFolder"], json!("/custom/"));
    assert_eq!(config["tabConfig"], json!("selectDoc"));
    assert!(!config.contains_key("currentElement"));
    assert!(!config.contains_key("useFormats"));
}

#[test]
fn assembly_never_drops_base_keys() {
    let registry = registry();
    let widget = registry
        .create("ade-image-gallery", r#"{"tabconfig": "selectMedia"}"#)
        .unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &SiteFolders);
    let base = object(json!({
        "galleryType": "custom",
        "imageFormats": ["2:1"],
        "locale": "de",
        "tabConfig": null,
    }));

    let config = widget
        .dynamic_configuration(&base, &ctx, &FieldValue::new("img", ""))
        .unwrap();
    for (key, value) in &base {
        assert_eq!(&config[key], value, "base key {key} changed");
    }
    assert_eq!(config["useFormats"], json!(false));
}

#[test]
fn missing_upload_folder_omits_key() {
    let registry = registry();
    let widget = registry.create("ade-download-gallery", "").unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/shared/doc.html", &messages, &SiteFolders);
    let config = widget
        .dynamic_configuration(&Map::new(), &ctx, &FieldValue::new("file", ""))
        .unwrap();
    assert!(!config.contains_key("uploadFolder"));
}

#[test]
fn mismatched_format_names_fail_assembly() {
    let registry = registry();
    let widget = registry
        .create(
            "ade-image-gallery",
            r#"{"formats": ["1:1"], "formatnames": "Square|Wide"}"#,
        )
        .unwrap();
    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &SiteFolders);
    let err = widget
        .dynamic_configuration(&Map::new(), &ctx, &FieldValue::new("img", ""))
        .unwrap_err();
    assert!(matches!(err, WidgetError::Assembly { widget, .. } if widget == "ade-image-gallery"));
}

#[test]
fn unknown_view_class_leaves_registry_unchanged() {
    let mut registry = registry();
    registry.bind("people", "data-view", r#"{"viewClass": "people"}"#).unwrap();
    let before = registry.instance_for("people").unwrap();

    let err = registry
        .bind("people", "data-view", r#"{"viewClass":"not.a.Class"}"#)
        .unwrap_err();
    match err {
        WidgetError::Configuration { widget, cause } => {
            assert_eq!(widget, "data-view");
            assert!(matches!(cause, ConfigurationCause::UnknownViewClass(ref c) if c == "not.a.Class"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let after = registry.instance_for("people").unwrap();
    assert_eq!(after.configuration(), before.configuration());
    assert_eq!(after.data_view().unwrap().columns(), vec!["name", "mail"]);
}

#[test]
fn configured_copies_are_independent() {
    let registry = registry();
    let prototype = registry.prototype("radio-select").unwrap();
    let types = PluginRegistry::new();
    let first = prototype.configure("x*;y", &types).unwrap();
    let second = first.configure("p;q*", &types).unwrap();

    let messages = MessageBundle::new();
    let ctx = EditContext::new("/sites/a/index.html", &messages, &NoFolders);
    assert_eq!(first.options(&ctx).effective_default(), "x");
    assert_eq!(second.options(&ctx).effective_default(), "q");
    assert!(prototype.configuration().is_blank());
}

#[test]
fn every_widget_configures_independent_copies() {
    let registry = registry();
    for name in registry.names() {
        let (one, two) = if name == "data-view" {
            (
                r#"{"viewClass": "people", "configuration": {"page": 1}}"#.to_string(),
                r#"{"viewClass": "people", "configuration": {"page": 2}}"#.to_string(),
            )
        } else {
            (format!("{name}-one*;a"), format!("{name}-two;b*"))
        };
        let first = registry.create(name, one.as_str()).unwrap();
        let second = first.configure(two.as_str(), &*plugins()).unwrap();
        let third = registry.create(name, two.as_str()).unwrap();

        assert_eq!(first.configuration().raw(), one, "{name}");
        assert_eq!(second.configuration().raw(), two, "{name}");
        assert_eq!(third.configuration(), second.configuration(), "{name}");
        assert!(
            registry.prototype(name).unwrap().configuration().is_blank(),
            "{name} prototype changed"
        );
    }
}

#[test]
fn bound_fields_render_from_yaml() {
    let mut registry = registry();
    registry
        .bind_all(
            FieldBinding::load_yaml(
                r#"
- field: layout
  widget: select
  configuration: "%(layout.default)|Default;wide|Wide"
- field: people
  widget: data-view
  configuration: '{"viewClass": "people"}'
"#,
            )
            .unwrap(),
        )
        .unwrap();

    let messages = MessageBundle::new();
    let macros = MacroContext::new().with_value("layout.default", "narrow");
    let ctx = EditContext::new("/sites/a/index.html", &messages, &NoFolders).with_macros(&macros);
    let layout = registry.instance_for("layout").unwrap();
    let html = layout.render(&ctx, DialogContext::default(), &FieldValue::new("layout", ""));
    assert!(html.contains(r#"<option value="narrow" selected>Default</option>"#));

    let people = registry.instance_for("people").unwrap();
    let html = people.render(&ctx, DialogContext::default(), &FieldValue::new("people", ""));
    assert!(html.contains(r#"data-columns="name,mail""#));
}
