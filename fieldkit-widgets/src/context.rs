//! Collaborators a widget talks to while rendering or reading a form.
//!
//! None of these are implemented by the widget core. The hosting editor
//! supplies them per request through [`EditContext`].

use fieldkit_config::MacroResolver;
use std::collections::HashMap;

use crate::options::OptionList;

/// Submitted form fields, keyed by input name.
pub type FormFields = HashMap<String, Vec<String>>;

/// Localized message lookup.
pub trait Messages: Send + Sync {
    /// The message for `key`, if the bundle has one.
    fn key(&self, key: &str) -> Option<String>;

    /// The message for `key`, or `default` when missing.
    fn key_or(&self, key: &str, default: &str) -> String {
        self.key(key).unwrap_or_else(|| default.to_string())
    }
}

/// A plain in-memory message bundle.
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message, builder style
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }
}

impl Messages for MessageBundle {
    fn key(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}

/// Repository lookups used by gallery widgets.
pub trait RepositoryFolders: Send + Sync {
    /// The configured folder of `folder_type` (for example `imagegallery`)
    /// for the resource at `resource_path`, if any.
    fn lookup_folder(&self, resource_path: &str, folder_type: &str) -> Option<String>;
}

/// A repository without any configured folders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFolders;

impl RepositoryFolders for NoFolders {
    fn lookup_folder(&self, _resource_path: &str, _folder_type: &str) -> Option<String> {
        None
    }
}

/// System-provided option lists (resource types, element views, display types).
pub trait OptionProvider: Send + Sync {
    /// The options of the named list, if the provider knows it.
    fn options(&self, list: &str) -> Option<OptionList>;
}

/// The field value a widget edits.
pub trait WidgetParameter {
    /// Form input name
    fn id(&self) -> &str;

    /// Field name in the schema
    fn name(&self) -> &str;

    /// Current value
    fn string_value(&self) -> &str;

    /// Replace the current value
    fn set_string_value(&mut self, value: String);
}

/// A simple owned [`WidgetParameter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    id: String,
    name: String,
    value: String,
}

impl FieldValue {
    /// A field whose input name is its schema name
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            value: value.into(),
        }
    }

    /// Use a distinct form input name
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl WidgetParameter for FieldValue {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn string_value(&self) -> &str {
        &self.value
    }

    fn set_string_value(&mut self, value: String) {
        self.value = value;
    }
}

/// Per-request collaborators.
#[derive(Clone, Copy)]
pub struct EditContext<'a> {
    /// Path of the resource being edited
    pub resource_path: &'a str,
    pub messages: &'a dyn Messages,
    pub repository: &'a dyn RepositoryFolders,
    pub macros: Option<&'a dyn MacroResolver>,
    pub provider: Option<&'a dyn OptionProvider>,
}

impl<'a> EditContext<'a> {
    pub fn new(
        resource_path: &'a str,
        messages: &'a dyn Messages,
        repository: &'a dyn RepositoryFolders,
    ) -> Self {
        Self {
            resource_path,
            messages,
            repository,
            macros: None,
            provider: None,
        }
    }

    /// Resolve configuration macros with `macros`
    pub fn with_macros(mut self, macros: &'a dyn MacroResolver) -> Self {
        self.macros = Some(macros);
        self
    }

    /// Supply system option lists
    pub fn with_provider(mut self, provider: &'a dyn OptionProvider) -> Self {
        self.provider = Some(provider);
        self
    }
}

/// Flags of the dialog hosting the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogContext {
    pub read_only: bool,
    pub show_help: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_bundle_fallback() {
        let messages = MessageBundle::new().with("gallery.open", "Open gallery");
        assert_eq!(messages.key("gallery.open").as_deref(), Some("Open gallery"));
        assert_eq!(messages.key_or("missing", "Fallback"), "Fallback");
    }

    #[test]
    fn field_value_ids() {
        let mut field = FieldValue::new("title", "Hello").with_id("title.0");
        assert_eq!(field.id(), "title.0");
        assert_eq!(field.name(), "title");
        field.set_string_value("Bye".into());
        assert_eq!(field.string_value(), "Bye");
    }
}
