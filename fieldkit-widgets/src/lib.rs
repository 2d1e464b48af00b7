//! Widget registry and configuration engine for content editing forms.
//!
//! `fieldkit-widgets` decides which editing control a field gets and what that
//! control needs to know. It does not store content and does not talk to a
//! repository itself; the hosting editor passes its collaborators in through
//! [`EditContext`].
//!
//! # Architecture
//!
//! - **Option grammar**: select-style widgets read `value|label;value*|label`
//!   strings with [`parse_options`]
//! - **Prototypes**: one immutable [`Widget`] per kind, registered by stable
//!   kebab-case name in a [`WidgetRegistry`]
//! - **Configured copies**: rendering always works on a copy from
//!   [`Widget::configure`], never on the prototype
//! - **Variants by composition**: each kind picks option, preview, gallery and
//!   contributor strategies instead of overriding methods
//! - **Client configuration**: gallery widgets assemble the JSON object the
//!   rich client editor reads, see [`assemble`]
//!
//! ```rust
//! use fieldkit_widgets::{EditContext, FieldValue, MessageBundle, NoFolders, WidgetRegistry};
//!
//! let registry = WidgetRegistry::with_builtins();
//! let widget = registry.create("select", "a|Apple;b*|Banana").unwrap();
//!
//! let messages = MessageBundle::new();
//! let ctx = EditContext::new("/sites/default/index.html", &messages, &NoFolders);
//! let field = FieldValue::new("fruit", "z");
//! assert_eq!(widget.selected_value(&ctx, &field), "b");
//! ```

pub mod bindings;
pub mod context;
pub mod dataview;
pub mod error;
pub mod gallery;
pub mod options;
pub mod render;
pub mod registry;
pub mod strategy;
pub mod types;
pub mod variants;
pub mod widget;

pub use bindings::FieldBinding;
pub use context::{
    DialogContext, EditContext, FieldValue, FormFields, MessageBundle, Messages, NoFolders,
    OptionProvider, RepositoryFolders, WidgetParameter,
};
pub use dataview::{DataView, DataViewFactory, PluginCapability, PluginRegistry, ViewTypeRegistry};
pub use error::{ConfigurationCause, Result, WidgetError};
pub use gallery::{assemble, merge_first_writer_wins, GalleryConfiguration};
pub use options::{parse_options, serialize_options, OptionList, SelectOption};
pub use registry::WidgetRegistry;
pub use types::{
    AdeGalleryKind, Capability, ComplexKind, GalleryKind, WidgetDescriptor, WidgetKind,
};
pub use widget::Widget;

pub use fieldkit_config::{MacroContext, MacroResolver, WidgetConfiguration};
