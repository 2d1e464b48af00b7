//! Widget configuration handling for fieldkit
//!
//! Every widget instance owns one [`WidgetConfiguration`]: the string a schema
//! bound to the field, either an option list or a JSON object. This crate
//! stores that string and resolves request macros in it.
//!
//! # Features
//!
//! - **Immutable store**: configurations never change after binding; the JSON
//!   view is computed once per instance
//! - **Macro resolution**: `%(name)` and `%(name:-default)` placeholders,
//!   lenient or strict
//! - **Pluggable resolvers**: anything implementing [`MacroResolver`] can stand
//!   in for [`MacroContext`]
//!
//! ```rust
//! use fieldkit_config::{MacroContext, WidgetConfiguration};
//!
//! let config = WidgetConfiguration::new(r#"{"startup": "%(site.root)/.galleries/"}"#);
//! let ctx = MacroContext::new().with_value("site.root", "/sites/a");
//!
//! let resolved = config.resolved(Some(&ctx))?;
//! assert_eq!(resolved, r#"{"startup": "/sites/a/.galleries/"}"#);
//! # Ok::<(), fieldkit_config::ConfigError>(())
//! ```

pub mod error;
pub mod macros;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use macros::{contains_macros, resolve_value, MacroContext, MacroResolver};
pub use store::WidgetConfiguration;
