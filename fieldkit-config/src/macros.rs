//! Macro resolution for widget configuration strings
//!
//! Widget configurations may contain placeholders that are filled in from the
//! current editing request before the widget reads them.
//!
//! Supports patterns:
//! - `%(name)` - Replace with the context value, empty string if not set
//! - `%(name:-default)` - Replace with the context value, or default if not set
//!
//! Resolution runs until no placeholder is left, so resolving an already
//! resolved string again returns it unchanged.

use crate::{ConfigError, ConfigResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{trace, warn};

/// Regex pattern for macros
/// Matches: %(name) and %(name:-default value)
const MACRO_PATTERN: &str = r"%\(([A-Za-z_][A-Za-z0-9_.\-]*)(?::-([^)]*))?\)";

static MACRO_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(MACRO_PATTERN).expect("macro pattern is a valid regex"));

/// Resolves placeholder tokens in a configuration string.
///
/// Implementations are bound to one request; the widget core only calls them
/// synchronously and never caches their output across requests.
pub trait MacroResolver: Send + Sync {
    /// Replace every macro in `input`.
    fn resolve_macros(&self, input: &str) -> ConfigResult<String>;
}

/// Check whether a string contains any macro placeholder.
///
/// ```rust
/// use fieldkit_config::contains_macros;
///
/// assert!(contains_macros("%(site.root)/images"));
/// assert!(contains_macros("%(locale:-en)"));
/// assert!(!contains_macros("/sites/default/images"));
/// ```
pub fn contains_macros(s: &str) -> bool {
    MACRO_REGEX.is_match(s)
}

/// Resolve every string inside a JSON value in place.
pub fn resolve_value(resolver: &dyn MacroResolver, value: &mut Value) -> ConfigResult<()> {
    match value {
        Value::String(s) => {
            if contains_macros(s) {
                *s = resolver.resolve_macros(s)?;
            }
        }
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                resolve_value(resolver, item)?;
            }
        }
        Value::Object(obj) => {
            for (_, val) in obj.iter_mut() {
                resolve_value(resolver, val)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Request-scoped macro values.
///
/// In lenient mode (the default) unknown names without a default resolve to
/// the empty string. In strict mode they are an error.
#[derive(Debug, Clone, Default)]
pub struct MacroContext {
    values: HashMap<String, String>,
    strict_mode: bool,
}

impl MacroContext {
    /// Upper bound on nested expansion passes.
    const MAX_PASSES: usize = 8;

    /// Create an empty lenient context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty strict context
    pub fn strict() -> Self {
        Self {
            values: HashMap::new(),
            strict_mode: true,
        }
    }

    /// Add a value, builder style
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a value by macro name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether missing macros are errors
    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }

    /// One substitution pass over `s`.
    fn substitute_once(&self, s: &str) -> ConfigResult<String> {
        if self.strict_mode {
            for caps in MACRO_REGEX.captures_iter(s) {
                let name = &caps[1];
                if !self.values.contains_key(name) && caps.get(2).is_none() {
                    return Err(ConfigError::unresolved(name));
                }
            }
        }

        let result = MACRO_REGEX
            .replace_all(s, |caps: &regex::Captures| {
                let name = &caps[1];
                match self.values.get(name) {
                    Some(value) => {
                        trace!(name, value = %value, "macro substitution");
                        value.clone()
                    }
                    None => caps
                        .get(2)
                        .map(|default| default.as_str().to_string())
                        .unwrap_or_default(),
                }
            })
            .into_owned();

        Ok(result)
    }
}

impl MacroResolver for MacroContext {
    fn resolve_macros(&self, input: &str) -> ConfigResult<String> {
        let mut current = input.to_string();
        for _ in 0..Self::MAX_PASSES {
            if !contains_macros(&current) {
                return Ok(current);
            }
            current = self.substitute_once(&current)?;
        }

        if !contains_macros(&current) {
            return Ok(current);
        }
        if self.strict_mode {
            return Err(ConfigError::MacroRecursion {
                input: input.to_string(),
            });
        }

        warn!(input, "macro expansion did not settle, dropping remaining macros");
        // Each pass strictly shortens the string.
        while contains_macros(&current) {
            current = MACRO_REGEX.replace_all(&current, "").into_owned();
        }
        Ok(current)
    }
}
