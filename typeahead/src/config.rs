//! Widget configuration: projectors, custom filter and presentation options.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter::{CustomFilter, FilterMode};
use crate::item::{TextField, TypeaheadItem, ValueField};

/// Plain options of a typeahead.
///
/// Deserializable so hosts can keep them in a settings file; every field
/// has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadOptions {
    /// Matching mode used when no custom filter is set.
    pub filter: FilterMode,
    /// Minimum search length (in characters) before the dropdown shows.
    pub min_length: usize,
    /// Allow the displayed text to differ from every item.
    pub free_typing: bool,
    /// Text shown when nothing matches. The not-found row only shows when set.
    pub not_found_text: Option<String>,
    /// Placeholder shown while the input is empty.
    pub placeholder: Option<String>,
    /// Maximum rows in the dropdown snapshot.
    pub max_visible_items: usize,
    /// Ignore all input.
    pub disabled: bool,
    /// Delay between losing focus and clearing unselected text.
    pub blur_grace_ms: u64,
}

impl Default for TypeaheadOptions {
    fn default() -> Self {
        Self {
            filter: FilterMode::StartsWith,
            min_length: 1,
            free_typing: false,
            not_found_text: None,
            placeholder: None,
            max_visible_items: 10,
            disabled: false,
            blur_grace_ms: 250,
        }
    }
}

impl TypeaheadOptions {
    /// Blur grace delay as a duration.
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }
}

/// Full configuration of a typeahead over items `T` with values `V`.
///
/// # Example
///
/// ```ignore
/// let config = TypeaheadConfig::new()
///     .text_field(|c: &Country| Some(c.name.clone()))
///     .value_field(|c: &Country| c.code.clone())
///     .filter(FilterMode::Contains)
///     .min_length(2)
///     .not_found("No country matches");
/// ```
pub struct TypeaheadConfig<T, V> {
    pub(crate) text_field: Option<TextField<T>>,
    pub(crate) value_field: Option<ValueField<T, V>>,
    pub(crate) custom_filter: Option<CustomFilter<T>>,
    pub(crate) options: TypeaheadOptions,
}

impl<T, V> Default for TypeaheadConfig<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> Clone for TypeaheadConfig<T, V> {
    fn clone(&self) -> Self {
        Self {
            text_field: self.text_field.clone(),
            value_field: self.value_field.clone(),
            custom_filter: self.custom_filter.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T, V> fmt::Debug for TypeaheadConfig<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeaheadConfig")
            .field("text_field", &self.text_field.is_some())
            .field("value_field", &self.value_field.is_some())
            .field("custom_filter", &self.custom_filter.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl<T, V> TypeaheadConfig<T, V> {
    /// Create a config with no projectors and default options.
    pub fn new() -> Self {
        Self {
            text_field: None,
            value_field: None,
            custom_filter: None,
            options: TypeaheadOptions::default(),
        }
    }

    /// Set the display-text projector.
    pub fn text_field(mut self, f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        self.text_field = Some(Arc::new(f));
        self
    }

    /// Set the value projector.
    pub fn value_field(mut self, f: impl Fn(&T) -> V + Send + Sync + 'static) -> Self {
        self.value_field = Some(Arc::new(f));
        self
    }

    /// Replace built-in matching with a custom predicate.
    pub fn custom_filter(mut self, f: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.custom_filter = Some(Arc::new(f));
        self
    }

    /// Replace all plain options at once.
    pub fn options(mut self, options: TypeaheadOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the filter mode.
    pub fn filter(mut self, mode: FilterMode) -> Self {
        self.options.filter = mode;
        self
    }

    /// Set the minimum search length.
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.options.min_length = min_length;
        self
    }

    /// Allow free typing.
    pub fn free_typing(mut self) -> Self {
        self.options.free_typing = true;
        self
    }

    /// Set the not-found text.
    pub fn not_found(mut self, text: impl Into<String>) -> Self {
        self.options.not_found_text = Some(text.into());
        self
    }

    /// Set the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = Some(placeholder.into());
        self
    }

    /// Set the maximum rows in the dropdown snapshot (at least one).
    pub fn max_visible_items(mut self, max: usize) -> Self {
        self.options.max_visible_items = max.max(1);
        self
    }

    /// Mark the widget as disabled.
    pub fn disabled(mut self) -> Self {
        self.options.disabled = true;
        self
    }

    /// Set the focus-out grace delay.
    pub fn blur_grace(mut self, grace: Duration) -> Self {
        self.options.blur_grace_ms = grace.as_millis() as u64;
        self
    }
}

impl<T> TypeaheadConfig<T, T::Value>
where
    T: TypeaheadItem + 'static,
{
    /// Config whose projectors come from the item's [`TypeaheadItem`] impl.
    pub fn for_items() -> Self {
        Self::new()
            .text_field(|item: &T| item.typeahead_text())
            .value_field(|item: &T| item.typeahead_value())
    }
}
