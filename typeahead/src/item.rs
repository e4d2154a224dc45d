//! Item projections: how the widget reads a display text and a value out of
//! an application record.

use std::sync::Arc;

/// Projects an item to its display text. `None` is treated as empty.
pub type TextField<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Projects an item to its comparable value.
pub type ValueField<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;

/// Trait for records that know their own display text and value.
///
/// Implementing it lets [`TypeaheadConfig::for_items`](crate::TypeaheadConfig::for_items)
/// wire both projectors at once instead of passing closures.
///
/// # Example
///
/// ```ignore
/// struct Country {
///     code: String,
///     name: String,
/// }
///
/// impl TypeaheadItem for Country {
///     type Value = String;
///
///     fn typeahead_value(&self) -> String {
///         self.code.clone()
///     }
///
///     fn typeahead_text(&self) -> Option<String> {
///         Some(self.name.clone())
///     }
/// }
/// ```
pub trait TypeaheadItem {
    /// The value stored as the selection.
    type Value: Clone + PartialEq + Send + Sync + 'static;

    /// Value identifying this item.
    fn typeahead_value(&self) -> Self::Value;

    /// Display text shown in the dropdown and matched against the search.
    fn typeahead_text(&self) -> Option<String>;
}

impl TypeaheadItem for String {
    type Value = String;

    fn typeahead_value(&self) -> String {
        self.clone()
    }

    fn typeahead_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl TypeaheadItem for &'static str {
    type Value = String;

    fn typeahead_value(&self) -> String {
        (*self).to_string()
    }

    fn typeahead_text(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

// (value, label) pairs
impl<V, S> TypeaheadItem for (V, S)
where
    V: Clone + PartialEq + Send + Sync + 'static,
    S: AsRef<str>,
{
    type Value = V;

    fn typeahead_value(&self) -> V {
        self.0.clone()
    }

    fn typeahead_text(&self) -> Option<String> {
        Some(self.1.as_ref().to_string())
    }
}
