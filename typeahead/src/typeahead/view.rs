//! Derived visibility and the render snapshot handed to the host.

use super::Typeahead;

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index into the filtered list (what `activate_row` takes).
    pub index: usize,
    pub text: String,
    /// Whether this row is the keyboard highlight.
    pub active: bool,
}

/// Everything a host needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeaheadView {
    pub id: String,
    /// Text in the input.
    pub text: String,
    pub placeholder: Option<String>,
    pub disabled: bool,
    /// See [`Typeahead::dropdown_visible`].
    pub dropdown_visible: bool,
    /// See [`Typeahead::can_search`].
    pub can_search: bool,
    /// Rows to draw; empty unless both flags above are set. Windowed to
    /// `max_visible_items` so the highlight stays in view.
    pub rows: Vec<RowView>,
    /// Not-found text, present when the not-found row should show.
    pub not_found: Option<String>,
}

impl TypeaheadView {
    /// Whether the host should draw the dropdown.
    pub fn is_open(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl<T, V> Typeahead<T, V>
where
    T: Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Search text is long enough to search.
    pub fn searchable(&self) -> bool {
        self.read(|inner| inner.searchable())
    }

    /// Dropdown may show: a display-text projector is set and the search is
    /// long enough. Does not look at focus or candidates, unlike
    /// [`can_search`](Self::can_search).
    pub fn dropdown_visible(&self) -> bool {
        self.read(|inner| inner.dropdown_visible())
    }

    /// There are candidates, the search is long enough and the input is
    /// focused.
    pub fn can_search(&self) -> bool {
        self.write(|inner| inner.can_search())
    }

    /// Nothing matches, the search is long enough, the input is focused and
    /// a not-found text is configured.
    pub fn not_found_visible(&self) -> bool {
        self.write(|inner| inner.not_found_visible())
    }

    /// Number of filtered candidates.
    pub fn filtered_count(&self) -> usize {
        self.write(|inner| inner.filtered_count())
    }

    /// Display texts of the filtered candidates, in order.
    pub fn filtered_texts(&self) -> Vec<String> {
        self.write(|inner| {
            inner.refresh_filter();
            let items = inner.items();
            inner
                .filtered
                .indices()
                .iter()
                .map(|&index| inner.text_of(&items[index]))
                .collect()
        })
    }

    /// Values of the filtered candidates, in order. Empty without a value
    /// projector.
    pub fn filtered_values(&self) -> Vec<V> {
        self.write(|inner| {
            inner.refresh_filter();
            let items = inner.items();
            inner
                .filtered
                .indices()
                .iter()
                .filter_map(|&index| inner.value_of(&items[index]))
                .collect()
        })
    }

    /// Highlighted row, `None` while there are no candidates.
    pub fn active_index(&self) -> Option<usize> {
        self.write(|inner| {
            inner.refresh_filter();
            (!inner.filtered.is_empty()).then_some(inner.active_index)
        })
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> TypeaheadView {
        self.write(|inner| {
            let dropdown_visible = inner.dropdown_visible();
            let can_search = inner.can_search();
            let not_found = if inner.not_found_visible() {
                inner.config.options.not_found_text.clone()
            } else {
                None
            };

            let mut rows = Vec::new();
            if dropdown_visible && can_search {
                let max = inner.config.options.max_visible_items.max(1);
                let count = inner.filtered.len();
                let start = (inner.active_index + 1).saturating_sub(max);
                let end = (start + max).min(count);
                let items = inner.items();
                rows = (start..end)
                    .map(|row| RowView {
                        index: row,
                        text: inner.text_of(&items[inner.filtered.indices()[row]]),
                        active: row == inner.active_index,
                    })
                    .collect();
            }

            TypeaheadView {
                id: self.id.to_string(),
                text: inner.selected_text.clone(),
                placeholder: inner.config.options.placeholder.clone(),
                disabled: inner.config.options.disabled,
                dropdown_visible,
                can_search,
                rows,
                not_found,
            }
        })
    }
}
