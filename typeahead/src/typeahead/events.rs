//! Event handling for the Typeahead widget.

use crate::error::TypeaheadError;
use crate::events::{EventResult, InputEvent};
use crate::keys::{Key, KeyCombo};

use super::Typeahead;

impl<T, V> Typeahead<T, V>
where
    T: Send + Sync + 'static,
    V: Clone + PartialEq + Send + Sync + 'static,
{
    /// Dispatch one input event to its handler.
    pub async fn handle_event(&self, event: InputEvent<V>) -> Result<EventResult, TypeaheadError> {
        if self.read(|inner| inner.config.options.disabled) {
            return Ok(EventResult::Ignored);
        }
        match event {
            InputEvent::TextChanged(text) => self.on_text_changed(text).await,
            InputEvent::Key(key) => self.on_key(key).await,
            InputEvent::FocusIn => Ok(self.on_focus_in()),
            InputEvent::FocusOut => self.on_focus_out().await,
            InputEvent::ItemActivated(value) => self.select_value(value).await,
        }
    }

    /// The user typed: the text becomes both the search and the shown text.
    ///
    /// Emptying the input clears the selection.
    pub async fn on_text_changed(
        &self,
        text: impl Into<String>,
    ) -> Result<EventResult, TypeaheadError> {
        let text = text.into();
        let (cleared, not_found) = self.write(|inner| {
            inner.current_search = text.clone();
            inner.selected_text = text.clone();
            inner.filtered.invalidate();

            let cleared = text.is_empty();
            if cleared {
                inner.clear_selection();
            }
            (cleared, inner.filtered_count() == 0)
        });

        log::debug!(
            "Typeahead {} text changed text={:?} cleared={} not_found={}",
            self.id,
            text,
            cleared,
            not_found
        );

        if cleared {
            self.emit_value_changed(None).await?;
        }
        self.emit_search_changed(text.clone()).await?;
        self.emit_text_changed(text.clone()).await?;
        if not_found {
            self.emit_not_found(text).await?;
        }
        Ok(EventResult::Consumed)
    }

    /// Handle a key press.
    pub async fn on_key(&self, key: KeyCombo) -> Result<EventResult, TypeaheadError> {
        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.ctrl || key.modifiers.alt {
            return Ok(EventResult::Ignored);
        }

        match key.key {
            Key::Enter | Key::Tab => self.commit_active().await,
            Key::Escape => self.clear().await,
            Key::Up => self.move_active(-1).await,
            Key::Down => self.move_active(1).await,
            Key::Char(_) | Key::Other => Ok(EventResult::Ignored),
        }
    }

    /// The input gained focus.
    pub fn on_focus_in(&self) -> EventResult {
        self.write(|inner| {
            inner.focused = true;
            inner.focus_epoch += 1;
        });
        EventResult::Consumed
    }

    /// The input lost focus.
    ///
    /// The widget stays focused (and the dropdown open) for the blur grace
    /// delay so a dropdown click that caused the blur can commit its
    /// selection. Then, unless free typing is on or something got selected,
    /// both the shown text and the search are cleared. A focus-in during the
    /// delay cancels the blur.
    pub async fn on_focus_out(&self) -> Result<EventResult, TypeaheadError> {
        let (grace, epoch) = self.read(|inner| {
            (inner.config.options.blur_grace(), inner.focus_epoch)
        });
        tokio::time::sleep(grace).await;

        let cleared = self.write(|inner| {
            if inner.focus_epoch != epoch {
                return false;
            }
            inner.focused = false;
            if inner.config.options.free_typing || inner.selected_value.is_some() {
                return false;
            }
            if inner.selected_text.is_empty() && inner.current_search.is_empty() {
                return false;
            }
            inner.selected_text.clear();
            inner.current_search.clear();
            inner.filtered.invalidate();
            true
        });
        if !cleared {
            return Ok(EventResult::Consumed);
        }

        log::debug!("Typeahead {} cleared unselected text on blur", self.id);
        self.emit_search_changed(String::new()).await?;
        self.emit_text_changed(String::new()).await?;
        Ok(EventResult::Consumed)
    }

    /// Clear selection, shown text and search.
    pub async fn clear(&self) -> Result<EventResult, TypeaheadError> {
        self.write(|inner| inner.clear_selection());
        log::debug!("Typeahead {} cleared", self.id);

        self.emit_value_changed(None).await?;
        self.emit_search_changed(String::new()).await?;
        self.emit_text_changed(String::new()).await?;
        Ok(EventResult::Consumed)
    }

    /// Select the item whose value equals `value`.
    ///
    /// This is what a dropdown click does. The search is cleared and the
    /// shown text becomes the item's text. Values matching no item, or a
    /// missing value projector, leave the state untouched.
    pub async fn select_value(&self, value: V) -> Result<EventResult, TypeaheadError> {
        let committed = self.write(|inner| {
            let (value, text) = inner.resolve(&value)?;
            inner.current_search.clear();
            inner.filtered.invalidate();
            inner.selected_text = text.clone();
            inner.selected_value = Some(value.clone());
            inner.bound_value = Some(value.clone());
            inner.reconcile_pending = false;
            Some((value, text, inner.input.clone()))
        });
        let Some((value, text, input)) = committed else {
            log::debug!("Typeahead {} activation matched no item", self.id);
            return Ok(EventResult::Ignored);
        };

        log::debug!("Typeahead {} selected text={:?}", self.id, text);
        self.emit_value_changed(Some(value)).await?;
        self.emit_search_changed(String::new()).await?;
        self.emit_text_changed(text).await?;
        if let Some(input) = input {
            input.revalidate();
        }
        Ok(EventResult::Consumed)
    }

    /// Select the filtered row at `row` (an index into the filtered list).
    pub async fn activate_row(&self, row: usize) -> Result<EventResult, TypeaheadError> {
        let value = self.write(|inner| {
            inner.refresh_filter();
            let index = *inner.filtered.indices().get(row)?;
            let item = inner.items().get(index)?;
            inner.value_of(item)
        });
        match value {
            Some(value) => self.select_value(value).await,
            None => Ok(EventResult::Ignored),
        }
    }

    /// Commit the highlighted row if the dropdown is showing.
    async fn commit_active(&self) -> Result<EventResult, TypeaheadError> {
        let value = self.write(|inner| {
            if !inner.dropdown_visible() {
                return None;
            }
            let index = inner.active_source_index()?;
            let item = inner.items().get(index)?;
            inner.value_of(item)
        });
        match value {
            Some(value) => self.select_value(value).await,
            None => Ok(EventResult::Ignored),
        }
    }

    /// Move the highlight by `delta` rows, clamped to the filtered list, and
    /// preview the highlighted item's text in the input.
    async fn move_active(&self, delta: isize) -> Result<EventResult, TypeaheadError> {
        let preview = self.write(|inner| {
            let count = inner.filtered_count();
            if count == 0 {
                return None;
            }
            let next = inner
                .active_index
                .saturating_add_signed(delta)
                .min(count - 1);
            inner.active_index = next;
            let index = inner.filtered.indices()[next];
            let text = inner.text_of(&inner.items()[index]);
            inner.selected_text = text.clone();
            Some(text)
        });
        let Some(text) = preview else {
            return Ok(EventResult::Ignored);
        };

        self.emit_text_changed(text).await?;
        Ok(EventResult::Consumed)
    }
}
