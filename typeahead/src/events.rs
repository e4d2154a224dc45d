//! Input events dispatched to the widget and the result of handling them.

use crate::keys::KeyCombo;

/// An input event coming from the host's text element or dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<V> {
    /// The text in the input changed to the given value.
    TextChanged(String),
    /// A key was pressed while the input had focus.
    Key(KeyCombo),
    /// The input gained focus.
    FocusIn,
    /// The input lost focus.
    FocusOut,
    /// A dropdown row was clicked; carries the row's value.
    ItemActivated(V),
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, the host may handle it (e.g. Tab moves focus).
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
