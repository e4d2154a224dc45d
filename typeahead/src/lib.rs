//! Searchable dropdown (typeahead) widget.
//!
//! Binds a text input to a filtered list of in-memory items, tracks the
//! keyboard highlight and the selection, and reports changes to the host
//! through async notification sinks. Drawing, parameter binding and focus
//! are left to the host framework, which talks to the widget through
//! [`InputEvent`]s, [`Parameters`] and the [`TypeaheadView`] snapshot.

pub mod config;
pub mod error;
pub mod events;
pub mod filter;
pub mod handlers;
pub mod item;
pub mod keys;
pub mod typeahead;

pub use config::{TypeaheadConfig, TypeaheadOptions};
pub use error::{HandlerError, TypeaheadError};
pub use events::{EventResult, InputEvent};
pub use filter::{FilterMode, filter_indices, filter_items};
pub use handlers::{ChannelHandlers, InputElement, NoopHandlers, Notification, TypeaheadHandlers};
pub use item::TypeaheadItem;
pub use keys::{Key, KeyCombo, Modifiers};
pub use typeahead::{Parameters, RowView, Typeahead, TypeaheadId, TypeaheadView};

pub mod prelude {
    pub use crate::config::{TypeaheadConfig, TypeaheadOptions};
    pub use crate::error::{HandlerError, TypeaheadError};
    pub use crate::events::{EventResult, InputEvent};
    pub use crate::filter::FilterMode;
    pub use crate::handlers::{InputElement, Notification, TypeaheadHandlers};
    pub use crate::item::TypeaheadItem;
    pub use crate::keys::{Key, KeyCombo};
    pub use crate::typeahead::{Parameters, Typeahead, TypeaheadView};
}
