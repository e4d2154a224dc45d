//! Host-facing seams: notification sinks and the bound input element.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::HandlerError;

/// Notification sinks the host supplies to observe the widget.
///
/// Every method has a no-op default, so hosts implement only what they
/// listen to. Notifications for a single event are awaited one after the
/// other in a fixed order: value, search, text, not-found.
///
/// # Example
///
/// ```ignore
/// struct Form;
///
/// #[async_trait]
/// impl TypeaheadHandlers<u32> for Form {
///     async fn on_value_changed(&self, value: Option<u32>) -> Result<(), HandlerError> {
///         log::info!("picked {:?}", value);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait TypeaheadHandlers<V>: Send + Sync
where
    V: Send + Sync + 'static,
{
    /// The selected value changed. `None` means the selection was cleared.
    async fn on_value_changed(&self, _value: Option<V>) -> Result<(), HandlerError> {
        Ok(())
    }

    /// The text shown in the input changed.
    async fn on_text_changed(&self, _text: String) -> Result<(), HandlerError> {
        Ok(())
    }

    /// The search text used for filtering changed.
    async fn on_search_changed(&self, _search: String) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Typing produced no candidates.
    async fn on_not_found(&self, _search: String) -> Result<(), HandlerError> {
        Ok(())
    }
}

/// Handlers that ignore every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandlers;

impl<V: Send + Sync + 'static> TypeaheadHandlers<V> for NoopHandlers {}

/// A notification as delivered through [`ChannelHandlers`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<V> {
    ValueChanged(Option<V>),
    TextChanged(String),
    SearchChanged(String),
    NotFound(String),
}

/// Forwards every notification into an unbounded channel.
///
/// Useful for hosts that drain widget output from their own event loop,
/// and for asserting notification order in tests.
#[derive(Debug)]
pub struct ChannelHandlers<V> {
    tx: mpsc::UnboundedSender<Notification<V>>,
}

impl<V> ChannelHandlers<V> {
    /// Create the sink together with the receiving end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification<V>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, notification: Notification<V>) -> Result<(), HandlerError> {
        self.tx
            .send(notification)
            .map_err(|_| HandlerError::new("notification receiver dropped"))
    }
}

#[async_trait]
impl<V: Send + Sync + 'static> TypeaheadHandlers<V> for ChannelHandlers<V> {
    async fn on_value_changed(&self, value: Option<V>) -> Result<(), HandlerError> {
        self.send(Notification::ValueChanged(value))
    }

    async fn on_text_changed(&self, text: String) -> Result<(), HandlerError> {
        self.send(Notification::TextChanged(text))
    }

    async fn on_search_changed(&self, search: String) -> Result<(), HandlerError> {
        self.send(Notification::SearchChanged(search))
    }

    async fn on_not_found(&self, search: String) -> Result<(), HandlerError> {
        self.send(Notification::NotFound(search))
    }
}

/// The text input element the widget is bound to.
///
/// Opaque capability owned by the host framework.
#[async_trait]
pub trait InputElement: Send + Sync {
    /// Move keyboard focus to the input.
    async fn focus(&self, scroll_into_view: bool);

    /// Ask the host to re-run validation for the bound field.
    fn revalidate(&self);
}
