//! Error types.

/// Failure reported by a host notification sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    /// Creates a handler error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors surfaced by widget event methods.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeaheadError {
    /// A host notification sink failed; later notifications of the same
    /// event were not sent.
    #[error("{handler} handler failed: {source}")]
    Handler {
        handler: &'static str,
        #[source]
        source: HandlerError,
    },
}

impl TypeaheadError {
    /// Creates a handler error for the named sink.
    pub fn handler(handler: &'static str, source: HandlerError) -> Self {
        Self::Handler { handler, source }
    }
}
