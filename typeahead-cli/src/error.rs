//! CLI error type.

use std::path::PathBuf;

use typeahead::TypeaheadError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to set up logging: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("invalid argument for '{command}': {message}")]
    InvalidArgument {
        command: &'static str,
        message: String,
    },

    #[error(transparent)]
    Typeahead(#[from] TypeaheadError),
}
