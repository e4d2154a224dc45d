//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use typeahead::{FilterMode, TypeaheadOptions};

#[derive(Parser, Debug)]
#[command(
    name = "typeahead",
    version,
    about = "Drive a typeahead over a JSON item list with line commands read from stdin"
)]
pub struct CliArgs {
    /// JSON array of items: strings or `{ "value", "text" }` objects.
    #[arg(long, value_name = "FILE")]
    pub items: PathBuf,

    /// JSON file with typeahead options. Flags below override it.
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Characters needed before the dropdown opens.
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Keep unmatched text when focus leaves the input.
    #[arg(long)]
    pub free_typing: bool,

    /// Text shown when nothing matches.
    #[arg(long, value_name = "TEXT")]
    pub not_found: Option<String>,

    #[arg(long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Defaults to typeahead.log in the user cache directory.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    StartsWith,
    Contains,
    Fuzzy,
}

impl From<FilterArg> for FilterMode {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::StartsWith => FilterMode::StartsWith,
            FilterArg::Contains => FilterMode::Contains,
            FilterArg::Fuzzy => FilterMode::Fuzzy,
        }
    }
}

impl CliArgs {
    /// Layer the flags that were given over `options`.
    pub fn apply_overrides(&self, mut options: TypeaheadOptions) -> TypeaheadOptions {
        if let Some(filter) = self.filter {
            options.filter = filter.into();
        }
        if let Some(min_length) = self.min_length {
            options.min_length = min_length;
        }
        if self.free_typing {
            options.free_typing = true;
        }
        if let Some(not_found) = &self.not_found {
            options.not_found_text = Some(not_found.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            options.placeholder = Some(placeholder.clone());
        }
        options
    }
}
