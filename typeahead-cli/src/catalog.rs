//! Items and options loaded from JSON files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use typeahead::{TypeaheadItem, TypeaheadOptions};

use crate::error::CliError;

/// One selectable entry. A bare string is both value and label; an object
/// without `text` has no label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub value: String,
    pub text: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Plain(String),
    Full {
        value: String,
        #[serde(default)]
        text: Option<String>,
    },
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Plain(value) => Entry {
                text: Some(value.clone()),
                value,
            },
            RawEntry::Full { value, text } => Entry { value, text },
        }
    }
}

impl TypeaheadItem for Entry {
    type Value = String;

    fn typeahead_value(&self) -> String {
        self.value.clone()
    }

    fn typeahead_text(&self) -> Option<String> {
        self.text.clone()
    }
}

/// Parse entries from JSON text: an array of strings and/or
/// `{ "value": .., "text": .. }` objects.
pub fn parse_entries(json: &str) -> Result<Vec<Entry>, serde_json::Error> {
    let raw: Vec<RawEntry> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(Entry::from).collect())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid_json(path: &Path) -> impl FnOnce(serde_json::Error) -> CliError + '_ {
    move |source| CliError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Load entries from a JSON file.
pub fn load_entries(path: &Path) -> Result<Vec<Entry>, CliError> {
    let entries = parse_entries(&read(path)?).map_err(invalid_json(path))?;
    log::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load typeahead options from a JSON file.
pub fn load_options(path: &Path) -> Result<TypeaheadOptions, CliError> {
    serde_json::from_str(&read(path)?).map_err(invalid_json(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_entries() {
        let entries = parse_entries(
            r#"["Apple", { "value": "b", "text": "Banana" }, { "value": "x", "text": null }]"#,
        )
        .unwrap();

        assert_eq!(
            entries,
            vec![
                Entry {
                    value: "Apple".into(),
                    text: Some("Apple".into())
                },
                Entry {
                    value: "b".into(),
                    text: Some("Banana".into())
                },
                Entry {
                    value: "x".into(),
                    text: None
                },
            ]
        );
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_entries(r#"{ "value": "a" }"#).is_err());
    }
}
