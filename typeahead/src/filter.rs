//! Candidate filtering and the lazily refreshed filter cache.

use std::sync::Arc;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};

use crate::item::TextField;

/// Host-supplied predicate that replaces the built-in matching entirely.
pub type CustomFilter<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// How the search text is matched against an item's display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Display text starts with the search text (ordinal, ignoring case).
    #[default]
    StartsWith,
    /// Display text contains the search text anywhere (ignoring case).
    Contains,
    /// Fuzzy subsequence match via nucleo-matcher.
    Fuzzy,
}

/// Uppercase `c` when its uppercase form is a single character, otherwise
/// leave it as is (`ß` stays `ß`).
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Ordinal case-insensitive prefix test.
///
/// Characters are compared one to one after simple uppercase mapping, so no
/// expansion or locale-dependent folding takes place.
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut haystack = text.chars().map(simple_uppercase);
    prefix
        .chars()
        .map(simple_uppercase)
        .all(|c| haystack.next() == Some(c))
}

/// Case-insensitive substring test using full Unicode lowercasing.
pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    text.to_lowercase().contains(&needle.to_lowercase())
}

/// Matches display texts against a search string under one filter mode.
///
/// Fuzzy mode keeps a nucleo matcher and a parsed pattern around so a whole
/// list can be filtered without reallocating per item.
struct TextMatcher<'a> {
    search: &'a str,
    mode: FilterMode,
    fuzzy: Option<(Matcher, Pattern)>,
    buf: Vec<char>,
}

impl<'a> TextMatcher<'a> {
    fn new(search: &'a str, mode: FilterMode) -> Self {
        let fuzzy = (mode == FilterMode::Fuzzy && !search.is_empty()).then(|| {
            let pattern = Pattern::new(
                search,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
            );
            (Matcher::new(Config::DEFAULT), pattern)
        });
        Self {
            search,
            mode,
            fuzzy,
            buf: Vec::new(),
        }
    }

    fn matches(&mut self, text: &str) -> bool {
        match self.mode {
            FilterMode::StartsWith => starts_with_ignore_case(text, self.search),
            FilterMode::Contains => contains_ignore_case(text, self.search),
            FilterMode::Fuzzy => match self.fuzzy.as_mut() {
                Some((matcher, pattern)) => {
                    let haystack = Utf32Str::new(text, &mut self.buf);
                    pattern.score(haystack, matcher).is_some()
                }
                // Empty query matches everything
                None => true,
            },
        }
    }
}

/// Filter `data` against `search`, returning indices of the kept items in
/// source order.
///
/// A custom predicate, when present, is used exclusively and `mode` is
/// ignored. Without a custom predicate and without a display-text projector
/// nothing matches.
pub fn filter_indices<T>(
    data: &[T],
    search: &str,
    mode: FilterMode,
    text_field: Option<&TextField<T>>,
    custom: Option<&CustomFilter<T>>,
) -> Vec<usize> {
    if let Some(custom) = custom {
        return data
            .iter()
            .enumerate()
            .filter(|&(_, item)| custom(item, search))
            .map(|(index, _)| index)
            .collect();
    }

    let Some(text_field) = text_field else {
        return Vec::new();
    };

    let mut matcher = TextMatcher::new(search, mode);
    data.iter()
        .enumerate()
        .filter(|&(_, item)| {
            let text = text_field(item).unwrap_or_default();
            matcher.matches(&text)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Like [`filter_indices`] but returns references to the kept items.
pub fn filter_items<'a, T>(
    data: &'a [T],
    search: &str,
    mode: FilterMode,
    text_field: Option<&TextField<T>>,
    custom: Option<&CustomFilter<T>>,
) -> Vec<&'a T> {
    filter_indices(data, search, mode, text_field, custom)
        .into_iter()
        .map(|index| &data[index])
        .collect()
}

/// Everything a filter result depends on.
///
/// `data_version` is bumped whenever a different source list is applied,
/// even one with equal contents. `generation` is bumped whenever projectors
/// or the custom predicate are replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilterKey {
    pub data_version: u64,
    pub search: String,
    pub mode: FilterMode,
    pub generation: u64,
}

/// Memoized filter output.
///
/// Holds the key of the last computation; reads go through
/// [`FilterCache::is_stale`] and the owner refreshes when it reports true.
#[derive(Debug, Default)]
pub(crate) struct FilterCache {
    key: Option<FilterKey>,
    indices: Vec<usize>,
}

impl FilterCache {
    /// Drop the remembered key so the next read recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn is_stale(&self, key: &FilterKey) -> bool {
        self.key.as_ref() != Some(key)
    }

    pub fn store(&mut self, key: FilterKey, indices: Vec<usize>) {
        self.key = Some(key);
        self.indices = indices;
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
