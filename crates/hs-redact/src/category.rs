//! Discovery categories and the per-call name tally.
//!
//! A traversal that discovers sensitive names writes into a [`CategoryTally`]
//! owned by the caller. The engine never retains a tally between calls; each
//! query or scrub starts from an empty one.

use std::collections::BTreeMap;
use std::fmt;

use crate::{Result, SanitizeError};

/// A class of discoverable field names in a HAR capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Cookie names, under `cookies` arrays.
    Cookies,
    /// Header names, under `headers` arrays.
    Headers,
    /// URL query parameter names, under `queryString` arrays.
    QueryString,
    /// POST parameter names, under `postData.params` arrays.
    Params,
    /// Content mimeTypes. Not a name category: tallied from `mimeType`
    /// values directly rather than from `name` fields.
    MimeTypes,
}

impl Category {
    /// The categories whose members are `name` fields.
    pub const NAME_CATEGORIES: [Category; 4] = [
        Category::Cookies,
        Category::Headers,
        Category::QueryString,
        Category::Params,
    ];

    /// Category name as adapters spell it, and as the tally is keyed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cookies => "cookies",
            Category::Headers => "headers",
            Category::QueryString => "queryString",
            Category::Params => "params",
            Category::MimeTypes => "mimetypes",
        }
    }

    /// Parse a name category. Anything outside the four name categories is
    /// an invalid spec, including `mimetypes`.
    pub fn parse_name_category(name: &str) -> Result<Category> {
        match name {
            "cookies" => Ok(Category::Cookies),
            "headers" => Ok(Category::Headers),
            "queryString" => Ok(Category::QueryString),
            "params" => Ok(Category::Params),
            other => Err(SanitizeError::InvalidSpec(format!(
                "unknown name category {other:?} (expected one of cookies, headers, queryString, params)"
            ))),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence counts of discovered strings, per category.
///
/// Scratch state for one traversal. Deterministically ordered so that
/// wordlists extended from a tally apply in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: BTreeMap<Category, BTreeMap<String, usize>>,
}

impl CategoryTally {
    /// An empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `name` under `category`.
    pub fn record(&mut self, category: Category, name: &str) {
        *self
            .counts
            .entry(category)
            .or_default()
            .entry(name.to_string())
            .or_insert(0) += 1;
    }

    /// Counts for `category`, if anything was recorded.
    pub fn counts(&self, category: Category) -> Option<&BTreeMap<String, usize>> {
        self.counts.get(&category)
    }

    /// Take the counts for `category` out of the tally.
    pub fn into_counts(mut self, category: Category) -> BTreeMap<String, usize> {
        self.counts.remove(&category).unwrap_or_default()
    }

    /// The discovered names for `category`, in tally order.
    pub fn names(&self, category: Category) -> Vec<String> {
        self.counts
            .get(&category)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }
}
