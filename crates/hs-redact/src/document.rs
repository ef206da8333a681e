//! HAR document model.
//!
//! A [`Document`] owns both representations of one capture: the parsed JSON
//! tree that structural passes walk, and the canonical serialized text that
//! regex passes scan. The two always describe the same content because the
//! struct is immutable and both forms are derived inside the constructors;
//! a pass that changes one representation builds a fresh `Document`, which
//! re-derives the other. Canonical text is pretty-printed JSON with 2-space
//! indentation and `": "` key separators, the form the textual patterns are
//! written against.

use serde_json::Value;

use crate::{Result, SanitizeError};

/// One validated HAR capture.
///
/// Constructed fresh per redaction request; never share one instance across
/// concurrent callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    text: String,
    tree: Value,
}

impl Document {
    /// Parse and validate a capture from JSON text.
    ///
    /// Text that does not parse as JSON is reported as `InvalidDocument`
    /// carrying the parse error, the same variant used for a tree of the
    /// wrong shape.
    pub fn from_str(input: &str) -> Result<Self> {
        let tree: Value = serde_json::from_str(input)
            .map_err(|e| SanitizeError::InvalidDocument(format!("malformed JSON: {e}")))?;
        Self::from_value(tree)
    }

    /// Validate an already-parsed capture.
    pub fn from_value(tree: Value) -> Result<Self> {
        validate(&tree)?;
        let text = serialize(&tree)?;
        Ok(Self { text, tree })
    }

    /// The canonical serialized form.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed structural form.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Consume the document, keeping only the tree.
    pub fn into_tree(self) -> Value {
        self.tree
    }
}

/// A capture must carry `log.entries` with at least one entry, and the
/// first entry must have a `request`.
fn validate(tree: &Value) -> Result<()> {
    let first_entry = tree
        .get("log")
        .and_then(|log| log.get("entries"))
        .and_then(|entries| entries.get(0));
    match first_entry {
        Some(entry) if entry.get("request").is_some() => Ok(()),
        _ => Err(SanitizeError::InvalidDocument(
            "log.entries[0].request is missing".to_string(),
        )),
    }
}

fn serialize(tree: &Value) -> Result<String> {
    serde_json::to_string_pretty(tree)
        .map_err(|e| SanitizeError::InvalidDocument(format!("cannot serialize: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_har() -> Value {
        json!({
            "log": {
                "entries": [
                    {"request": {"method": "GET", "url": "https://example.com/"}}
                ]
            }
        })
    }

    #[test]
    fn test_from_value_valid() {
        let document = Document::from_value(minimal_har()).unwrap();
        assert_eq!(document.tree(), &minimal_har());
    }

    #[test]
    fn test_from_str_valid() {
        let text = minimal_har().to_string();
        let document = Document::from_str(&text).unwrap();
        assert!(document.text().contains("\"request\""));
    }

    #[test]
    fn test_text_is_canonical() {
        // whatever the input spelling, text comes out in canonical form
        let compact = r#"{"log":{"entries":[{"request":{"url":"https://x/"}}]}}"#;
        let document = Document::from_str(compact).unwrap();
        assert!(document.text().contains("\"url\": \"https://x/\""));
    }

    #[test]
    fn test_text_and_tree_agree() {
        let document = Document::from_value(minimal_har()).unwrap();
        let reparsed: Value = serde_json::from_str(document.text()).unwrap();
        assert_eq!(&reparsed, document.tree());
    }

    #[test]
    fn test_malformed_json_is_invalid_document() {
        let err = Document::from_str("not a har").unwrap_err();
        match err {
            SanitizeError::InvalidDocument(msg) => assert!(msg.contains("malformed JSON")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_request_is_invalid() {
        let err = Document::from_value(json!({
            "log": {"entries": [{"response": {}}]}
        }))
        .unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidDocument(_)));
    }

    #[test]
    fn test_empty_entries_is_invalid() {
        let err = Document::from_value(json!({"log": {"entries": []}})).unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidDocument(_)));
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = Document::from_value(json!(42)).unwrap_err();
        assert!(matches!(err, SanitizeError::InvalidDocument(_)));
    }
}
