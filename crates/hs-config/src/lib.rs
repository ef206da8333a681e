//! Default scrub configuration for the HAR sanitizer.
//!
//! The redaction engine is configured by two read-only lists: the wordlist
//! (field names whose associated values are redacted wherever they recur in
//! a capture) and the content scrub list (mimeTypes whose embedded bodies
//! are replaced by a placeholder). This crate embeds the shipped defaults
//! and can load either list from a JSON file holding an array of strings.
//!
//! Loading is strictly local and synchronous. If an adapter serves these
//! lists from a remote store, fetching them is the adapter's job; the engine
//! only ever sees the loaded [`ScrubDefaults`] value.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration lists.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but did not hold a JSON array of strings.
    #[error("{path} is not a JSON array of strings: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Field names whose values are scrubbed by default.
///
/// Covers credential and session material commonly carried in cookies,
/// headers, and OAuth/SAML/FIDO parameters.
pub const DEFAULT_WORDLIST: &[&str] = &[
    "state",
    "shdf",
    "usg",
    "password",
    "email",
    "code",
    "code_verifier",
    "client_secret",
    "client_id",
    "token",
    "access_token",
    "authenticity_token",
    "id_token",
    "appID",
    "challenge",
    "facetID",
    "assertion",
    "fcParams",
    "serverData",
    "Authorization",
    "auth",
    "x-client-data",
    "SAMLRequest",
    "SAMLResponse",
];

/// Content mimeTypes whose bodies are scrubbed by default.
///
/// Script, style, markup, image, and font bodies are bulky and never useful
/// in a shared capture; base64/octet-stream payloads are opaque and may
/// embed anything.
pub const DEFAULT_CONTENT_TYPES: &[&str] = &[
    "application/javascript",
    "application/x-javascript",
    "application/base64",
    "application/octet-stream",
    "text/javascript",
    "text/html",
    "text/css",
    "text/xml",
    "image/gif",
    "image/jpeg",
    "image/png",
    "image/svg+xml",
    "image/webp",
    "image/x-icon",
    "font/otf",
    "font/ttf",
    "font/woff",
    "font/woff2",
];

/// The two default lists consumed by the sanitization engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubDefaults {
    /// Default scrub wordlist.
    pub wordlist: Vec<String>,
    /// Default content mimeType scrub list.
    pub content_types: Vec<String>,
}

impl ScrubDefaults {
    /// The defaults embedded in this crate.
    pub fn builtin() -> Self {
        Self {
            wordlist: DEFAULT_WORDLIST.iter().map(|s| s.to_string()).collect(),
            content_types: DEFAULT_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Load both lists from JSON files, each an array of strings.
    pub fn from_files<P: AsRef<Path>>(wordlist: P, content_types: P) -> Result<Self> {
        Ok(Self {
            wordlist: string_list_from_file(wordlist.as_ref())?,
            content_types: string_list_from_file(content_types.as_ref())?,
        })
    }

    /// Replace the wordlist from a file, keeping the other list.
    pub fn with_wordlist_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.wordlist = string_list_from_file(path.as_ref())?;
        Ok(self)
    }

    /// Replace the content scrub list from a file, keeping the other list.
    pub fn with_content_types_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        self.content_types = string_list_from_file(path.as_ref())?;
        Ok(self)
    }
}

impl Default for ScrubDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Read a JSON array of strings from `path`.
pub fn string_list_from_file(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let list: Vec<String> = serde_json::from_str(&raw).map_err(|source| ConfigError::Format {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), entries = list.len(), "Loaded string list");
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lists_populated() {
        let defaults = ScrubDefaults::builtin();
        assert!(!defaults.wordlist.is_empty());
        assert!(!defaults.content_types.is_empty());
        assert!(defaults.wordlist.iter().any(|w| w == "password"));
        assert!(defaults.content_types.iter().any(|c| c == "image/png"));
    }

    #[test]
    fn test_default_is_builtin() {
        assert_eq!(ScrubDefaults::default(), ScrubDefaults::builtin());
    }

    #[test]
    fn test_load_list_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["alpha", "beta"]"#).unwrap();

        let list = string_list_from_file(file.path()).unwrap();
        assert_eq!(list, vec!["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = string_list_from_file(Path::new("/nonexistent/wordlist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_non_array_is_format_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "a list"}}"#).unwrap();

        let err = string_list_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Format { .. }));
    }

    #[test]
    fn test_non_string_entry_is_format_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["ok", 42]"#).unwrap();

        let err = string_list_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Format { .. }));
    }

    #[test]
    fn test_from_files() {
        let mut words = tempfile::NamedTempFile::new().unwrap();
        write!(words, r#"["secret"]"#).unwrap();
        let mut types = tempfile::NamedTempFile::new().unwrap();
        write!(types, r#"["image/bmp"]"#).unwrap();

        let defaults = ScrubDefaults::from_files(words.path(), types.path()).unwrap();
        assert_eq!(defaults.wordlist, vec!["secret".to_string()]);
        assert_eq!(defaults.content_types, vec!["image/bmp".to_string()]);
    }

    #[test]
    fn test_serde_round_trip() {
        let defaults = ScrubDefaults::builtin();
        let json = serde_json::to_string(&defaults).unwrap();
        let parsed: ScrubDefaults = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, defaults);
    }
}
