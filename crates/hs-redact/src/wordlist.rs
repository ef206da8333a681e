//! Wordlist loading and trimming.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::Document;
use crate::{Result, SanitizeError};

/// Where a scrub wordlist comes from.
#[derive(Debug, Clone)]
pub enum WordlistSource {
    /// An explicit list of words.
    Inline(Vec<String>),
    /// A filesystem path to a JSON array of strings.
    Path(PathBuf),
}

/// Load a wordlist from `source`.
///
/// Remote locations are refused: the engine performs no network I/O, so
/// fetching a hosted wordlist belongs to the adapter, which can hand the
/// fetched list in as [`WordlistSource::Inline`].
pub fn load_wordlist(source: &WordlistSource) -> Result<Vec<String>> {
    match source {
        WordlistSource::Inline(words) => Ok(words.clone()),
        WordlistSource::Path(path) => {
            if is_remote(path) {
                return Err(SanitizeError::Unsupported("remote wordlist sources"));
            }
            let raw = std::fs::read_to_string(path).map_err(|e| {
                SanitizeError::Wordlist(format!("cannot read {}: {e}", path.display()))
            })?;
            let words: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
                SanitizeError::Wordlist(format!(
                    "{} is not a JSON array of strings: {e}",
                    path.display()
                ))
            })?;
            Ok(words)
        }
    }
}

fn is_remote(path: &Path) -> bool {
    path.to_str()
        .is_some_and(|p| p.starts_with("http://") || p.starts_with("https://"))
}

/// Drop wordlist entries that cannot match `document`.
///
/// A word absent from the serialized text cannot match any pattern built
/// from it, so trimming bounds per-word pattern work to the words actually
/// present. Comparison is case-insensitive, matching how the word patterns
/// are applied. Empty entries are dropped: they carry no pattern.
pub fn trim_wordlist(document: &Document, wordlist: &[String]) -> Vec<String> {
    let haystack = document.text().to_lowercase();
    let trimmed: Vec<String> = wordlist
        .iter()
        .filter(|word| !word.is_empty() && haystack.contains(&word.to_lowercase()))
        .cloned()
        .collect();
    debug!(kept = trimmed.len(), total = wordlist.len(), "Trimmed wordlist");
    trimmed
}
