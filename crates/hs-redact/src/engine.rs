//! Sanitization orchestrator.
//!
//! [`Sanitizer::scrub`] sequences the five stages of a scrub: base wordlist
//! assembly, one structural pass (name discovery plus content-body
//! redaction), the generic credential pass over the serialized text, the
//! wordlist extension from discovered names, and the per-word textual pass.
//! Each textual stage works on the canonical text of a freshly constructed
//! [`Document`], so the structural and textual views can never diverge
//! across a stage boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use hs_config::ScrubDefaults;

use crate::category::{Category, CategoryTally};
use crate::document::Document;
use crate::patterns;
use crate::traverse::{traverse, Rule};
use crate::wordlist::trim_wordlist;
use crate::{Result, SanitizeError};

/// Caller options for one scrub.
///
/// The four flags widen redaction from the built-in defaults to every
/// member of their category; the lists extend the default wordlist and
/// content scrub list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubSpec {
    /// Extra wordlist entries, appended to the default wordlist.
    pub wordlist: Vec<String>,
    /// Extra content mimeTypes to redact, applied on top of the defaults.
    pub content_types: Vec<String>,
    /// Redact every cookie value.
    pub all_cookies: bool,
    /// Redact every header value.
    pub all_headers: bool,
    /// Redact every URL query and POST parameter value.
    pub all_params: bool,
    /// Redact every embedded content body.
    pub all_content: bool,
}

impl ScrubSpec {
    /// Build a spec from adapter-supplied JSON options.
    ///
    /// Wordlist entries must all be strings. Non-string content-type
    /// entries are dropped without error; the list is advisory and gets
    /// filtered against the document before use either way.
    pub fn from_json(options: &Value) -> Result<Self> {
        let obj = options.as_object().ok_or_else(|| {
            SanitizeError::InvalidSpec("options must be a JSON object".to_string())
        })?;

        let mut spec = ScrubSpec::default();
        if let Some(words) = obj.get("wordlist") {
            let entries = words.as_array().ok_or_else(|| {
                SanitizeError::InvalidSpec("wordlist must be an array".to_string())
            })?;
            for entry in entries {
                match entry.as_str() {
                    Some(word) => spec.wordlist.push(word.to_string()),
                    None => {
                        return Err(SanitizeError::InvalidSpec(
                            "wordlist entries must all be strings".to_string(),
                        ))
                    }
                }
            }
        }
        if let Some(Value::Array(entries)) = obj.get("content_types") {
            spec.content_types
                .extend(entries.iter().filter_map(Value::as_str).map(str::to_string));
        }
        spec.all_cookies = flag(obj.get("all_cookies"));
        spec.all_headers = flag(obj.get("all_headers"));
        spec.all_params = flag(obj.get("all_params"));
        spec.all_content = flag(obj.get("all_content"));
        Ok(spec)
    }
}

fn flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// The sanitization engine.
///
/// Holds only the immutable default lists; all per-call state (the document
/// and the discovery tally) lives in the call, so one engine can serve
/// concurrent requests as long as each request scrubs its own [`Document`].
#[derive(Debug, Clone, Default)]
pub struct Sanitizer {
    defaults: ScrubDefaults,
}

impl Sanitizer {
    /// Create an engine over the given default lists.
    pub fn new(defaults: ScrubDefaults) -> Self {
        Self { defaults }
    }

    /// The default lists this engine was built with.
    pub fn defaults(&self) -> &ScrubDefaults {
        &self.defaults
    }

    /// Tally the names of one name category: `cookies`, `headers`,
    /// `queryString`, or `params`.
    pub fn hartype_names(
        &self,
        document: &Document,
        hartype: &str,
    ) -> Result<BTreeMap<String, usize>> {
        let category = Category::parse_name_category(hartype)?;
        let rule = patterns::name_discovery_rule(category)?;
        let mut tally = CategoryTally::new();
        let mut tree = document.tree().clone();
        traverse(&mut tree, &[rule], &mut tally);
        Ok(tally.into_counts(category))
    }

    /// Tally every content mimeType present in the capture.
    pub fn mimetypes(&self, document: &Document) -> BTreeMap<String, usize> {
        let mut tally = CategoryTally::new();
        let mut tree = document.tree().clone();
        traverse(&mut tree, &[patterns::mimetype_discovery_rule()], &mut tally);
        tally.into_counts(Category::MimeTypes)
    }

    /// Full scrub of `document` under `spec`.
    pub fn scrub(&self, document: Document, spec: &ScrubSpec) -> Result<Document> {
        // Stage 1: base wordlist = defaults + caller words.
        let mut words = self.defaults.wordlist.clone();
        words.extend(spec.wordlist.iter().cloned());

        // Stage 2: one structural pass tallies flagged categories and
        // redacts content bodies in place.
        let mut rules: Vec<Rule> = Vec::new();
        if spec.all_cookies {
            rules.push(patterns::name_discovery_rule(Category::Cookies)?);
        }
        if spec.all_headers {
            rules.push(patterns::name_discovery_rule(Category::Headers)?);
        }
        if spec.all_params {
            rules.push(patterns::name_discovery_rule(Category::QueryString)?);
            rules.push(patterns::name_discovery_rule(Category::Params)?);
        }
        rules.extend(self.content_rules(&document, spec));
        debug!(rules = rules.len(), "Running structural pass");

        let mut tally = CategoryTally::new();
        let mut tree = document.into_tree();
        traverse(&mut tree, &rules, &mut tally);
        let document = Document::from_value(tree)?;

        // Stage 3: single-use patterns over the re-serialized text.
        let mut text = document.text().to_string();
        for (regex, replacement) in patterns::single_use_patterns() {
            text = regex.replace_all(&text, replacement).into_owned();
        }
        let document = Document::from_str(&text)?;

        // Stage 4: discovered names become search words, so a flagged
        // value is redacted wherever it recurs in the text.
        if spec.all_cookies {
            words.extend(tally.names(Category::Cookies));
        }
        if spec.all_headers {
            words.extend(tally.names(Category::Headers));
        }
        if spec.all_params {
            words.extend(tally.names(Category::QueryString));
            words.extend(tally.names(Category::Params));
        }

        // Stage 5: per-word patterns over the trimmed wordlist, in
        // wordlist order.
        let trimmed = trim_wordlist(&document, &words);
        let mut text = document.text().to_string();
        for word in &trimmed {
            for pattern in patterns::word_patterns(word)? {
                text = pattern.apply(&text);
            }
        }
        debug!(words = trimmed.len(), "Applied word patterns");
        Document::from_str(&text)
    }

    /// The structural content-redaction rules for this scrub.
    ///
    /// Without `all_content`, an explicit mimeType only becomes a rule if
    /// the capture actually exhibits it; the default list always applies.
    fn content_rules(&self, document: &Document, spec: &ScrubSpec) -> Vec<Rule> {
        if spec.all_content {
            return vec![patterns::all_content_rule()];
        }
        let mut types: Vec<String> = self.defaults.content_types.clone();
        if !spec.content_types.is_empty() {
            let present = self.mimetypes(document);
            let extra: Vec<String> = spec
                .content_types
                .iter()
                .filter(|mt| present.contains_key(mt.as_str()) && !types.contains(*mt))
                .cloned()
                .collect();
            types.extend(extra);
        }
        patterns::content_type_rules(types.iter().map(String::as_str))
    }
}
