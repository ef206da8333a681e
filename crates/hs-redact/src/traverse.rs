//! Predicate-driven tree walk.
//!
//! [`traverse`] is the only traversal primitive in the engine: every
//! discovery and every structural redaction is a set of [`Rule`]s evaluated
//! by one walk. On an object node, every rule's predicate is evaluated per
//! (key, value) pair; if any holds, every matching rule's action runs and
//! the walk does not descend into that value (an action may itself recurse
//! with a different rule set). If none holds, the walk descends into object
//! and array values. Array nodes recurse per element, scalars terminate.
//!
//! Predicates and actions are first-class values. The reference this engine
//! replaces dispatched on interpreted boolean expressions; a tagged matcher
//! keeps the "any match dispatches all matching callbacks, else descend"
//! semantics without evaluating code from data.

use serde_json::{Map, Value};

use crate::category::{Category, CategoryTally};

/// Condition evaluated against a (parent node, key, value) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The key equals the given name.
    KeyEquals(String),
    /// The key equals `key` and the value is an object carrying `field`.
    KeyEqualsValueHas { key: String, field: String },
    /// The key equals `key`, the value is the string `value`, and the
    /// parent node carries `sibling`.
    KeyValueWithSibling {
        key: String,
        value: String,
        sibling: String,
    },
}

impl Predicate {
    fn matches(&self, parent: &Map<String, Value>, key: &str, value: &Value) -> bool {
        match self {
            Predicate::KeyEquals(name) => key == name,
            Predicate::KeyEqualsValueHas { key: k, field } => {
                key == k && value.as_object().is_some_and(|obj| obj.contains_key(field))
            }
            Predicate::KeyValueWithSibling {
                key: k,
                value: v,
                sibling,
            } => key == k && value.as_str() == Some(v.as_str()) && parent.contains_key(sibling),
        }
    }
}

/// Effect applied to a matched (key, value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Recurse into the matched value with a nested rule tallying every
    /// `name` field found in the subtree.
    TallyNames(Category),
    /// Tally the matched value itself (string values only).
    TallyValue(Category),
    /// Overwrite the matched node's `text` body with a placeholder naming
    /// its `mimeType`.
    RedactContentText,
    /// Overwrite the parent's `sibling` field with a placeholder naming the
    /// matched value.
    RedactSiblingText { sibling: String },
}

/// A dispatchable (predicate, action) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub predicate: Predicate,
    pub action: RuleAction,
}

/// The placeholder written over a redacted value.
pub(crate) fn placeholder(label: &str) -> String {
    format!("[{label} redacted]")
}

/// Depth-first pre-order walk dispatching `rules` over `node`.
///
/// Discovered names are recorded into `tally`; structural redactions mutate
/// `node` in place.
pub fn traverse(node: &mut Value, rules: &[Rule], tally: &mut CategoryTally) {
    match node {
        Value::Object(map) => {
            let keys: Vec<String> = map.keys().cloned().collect();
            for key in &keys {
                let Some(value) = map.get(key) else { continue };
                let matched: Vec<usize> = rules
                    .iter()
                    .enumerate()
                    .filter(|(_, rule)| rule.predicate.matches(map, key, value))
                    .map(|(idx, _)| idx)
                    .collect();
                if matched.is_empty() {
                    if let Some(child) = map.get_mut(key) {
                        if child.is_object() || child.is_array() {
                            traverse(child, rules, tally);
                        }
                    }
                } else {
                    for idx in matched {
                        apply(&rules[idx].action, map, key, tally);
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                traverse(item, rules, tally);
            }
        }
        _ => {}
    }
}

fn apply(action: &RuleAction, parent: &mut Map<String, Value>, key: &str, tally: &mut CategoryTally) {
    match action {
        RuleAction::TallyNames(category) => {
            let nested = [Rule {
                predicate: Predicate::KeyEquals("name".to_string()),
                action: RuleAction::TallyValue(*category),
            }];
            if let Some(child) = parent.get_mut(key) {
                traverse(child, &nested, tally);
            }
        }
        RuleAction::TallyValue(category) => {
            if let Some(Value::String(name)) = parent.get(key) {
                tally.record(*category, name);
            }
        }
        RuleAction::RedactContentText => {
            if let Some(Value::Object(content)) = parent.get_mut(key) {
                let label = content
                    .get("mimeType")
                    .and_then(Value::as_str)
                    .unwrap_or("content")
                    .to_string();
                content.insert("text".to_string(), Value::String(placeholder(&label)));
            }
        }
        RuleAction::RedactSiblingText { sibling } => {
            let label = parent.get(key).and_then(Value::as_str).map(str::to_string);
            if let Some(label) = label {
                parent.insert(sibling.clone(), Value::String(placeholder(&label)));
            }
        }
    }
}
