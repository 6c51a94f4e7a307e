//! Translation trees and flattening

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node in a translation document
///
/// Translation files are nested string-keyed mappings whose leaves are
/// strings. Deserialization is untagged, so arrays, numbers, booleans and
/// nulls are rejected at the JSON boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationTree {
    /// A translated string
    Leaf(String),
    /// A nested mapping of further translations
    Node(TranslationMap),
}

impl TranslationTree {
    /// Create an empty node
    pub fn empty() -> Self {
        Self::Node(TranslationMap::new())
    }

    /// The nested mapping, if this is a node
    pub fn as_node(&self) -> Option<&TranslationMap> {
        match self {
            Self::Node(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }
}

/// Top level of a translation document: always a mapping
pub type TranslationMap = HashMap<String, TranslationTree>;

/// A flattened bundle: dot-joined key to translated string
pub type FlatResources = HashMap<String, String>;

/// Merge `source` into `target`, overwriting colliding top-level keys
///
/// Only the top level is merged; nested trees are replaced wholesale.
pub fn merge_shallow(target: &mut TranslationMap, source: &TranslationMap) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Return a flattened representation of a translation mapping
///
/// Every leaf yields exactly one entry keyed by its ancestors joined with
/// dots. Raw keys must not contain dots themselves, otherwise distinct
/// leaves can collide.
pub fn flatten(data: &TranslationMap) -> FlatResources {
    let mut output = FlatResources::new();
    recursive_flatten("", data, &mut output);
    output
}

fn recursive_flatten(prefix: &str, data: &TranslationMap, output: &mut FlatResources) {
    for (key, value) in data {
        match value {
            TranslationTree::Node(children) => {
                recursive_flatten(&format!("{prefix}{key}."), children, output);
            }
            TranslationTree::Leaf(text) => {
                output.insert(format!("{prefix}{key}"), text.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> TranslationMap {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn flatten_joins_keys_with_dots() {
        let tree = parse(r#"{"a": {"b": "x", "c": {"d": "y"}}}"#);
        let flat = flatten(&tree);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat.get("a.b").map(String::as_str), Some("x"));
        assert_eq!(flat.get("a.c.d").map(String::as_str), Some("y"));
    }

    #[test]
    fn flatten_of_empty_mapping_is_empty() {
        assert!(flatten(&TranslationMap::new()).is_empty());
    }

    #[test]
    fn flatten_preserves_leaf_count() {
        let tree = parse(r#"{"state": {"on": "On", "off": "Off"}, "title": "Switch"}"#);
        assert_eq!(flatten(&tree).len(), 3);
    }

    #[test]
    fn array_leaves_are_rejected() {
        assert!(serde_json::from_str::<TranslationMap>(r#"{"a": ["x"]}"#).is_err());
    }

    #[test]
    fn numeric_leaves_are_rejected() {
        assert!(serde_json::from_str::<TranslationMap>(r#"{"a": 3}"#).is_err());
    }

    #[test]
    fn non_mapping_top_level_is_rejected() {
        assert!(serde_json::from_str::<TranslationMap>(r#""just a string""#).is_err());
    }

    #[test]
    fn shallow_merge_overwrites_top_level_keys() {
        let mut target = parse(r#"{"title": "Hue", "state": {"on": "On"}}"#);
        let source = parse(r#"{"state": {"off": "Off"}, "name": "Light"}"#);
        merge_shallow(&mut target, &source);

        assert_eq!(
            target.get("name"),
            Some(&TranslationTree::Leaf("Light".into()))
        );
        // Nested trees are replaced, not deep-merged.
        let state = target.get("state").and_then(TranslationTree::as_node).unwrap();
        assert!(state.contains_key("off"));
        assert!(!state.contains_key("on"));
    }
}
