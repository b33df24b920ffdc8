//! Token Studio token-set documents.
//!
//! A document is parsed once into a [`TokenNode`] tree: an object carrying
//! both `value` and `type` keys is a leaf, any other object is a group, and
//! anything else (strings, numbers, arrays at group level) is dropped.

use serde_json::{Map, Value};
use thiserror::Error;
use tokenforge_protocol::DottedPath;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document root is not a JSON object")]
    NotAnObject,
}

/// One design value as authored.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLeaf {
    /// Raw value: a literal or a `{dotted.path}` reference.
    pub value: String,
    /// Token Studio type tag (`color`, `fontSizes`, `dimension`, …).
    pub source_type: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Group(TokenGroup),
}

/// An ordered group of named nodes. Key order is the document's source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    children: Vec<(String, TokenNode)>,
}

/// A whole token set is a root group.
pub type TokenDocument = TokenGroup;

impl TokenGroup {
    pub fn from_slice(data: &[u8]) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        value
            .as_object()
            .map(Self::from_object)
            .ok_or(DocumentError::NotAnObject)
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let children = object
            .iter()
            .filter_map(|(key, child)| {
                let child = child.as_object()?;
                Some((key.clone(), TokenNode::from_object(child)))
            })
            .collect();
        Self { children }
    }

    pub fn children(&self) -> &[(String, TokenNode)] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Visit every leaf depth-first in source order, with its dotted path
    /// relative to `prefix`.
    pub fn walk(
        &self,
        prefix: Option<&DottedPath>,
        visit: &mut dyn FnMut(&DottedPath, &TokenLeaf),
    ) {
        for (key, node) in &self.children {
            let path = DottedPath::join(prefix, key);
            match node {
                TokenNode::Leaf(leaf) => visit(&path, leaf),
                TokenNode::Group(group) => group.walk(Some(&path), visit),
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.children
            .iter()
            .map(|(_, node)| match node {
                TokenNode::Leaf(_) => 1,
                TokenNode::Group(group) => group.leaf_count(),
            })
            .sum()
    }
}

impl TokenNode {
    fn from_object(object: &Map<String, Value>) -> Self {
        match (object.get("value"), object.get("type")) {
            (Some(value), Some(source_type)) => TokenNode::Leaf(TokenLeaf {
                value: value_text(value),
                source_type: value_text(source_type),
                description: object
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            }),
            _ => TokenNode::Group(TokenGroup::from_object(object)),
        }
    }
}

/// Token values are strings in the export format, but numbers and composite
/// values (typography, shadows) occur; those are carried as JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> TokenDocument {
        TokenDocument::from_slice(json.as_bytes()).expect("test document parses")
    }

    #[test]
    fn leaf_needs_both_value_and_type() {
        let doc = parse(
            r##"{
                "a": {"value": "#FFFFFF", "type": "color"},
                "b": {"value": "#000000", "label": "no type"},
                "c": {"type": "color", "note": "no value"}
            }"##,
        );
        let kinds: Vec<bool> = doc
            .children()
            .iter()
            .map(|(_, n)| matches!(n, TokenNode::Leaf(_)))
            .collect();
        assert_eq!(kinds, [true, false, false]);
        assert_eq!(doc.leaf_count(), 1);
    }

    #[test]
    fn walk_yields_dotted_paths_in_source_order() {
        let doc = parse(
            r#"{
                "zeta": {"value": "1", "type": "spacing"},
                "alpha": {
                    "inner": {"value": "2", "type": "spacing"},
                    "other": {"value": "3", "type": "spacing"}
                }
            }"#,
        );
        let mut seen = Vec::new();
        doc.walk(None, &mut |path, leaf| {
            seen.push((path.to_string(), leaf.value.clone()));
        });
        assert_eq!(
            seen,
            [
                ("zeta".to_string(), "1".to_string()),
                ("alpha.inner".to_string(), "2".to_string()),
                ("alpha.other".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn scalars_at_group_level_are_ignored() {
        let doc = parse(r#"{"version": 3, "tags": ["x"], "a": {"value": "1", "type": "number"}}"#);
        assert_eq!(doc.children().len(), 1);
    }

    #[test]
    fn non_string_values_become_text() {
        let doc = parse(
            r#"{
                "n": {"value": 16, "type": "spacing"},
                "t": {"value": {"fontSize": "16"}, "type": "typography", "description": "Body"}
            }"#,
        );
        let mut values = Vec::new();
        doc.walk(None, &mut |_, leaf| {
            values.push((leaf.value.clone(), leaf.description.clone()))
        });
        assert_eq!(values[0], ("16".to_string(), None));
        assert_eq!(
            values[1],
            (r#"{"fontSize":"16"}"#.to_string(), Some("Body".to_string()))
        );
    }

    #[test]
    fn root_must_be_an_object() {
        assert!(matches!(
            TokenDocument::from_slice(b"[1, 2]"),
            Err(DocumentError::NotAnObject)
        ));
        assert!(matches!(
            TokenDocument::from_slice(b"{not json"),
            Err(DocumentError::Json(_))
        ));
    }
}
