//! Field Tree Model
//!
//! An ordered forest of named, typed fields. Scalar fields carry an optional
//! literal value; nested fields own an ordered list of child fields. The
//! "children only when nested" rule lives in the type: a [`FieldShape`] is
//! either a scalar with a value or a group with children, never both.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque node identifier, unique across a whole tree and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The three field types offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Number,
    Nested,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Nested => "nested",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a node.
///
/// Serialized with the kind as the `type` tag, so a node reads as
/// `{"id": .., "key": .., "type": "number", "value": "30"}` or
/// `{"id": .., "key": .., "type": "nested", "children": [..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldShape {
    String {
        #[serde(default)]
        value: String,
    },
    Number {
        #[serde(default)]
        value: String,
    },
    Nested {
        #[serde(default)]
        children: Vec<FieldNode>,
    },
}

impl FieldShape {
    /// Empty payload for a kind: blank value for scalars, no children for groups.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::String => FieldShape::String {
                value: String::new(),
            },
            FieldKind::Number => FieldShape::Number {
                value: String::new(),
            },
            FieldKind::Nested => FieldShape::Nested {
                children: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldShape::String { .. } => FieldKind::String,
            FieldShape::Number { .. } => FieldKind::Number,
            FieldShape::Nested { .. } => FieldKind::Nested,
        }
    }

    /// Convert to another kind.
    ///
    /// Scalar to scalar keeps the literal. Leaving `Nested` drops the
    /// children and starts from a blank value; entering `Nested` drops the
    /// value and starts with no children. Converting to the current kind is
    /// the identity.
    pub fn into_kind(self, kind: FieldKind) -> Self {
        match (self, kind) {
            (shape @ FieldShape::Nested { .. }, FieldKind::Nested) => shape,
            (_, FieldKind::Nested) => FieldShape::empty(FieldKind::Nested),
            (FieldShape::String { value } | FieldShape::Number { value }, FieldKind::String) => {
                FieldShape::String { value }
            }
            (FieldShape::String { value } | FieldShape::Number { value }, FieldKind::Number) => {
                FieldShape::Number { value }
            }
            (FieldShape::Nested { .. }, scalar) => FieldShape::empty(scalar),
        }
    }
}

/// One entry in the editable tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    #[serde(default)]
    pub id: FieldId,
    #[serde(default)]
    pub key: String,
    #[serde(flatten)]
    pub shape: FieldShape,
}

impl FieldNode {
    /// A fresh, blank string field as produced by "add field".
    pub fn new() -> Self {
        Self {
            id: FieldId::new(),
            key: String::new(),
            shape: FieldShape::empty(FieldKind::String),
        }
    }

    pub fn string(key: impl Into<String>) -> Self {
        Self::with_shape(key, FieldShape::empty(FieldKind::String))
    }

    pub fn number(key: impl Into<String>) -> Self {
        Self::with_shape(key, FieldShape::empty(FieldKind::Number))
    }

    pub fn nested(key: impl Into<String>, children: Vec<FieldNode>) -> Self {
        Self::with_shape(key, FieldShape::Nested { children })
    }

    fn with_shape(key: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            id: FieldId::new(),
            key: key.into(),
            shape,
        }
    }

    /// Set the literal value. Ignored on nested fields.
    pub fn with_value(mut self, literal: impl Into<String>) -> Self {
        match &mut self.shape {
            FieldShape::String { value } | FieldShape::Number { value } => *value = literal.into(),
            FieldShape::Nested { .. } => {}
        }
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.shape.kind()
    }

    /// Literal value of a scalar field; `None` for nested fields.
    pub fn value(&self) -> Option<&str> {
        match &self.shape {
            FieldShape::String { value } | FieldShape::Number { value } => Some(value),
            FieldShape::Nested { .. } => None,
        }
    }

    /// Children of a nested field; `None` for scalar fields.
    pub fn children(&self) -> Option<&[FieldNode]> {
        match &self.shape {
            FieldShape::Nested { children } => Some(children),
            _ => None,
        }
    }

    /// Whitespace-only keys are kept in the tree but never emitted.
    pub fn has_blank_key(&self) -> bool {
        self.key.trim().is_empty()
    }
}

impl Default for FieldNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered root-level fields. Insertion order is the output property order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTree {
    roots: Vec<FieldNode>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self) -> &[FieldNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<FieldNode> {
        self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of nodes, descendants included.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    /// Depth-first, pre-order walk over every node.
    pub fn nodes(&self) -> impl Iterator<Item = &FieldNode> {
        let mut stack: Vec<&FieldNode> = self.roots.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }

    pub fn find(&self, id: &FieldId) -> Option<&FieldNode> {
        self.nodes().find(|node| &node.id == id)
    }

    pub fn contains(&self, id: &FieldId) -> bool {
        self.find(id).is_some()
    }

    /// Identifiers that occur more than once, each reported once, in walk order.
    pub fn duplicate_ids(&self) -> Vec<FieldId> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for node in self.nodes() {
            if !seen.insert(&node.id) && reported.insert(&node.id) {
                duplicates.push(node.id.clone());
            }
        }
        duplicates
    }

    /// Same structure with a fresh identifier on every node.
    pub fn reissue_ids(&self) -> FieldTree {
        fn reissue(nodes: &[FieldNode]) -> Vec<FieldNode> {
            nodes
                .iter()
                .map(|node| FieldNode {
                    id: FieldId::new(),
                    key: node.key.clone(),
                    shape: match &node.shape {
                        FieldShape::Nested { children } => FieldShape::Nested {
                            children: reissue(children),
                        },
                        scalar => scalar.clone(),
                    },
                })
                .collect()
        }

        FieldTree::from(reissue(&self.roots))
    }
}

impl From<Vec<FieldNode>> for FieldTree {
    fn from(roots: Vec<FieldNode>) -> Self {
        Self { roots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_tree() -> FieldTree {
        FieldTree::from(vec![
            FieldNode::nested(
                "user",
                vec![
                    FieldNode::string("name"),
                    FieldNode::nested("address", vec![FieldNode::string("city")]),
                ],
            ),
            FieldNode::number("total").with_value("3"),
        ])
    }

    #[test]
    fn test_new_node_is_blank_string() {
        let node = FieldNode::new();
        assert_eq!(node.key, "");
        assert_eq!(node.kind(), FieldKind::String);
        assert_eq!(node.value(), Some(""));
        assert!(node.children().is_none());
    }

    #[test]
    fn test_fresh_ids_are_distinct() {
        let a = FieldId::new();
        let b = FieldId::new();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let node = FieldNode {
            id: FieldId::from("n1"),
            key: "age".to_string(),
            shape: FieldShape::Number {
                value: "30".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"id": "n1", "key": "age", "type": "number", "value": "30"})
        );

        let group = FieldNode {
            id: FieldId::from("g1"),
            key: "user".to_string(),
            shape: FieldShape::Nested { children: vec![] },
        };
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"id": "g1", "key": "user", "type": "nested", "children": []})
        );
    }

    #[test]
    fn test_deserialize_without_id_assigns_one() {
        let tree: FieldTree = serde_json::from_value(json!([
            {"key": "user", "type": "nested", "children": [
                {"key": "name", "type": "string"}
            ]}
        ]))
        .unwrap();

        assert_eq!(tree.len(), 2);
        assert!(tree.duplicate_ids().is_empty());
        let child = &tree.roots()[0].children().unwrap()[0];
        assert_eq!(child.key, "name");
        assert_eq!(child.value(), Some(""));
    }

    #[test]
    fn test_nodes_walk_is_preorder() {
        let tree = sample_tree();
        let keys: Vec<&str> = tree.nodes().map(|n| n.key.as_str()).collect();
        assert_eq!(keys, vec!["user", "name", "address", "city", "total"]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_find_reaches_nested_nodes() {
        let tree = sample_tree();
        let city_id = tree.nodes().find(|n| n.key == "city").unwrap().id.clone();
        assert_eq!(tree.find(&city_id).unwrap().key, "city");
        assert!(!tree.contains(&FieldId::from("missing")));
    }

    #[test]
    fn test_duplicate_ids_reported_once() {
        let mut a = FieldNode::string("a");
        a.id = FieldId::from("same");
        let mut b = FieldNode::string("b");
        b.id = FieldId::from("same");
        let mut c = FieldNode::string("c");
        c.id = FieldId::from("same");
        let tree = FieldTree::from(vec![a, FieldNode::nested("g", vec![b, c])]);

        assert_eq!(tree.duplicate_ids(), vec![FieldId::from("same")]);
    }

    #[test]
    fn test_reissue_ids_keeps_structure() {
        let tree = sample_tree();
        let copy = tree.reissue_ids();

        assert_eq!(copy.len(), tree.len());
        for (old, new) in tree.nodes().zip(copy.nodes()) {
            assert_ne!(old.id, new.id);
            assert_eq!(old.key, new.key);
            assert_eq!(old.kind(), new.kind());
            assert_eq!(old.value(), new.value());
        }
    }

    #[test]
    fn test_into_kind_transitions() {
        let number = FieldShape::Number {
            value: "7".to_string(),
        };
        assert_eq!(
            number.clone().into_kind(FieldKind::String),
            FieldShape::String {
                value: "7".to_string()
            }
        );
        assert_eq!(
            number.into_kind(FieldKind::Nested),
            FieldShape::Nested { children: vec![] }
        );

        let group = FieldShape::Nested {
            children: vec![FieldNode::string("x")],
        };
        assert_eq!(group.clone().into_kind(FieldKind::Nested), group);
        assert_eq!(
            group.into_kind(FieldKind::Number),
            FieldShape::Number {
                value: String::new()
            }
        );
    }
}
