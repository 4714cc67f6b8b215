//! Tree Editor
//!
//! Pure edit operations over a [`FieldTree`]. Every operation borrows the
//! current tree and returns a new one; the caller decides when to publish it.
//! Targets are found by identifier anywhere in the tree. An identifier that
//! does not exist is not an error: the result is simply equal to the input.

use serde::{Deserialize, Serialize};

use super::field::{FieldId, FieldKind, FieldNode, FieldShape, FieldTree};

/// Attribute change applied to a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FieldEdit {
    RenameKey { key: String },
    /// Kind changes carry their side effects, see [`FieldShape::into_kind`].
    ChangeKind { kind: FieldKind },
    /// No effect on nested fields.
    SetValue { value: String },
}

impl FieldEdit {
    fn applied_to(&self, node: &FieldNode) -> FieldNode {
        let mut node = node.clone();
        match self {
            FieldEdit::RenameKey { key } => node.key = key.clone(),
            FieldEdit::ChangeKind { kind } => node.shape = node.shape.into_kind(*kind),
            FieldEdit::SetValue { value: literal } => match &mut node.shape {
                FieldShape::String { value } | FieldShape::Number { value } => {
                    *value = literal.clone()
                }
                FieldShape::Nested { .. } => {}
            },
        }
        node
    }
}

/// Whole-tree edit request.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEdit {
    InsertRoot,
    InsertChild { parent: FieldId },
    Update { id: FieldId, edit: FieldEdit },
    Delete { id: FieldId },
    ReplaceAll { fields: FieldTree },
    Clear,
}

/// Result of [`FieldTree::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub tree: FieldTree,
    /// Identifier of the node created by an insert, if one was created.
    pub created: Option<FieldId>,
}

impl FieldTree {
    pub fn apply(&self, edit: &TreeEdit) -> EditOutcome {
        let (tree, created) = match edit {
            TreeEdit::InsertRoot => {
                let (tree, id) = self.insert_root();
                (tree, Some(id))
            }
            TreeEdit::InsertChild { parent } => self.insert_child(parent),
            TreeEdit::Update { id, edit } => (self.update(id, edit), None),
            TreeEdit::Delete { id } => (self.delete(id), None),
            TreeEdit::ReplaceAll { fields } => (fields.clone(), None),
            TreeEdit::Clear => (FieldTree::new(), None),
        };
        EditOutcome { tree, created }
    }

    /// Append a blank field at the end of the roots.
    pub fn insert_root(&self) -> (FieldTree, FieldId) {
        let node = FieldNode::new();
        let id = node.id.clone();
        let mut roots = self.roots().to_vec();
        roots.push(node);
        (FieldTree::from(roots), id)
    }

    /// Append a blank field to the children of `parent`.
    ///
    /// Only nested fields accept children; a scalar or missing parent leaves
    /// the tree as it was and returns `None`.
    pub fn insert_child(&self, parent: &FieldId) -> (FieldTree, Option<FieldId>) {
        let mut created = None;
        let roots = splice(self.roots(), parent, &mut |node| match &node.shape {
            FieldShape::Nested { children } if created.is_none() => {
                let child = FieldNode::new();
                created = Some(child.id.clone());
                let mut children = children.clone();
                children.push(child);
                vec![FieldNode {
                    id: node.id.clone(),
                    key: node.key.clone(),
                    shape: FieldShape::Nested { children },
                }]
            }
            _ => vec![node.clone()],
        });
        (FieldTree::from(roots), created)
    }

    pub fn update(&self, id: &FieldId, edit: &FieldEdit) -> FieldTree {
        FieldTree::from(splice(self.roots(), id, &mut |node| {
            vec![edit.applied_to(node)]
        }))
    }

    /// Remove the node and everything below it.
    pub fn delete(&self, id: &FieldId) -> FieldTree {
        FieldTree::from(splice(self.roots(), id, &mut |_| Vec::new()))
    }
}

/// Rebuild `nodes`, substituting every node whose id is `target` with the
/// nodes returned by `rewrite`. Ancestors of a match get fresh child lists;
/// everything else is copied as is.
fn splice(
    nodes: &[FieldNode],
    target: &FieldId,
    rewrite: &mut dyn FnMut(&FieldNode) -> Vec<FieldNode>,
) -> Vec<FieldNode> {
    let mut rebuilt = Vec::with_capacity(nodes.len());
    for node in nodes {
        if &node.id == target {
            rebuilt.extend(rewrite(node));
            continue;
        }
        match &node.shape {
            FieldShape::Nested { children } => rebuilt.push(FieldNode {
                id: node.id.clone(),
                key: node.key.clone(),
                shape: FieldShape::Nested {
                    children: splice(children, target, rewrite),
                },
            }),
            _ => rebuilt.push(node.clone()),
        }
    }
    rebuilt
}
