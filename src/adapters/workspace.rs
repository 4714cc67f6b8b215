use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{DocumentKind, FieldId, FieldTree, TemplateCatalog, TemplateError, TreeEdit};

/// A published tree together with its version number.
#[derive(Debug, Clone)]
pub struct Revision {
    pub version: u64,
    pub tree: Arc<FieldTree>,
    /// Node created by the edit that produced this revision, if any.
    pub created: Option<FieldId>,
}

struct Published {
    version: u64,
    tree: Arc<FieldTree>,
}

/// Holder of the current field tree.
///
/// Edits are computed from the current snapshot under the write lock and
/// published as a whole new tree, so readers only ever see complete
/// revisions.
#[derive(Clone)]
pub struct FieldWorkspace {
    current: Arc<RwLock<Published>>,
    templates: Arc<TemplateCatalog>,
}

impl FieldWorkspace {
    pub fn new(templates: TemplateCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Published {
                version: 0,
                tree: Arc::new(FieldTree::new()),
            })),
            templates: Arc::new(templates),
        }
    }

    pub async fn snapshot(&self) -> Revision {
        let current = self.current.read().await;
        Revision {
            version: current.version,
            tree: current.tree.clone(),
            created: None,
        }
    }

    pub async fn apply(&self, edit: TreeEdit) -> Revision {
        let mut current = self.current.write().await;
        let outcome = current.tree.apply(&edit);
        current.version += 1;
        current.tree = Arc::new(outcome.tree);
        tracing::debug!(
            "Applied {:?} -> version {} ({} nodes)",
            edit,
            current.version,
            current.tree.len()
        );
        Revision {
            version: current.version,
            tree: current.tree.clone(),
            created: outcome.created,
        }
    }

    /// Replace the tree with a fresh copy of the named template.
    pub async fn load_template(&self, name: &str) -> Result<Revision, TemplateError> {
        let fields = self.templates.instantiate(name)?;
        tracing::info!("Loading template '{}' ({} nodes)", name, fields.len());
        Ok(self.apply(TreeEdit::ReplaceAll { fields }).await)
    }

    pub async fn clear(&self) -> Revision {
        self.apply(TreeEdit::Clear).await
    }

    pub async fn document(&self, kind: DocumentKind) -> Value {
        let snapshot = self.snapshot().await;
        kind.generate(&snapshot.tree)
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }
}

impl Default for FieldWorkspace {
    fn default() -> Self {
        Self::new(TemplateCatalog::builtin())
    }
}
