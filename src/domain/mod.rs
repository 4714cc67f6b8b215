use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod editor;
pub mod field;
pub mod generator;
pub mod heuristic;
pub mod template;

pub use editor::{EditOutcome, FieldEdit, TreeEdit};
pub use field::{FieldId, FieldKind, FieldNode, FieldShape, FieldTree};
pub use generator::{generate_sample, generate_schema, render_pretty, DocumentKind};
pub use heuristic::default_for;
pub use template::{Template, TemplateCatalog, TemplateError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),

    #[error("Render error: {0}")]
    Render(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where an exported document ended up.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExportReceipt {
    pub label: String,
    pub location: String,
    pub bytes: usize,
    pub exported_at: DateTime<Utc>,
}

/// Destination for already rendered document text.
#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn export(&self, label: &str, text: &str) -> Result<ExportReceipt, ExportError>;
}
