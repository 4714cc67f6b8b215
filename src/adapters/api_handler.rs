//! REST API handlers for the field editor
//!
//! Field endpoints return the whole published tree after every edit so a
//! client can re-render from a single response. Unknown field ids are not
//! errors: the unchanged tree comes back.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::adapters::workspace::{FieldWorkspace, Revision};
use crate::config::ExportSettings;
use crate::domain::{
    render_pretty, DocumentKind, ExportError, ExportSink, FieldEdit, FieldId, FieldTree,
    TemplateError, TreeEdit,
};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub workspace: FieldWorkspace,
    pub exporter: Arc<dyn ExportSink>,
    pub export: Arc<ExportSettings>,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A published tree as seen by API clients
#[derive(Serialize)]
pub struct TreeView {
    pub version: u64,
    pub node_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<FieldId>,
    pub fields: FieldTree,
}

impl From<Revision> for TreeView {
    fn from(revision: Revision) -> Self {
        Self {
            version: revision.version,
            node_count: revision.tree.len(),
            created: revision.created,
            fields: (*revision.tree).clone(),
        }
    }
}

#[derive(Serialize)]
pub struct TemplateSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub node_count: usize,
}

fn tree_response(status: StatusCode, revision: Revision) -> Response {
    (status, Json(ApiResponse::success(TreeView::from(revision)))).into_response()
}

fn render(kind: DocumentKind, document: &serde_json::Value) -> Result<String, Response> {
    render_pretty(document).map_err(|e| {
        tracing::error!("Failed to render {} document: {}", kind, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(format!("Failed to render document: {}", e))),
        )
            .into_response()
    })
}

// ============================================================================
// Field Tree Endpoints
// ============================================================================

/// GET /api/fields - Current tree
pub async fn list_fields(State(state): State<ApiState>) -> Response {
    tree_response(StatusCode::OK, state.workspace.snapshot().await)
}

/// POST /api/fields - Append a blank root field
pub async fn insert_root(State(state): State<ApiState>) -> Response {
    let revision = state.workspace.apply(TreeEdit::InsertRoot).await;
    tree_response(StatusCode::CREATED, revision)
}

/// PUT /api/fields - Replace the whole tree
pub async fn replace_fields(
    State(state): State<ApiState>,
    Json(fields): Json<FieldTree>,
) -> Response {
    let duplicates = fields.duplicate_ids();
    if !duplicates.is_empty() {
        let ids: Vec<String> = duplicates.iter().map(|id| id.to_string()).collect();
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format!(
                "Duplicate field ids: {}",
                ids.join(", ")
            ))),
        )
            .into_response();
    }

    let revision = state.workspace.apply(TreeEdit::ReplaceAll { fields }).await;
    tree_response(StatusCode::OK, revision)
}

/// DELETE /api/fields - Remove every field
pub async fn clear_fields(State(state): State<ApiState>) -> Response {
    tree_response(StatusCode::OK, state.workspace.clear().await)
}

/// POST /api/fields/:id/children - Append a blank child to a nested field
pub async fn insert_child(
    State(state): State<ApiState>,
    Path(parent): Path<FieldId>,
) -> Response {
    let revision = state.workspace.apply(TreeEdit::InsertChild { parent }).await;
    let status = if revision.created.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    tree_response(status, revision)
}

/// PATCH /api/fields/:id - Rename, retype or set the value of a field
pub async fn update_field(
    State(state): State<ApiState>,
    Path(id): Path<FieldId>,
    Json(edit): Json<FieldEdit>,
) -> Response {
    let revision = state.workspace.apply(TreeEdit::Update { id, edit }).await;
    tree_response(StatusCode::OK, revision)
}

/// DELETE /api/fields/:id - Remove a field and its subtree
pub async fn delete_field(
    State(state): State<ApiState>,
    Path(id): Path<FieldId>,
) -> Response {
    let revision = state.workspace.apply(TreeEdit::Delete { id }).await;
    tree_response(StatusCode::OK, revision)
}

// ============================================================================
// Template Endpoints
// ============================================================================

/// GET /api/templates - List loadable templates
pub async fn list_templates(State(state): State<ApiState>) -> impl IntoResponse {
    let templates: Vec<TemplateSummary> = state
        .workspace
        .templates()
        .iter()
        .map(|t| TemplateSummary {
            name: t.name.clone(),
            description: t.description.clone(),
            node_count: t.fields.len(),
        })
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(templates)))
}

/// POST /api/templates/:name/load - Replace the tree with a template
pub async fn load_template(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Response {
    match state.workspace.load_template(&name).await {
        Ok(revision) => tree_response(StatusCode::OK, revision),
        Err(e @ TemplateError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
    }
}

// ============================================================================
// Document Endpoints
// ============================================================================

/// GET /api/documents/:document - Generated schema or sample as JSON
pub async fn get_document(
    State(state): State<ApiState>,
    Path(kind): Path<DocumentKind>,
) -> impl IntoResponse {
    Json(state.workspace.document(kind).await)
}

/// GET /api/documents/:document/text - Pretty text, ready for the clipboard
pub async fn get_document_text(
    State(state): State<ApiState>,
    Path(kind): Path<DocumentKind>,
) -> Response {
    let document = state.workspace.document(kind).await;
    match render(kind, &document) {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(response) => response,
    }
}

/// GET /api/documents/:document/download - Pretty text as a file attachment
pub async fn download_document(
    State(state): State<ApiState>,
    Path(kind): Path<DocumentKind>,
) -> Response {
    let document = state.workspace.document(kind).await;
    let text = match render(kind, &document) {
        Ok(text) => text,
        Err(response) => return response,
    };
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.export.filename_for(kind)
    );
    (
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
        .into_response()
}

/// POST /api/documents/:document/export - Save the document through the export sink
pub async fn export_document(
    State(state): State<ApiState>,
    Path(kind): Path<DocumentKind>,
) -> Response {
    let document = state.workspace.document(kind).await;
    let text = match render(kind, &document) {
        Ok(text) => text,
        Err(response) => return response,
    };

    match state
        .exporter
        .export(state.export.filename_for(kind), &text)
        .await
    {
        Ok(receipt) => (StatusCode::CREATED, Json(ApiResponse::success(receipt))).into_response(),
        Err(e @ ExportError::InvalidFilename(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(e.to_string())),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to export {} document: {}", kind, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(format!("Failed to export document: {}", e))),
            )
                .into_response()
        }
    }
}
