//! # Schema Builder
//!
//! Schema Builder keeps an editable tree of named, typed fields and derives
//! two documents from it on every request: a JSON Schema style description
//! (types, defaults and required keys) and a sample document that conforms
//! to it.
//!
//! ## Features
//!
//! - **Field tree editing**: add, nest, rename, retype and delete fields by id
//! - **Schema and sample generation**: pure functions of the current tree
//! - **Name-based defaults**: plausible sample values guessed from field names
//! - **Templates**: built-in and file-based trees loadable in one step
//! - **Export**: copy as text, download, or save to the export directory
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_builder::domain::{generate_sample, FieldNode, FieldTree};
//!
//! let tree = FieldTree::from(vec![FieldNode::nested(
//!     "user",
//!     vec![FieldNode::string("email"), FieldNode::number("age").with_value("30")],
//! )]);
//! let sample = generate_sample(tree.roots());
//! assert_eq!(sample["user"]["age"], 30);
//! ```
//!
//! ## Architecture
//!
//! Schema Builder follows Hexagonal Architecture:
//! - **Domain**: field tree, editor, generators, heuristics and templates
//! - **Adapters**: workspace state, export sink, HTTP handlers
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::export::FileExportSink;
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::workspace::FieldWorkspace;
use crate::config::ExportSettings;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `workspace` - Holder of the current field tree
/// * `health_handler` - Health check handler
/// * `exporter` - Sink that saved documents are written to
/// * `export` - Export file names
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(
    workspace: FieldWorkspace,
    health_handler: Arc<HealthHandler>,
    exporter: Arc<FileExportSink>,
    export: ExportSettings,
) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/ready", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.ready().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_state = ApiState {
        workspace,
        exporter,
        export: Arc::new(export),
    };

    let api_router = Router::new()
        // Field tree editing
        .route(
            "/fields",
            get(api_handler::list_fields)
                .post(api_handler::insert_root)
                .put(api_handler::replace_fields)
                .delete(api_handler::clear_fields),
        )
        .route(
            "/fields/:id",
            axum::routing::patch(api_handler::update_field).delete(api_handler::delete_field),
        )
        .route("/fields/:id/children", post(api_handler::insert_child))
        // Templates
        .route("/templates", get(api_handler::list_templates))
        .route("/templates/:name/load", post(api_handler::load_template))
        // Generated documents
        .route("/documents/:document", get(api_handler::get_document))
        .route("/documents/:document/text", get(api_handler::get_document_text))
        .route("/documents/:document/download", get(api_handler::download_document))
        .route("/documents/:document/export", post(api_handler::export_document))
        .with_state(api_state);

    health_router.nest("/api", api_router).layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
