use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::adapters::export::FileExportSink;
use crate::adapters::workspace::FieldWorkspace;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub workspace: String,
    pub export: String,
}

pub struct HealthHandler {
    workspace: FieldWorkspace,
    exporter: Arc<FileExportSink>,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(workspace: FieldWorkspace, exporter: Arc<FileExportSink>) -> Self {
        Self {
            workspace,
            exporter,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let revision = self.workspace.snapshot().await;
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                workspace: format!("ok (revision {}, {} fields)", revision.version, revision.tree.len()),
                export: if self.exporter.is_ready() {
                    "ok".to_string()
                } else {
                    "unavailable".to_string()
                },
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - returns 200 once exported files have somewhere to go
    pub async fn ready(&self) -> impl IntoResponse {
        if self.exporter.is_ready() {
            (StatusCode::OK, Json(serde_json::json!({
                "status": "ready",
                "message": "Server is ready to accept requests"
            })))
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({
                "status": "not_ready",
                "message": format!(
                    "Export directory {} is not usable",
                    self.exporter.directory().display()
                )
            })))
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}
