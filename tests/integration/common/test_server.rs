use schema_builder::adapters::{
    export::FileExportSink, health_handler::HealthHandler, workspace::FieldWorkspace,
};
use schema_builder::config::ExportSettings;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub export_dir: TempDir,
}

impl TestServer {
    pub async fn new() -> Self {
        let export_dir = TempDir::new().unwrap();

        // Initialize handlers
        let workspace = FieldWorkspace::default();
        let exporter = Arc::new(FileExportSink::new(export_dir.path()));
        let health_handler = Arc::new(HealthHandler::new(workspace.clone(), exporter.clone()));

        // Create app
        let app = schema_builder::create_app(
            workspace,
            health_handler,
            exporter,
            ExportSettings::default(),
        );

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to be ready
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestServer {
            addr,
            base_url,
            export_dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
