use clap::Parser;
use schema_builder::adapters::export::FileExportSink;
use schema_builder::adapters::health_handler::HealthHandler;
use schema_builder::adapters::workspace::FieldWorkspace;
use schema_builder::cli::Cli;
use schema_builder::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Schema Builder on {}:{}", host, port);

    let catalog = settings.template_catalog();
    info!("{} templates available", catalog.len());
    let workspace = FieldWorkspace::new(catalog);

    if let Some(name) = &cli.template {
        let revision = workspace.load_template(name).await?;
        info!("Preloaded template '{}' ({} fields)", name, revision.tree.len());
    }

    let exporter = Arc::new(FileExportSink::new(settings.export.directory.clone()));
    info!("Exporting documents to {}", exporter.directory().display());
    let health_handler = Arc::new(HealthHandler::new(workspace.clone(), exporter.clone()));

    let app = schema_builder::create_app(workspace, health_handler, exporter, settings.export);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
