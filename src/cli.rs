use clap::Parser;
use std::path::PathBuf;

/// Schema Builder - design a field tree, get a JSON Schema and sample data
#[derive(Parser, Debug, Clone)]
#[command(name = "schema-builder", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMA_BUILDER_CONFIG", default_value = "schema-builder.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "SCHEMA_BUILDER_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "SCHEMA_BUILDER_PORT")]
    pub port: Option<u16>,

    /// Directory that saved documents are written to
    #[arg(long, env = "SCHEMA_BUILDER_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Template to load into the workspace at startup
    #[arg(short, long, env = "SCHEMA_BUILDER_TEMPLATE")]
    pub template: Option<String>,
}
