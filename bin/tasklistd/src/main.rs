//! `tasklistd` — the tasklist server binary.
//!
//! Usage:
//!   tasklistd [-c <config.toml>] [--listen <addr>] [--data-dir <dir>]
//!
//! Without a config file the server uses the built-in defaults
//! (`./data` as the storage directory).

mod config;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tasklist_core::Module;
use tracing::info;

use config::ServerConfig;

/// Tasklist server.
#[derive(Parser, Debug)]
#[command(name = "tasklistd", about = "Task-management REST API server")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,

    /// Data directory (overrides the config file).
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    let server_config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };

    // Initialize storage.
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => {
            server_config.verify()?;
            PathBuf::from(&server_config.storage.data_dir)
        }
    };
    std::fs::create_dir_all(&data_dir)?;

    let core_config = tasklist_core::ServiceConfig {
        data_dir: Some(data_dir),
        db_path: server_config.storage.db_path.as_ref().map(PathBuf::from),
        listen: cli.listen.clone(),
    };

    let db: Arc<dyn tasklist_docstore::DocStore> = Arc::new(
        tasklist_docstore::RedbStore::open(&core_config.resolve_db_path())
            .map_err(|e| anyhow::anyhow!("failed to open document store: {}", e))?,
    );

    let task_module = task::TaskModule::new(db);
    info!("Task module initialized");

    let module_routes = vec![(task_module.name(), task_module.routes())];

    // Build router.
    let app = routes::build_router(module_routes);

    // Start server.
    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("tasklist server listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
