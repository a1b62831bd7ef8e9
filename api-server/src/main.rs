//! Archway server binary
//!
//! Loads configuration, wires the pipeline environment (model gateway,
//! object store, metadata table), and serves the HTTP API until
//! interrupted.

use anyhow::{Context, Result};
use api_server::{serve, ServerState};
use clap::Parser;
use archway_engine::config::{expand_tilde, Config};
use archway_engine::llm::http::HttpModelGateway;
use archway_engine::llm::ModelGateway;
use archway_engine::pipeline::{Environment, Pipeline};
use archway_engine::storage::{Database, FsObjectStore, ProjectRepository};
use archway_engine::telemetry;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "archway-server", about = "Solution-interview artifact engine")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Explicit config file path (defaults to ~/.archway/config.toml)
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load_or_default()?,
    };
    telemetry::init_telemetry_with_level(&config.core.log_level);

    let bucket_root = expand_tilde(&config.storage.bucket_root);
    let table_path = expand_tilde(&config.storage.table_path);

    let database = Database::new(&table_path)
        .await
        .context("Failed to open metadata table")?;
    let projects = Arc::new(ProjectRepository::new(database.pool().clone()));

    let gateway: Arc<dyn ModelGateway> = Arc::new(HttpModelGateway::new(
        config.model.clone(),
        Config::model_api_key(),
    ));
    let store = Arc::new(FsObjectStore::new(bucket_root));

    let environment = Environment {
        gateway: Arc::clone(&gateway),
        store,
        projects: Arc::clone(&projects),
        config,
    };
    let pipeline = Arc::new(Pipeline::new(environment)?);
    let state = ServerState::new(pipeline, projects, gateway);

    serve(args.bind, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
