use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use taskmind_lib::ai::AiClient;
use taskmind_lib::config::AppConfig;
use taskmind_lib::file_storage::{documents_ops, tasks_ops};
use taskmind_lib::server::{run_server, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "taskmind-server",
    version,
    about = "HTTP server for the TaskMind personal AI productivity assistant"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TASKMIND_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long, env = "TASKMIND_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TASKMIND_PORT")]
    port: Option<u16>,

    /// Directory holding the persisted collections
    #[arg(long, env = "TASKMIND_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Model name sent to the AI endpoint
    #[arg(long, env = "TASKMIND_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).map_err(|e| anyhow!(e))?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(model) = cli.model {
        config.ai.model = model;
    }
    config.validate().map_err(|e| anyhow!(e))?;

    let data_dir = &config.storage.data_dir;
    let tasks = tasks_ops::load_tasks(data_dir).map_err(|e| anyhow!(e))?;
    let documents = documents_ops::load_documents(data_dir).map_err(|e| anyhow!(e))?;
    log::info!(
        "Loaded {} tasks and {} documents from {}",
        tasks.len(),
        documents.len(),
        data_dir.display()
    );

    let ai = AiClient::from_config(&config.ai).context("Failed to build AI client")?;
    let state = AppState::new(config, ai, tasks, documents);

    run_server(state).await.map_err(|e| anyhow!(e))
}
