mod cleanup_task;
mod game_store;
mod game_view;
mod server_config;
mod web_server;

use std::path::PathBuf;

use clap::Parser;
use common::{log, logger};

use cleanup_task::CleanupTask;
use game_store::GameStore;
use server_config::get_config_manager;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config; defaults to a file next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Overrides the configured listen address
    #[arg(long)]
    address: Option<String>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(args.config.as_deref()).get_config()?;
    if let Some(address) = args.address {
        config.address = address;
    }

    let game_store = GameStore::new();

    let cleanup_task = CleanupTask::new(
        game_store.clone(),
        config.cleanup_interval(),
        config.inactivity_timeout(),
    );
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    let static_files_path = config.static_files_path.as_ref().map(PathBuf::from);
    web_server::run_web_server(&config.address, game_store, static_files_path, shutdown_signal())
        .await?;

    log!("Server shut down gracefully");

    Ok(())
}
