mod config;
mod console;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use common::{log, logger};

use config::get_config_manager;
use console::{ConsoleSession, SessionOutcome};

#[derive(Parser)]
#[command(name = "tictactoe_console")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Path to the YAML config; defaults to a file next to the executable
    #[arg(long)]
    config: Option<String>,

    /// Where the game is saved and resumed from
    #[arg(long)]
    save_file: Option<String>,

    /// Start a new game even if a saved one exists
    #[arg(long)]
    no_resume: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    // Stdout carries the game itself.
    logger::init_logger_with_target(prefix, logger::LogTarget::Stderr);

    let config = get_config_manager(args.config.as_deref()).get_config()?;
    let save_path = PathBuf::from(args.save_file.unwrap_or(config.save.file));
    let offer_resume = config.save.offer_resume && !args.no_resume;

    let stdin = io::stdin();
    let mut session = ConsoleSession::new(stdin.lock(), io::stdout(), save_path, offer_resume);

    match session.run()? {
        SessionOutcome::Finished(status) => log!("Game finished: {:?}", status),
        SessionOutcome::Saved => log!("Session saved"),
        SessionOutcome::Abandoned => log!("Session abandoned"),
    }

    Ok(())
}
