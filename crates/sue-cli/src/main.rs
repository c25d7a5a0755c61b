mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod logging;
mod output;
mod slash;
mod welcome;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use config::{CliConfig, ensure_api_key};
use sue_ai::{AppConfig, Session};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error::handle_error(err);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        completions::generate_completions(*shell);
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(CliConfig::default_path);
    let mut file_config = CliConfig::load_from_path(config_path.clone());
    let mut app_config = file_config.to_app_config();
    if let Some(model) = &cli.model {
        app_config.model = model.clone();
    }

    // Stdout belongs to the conversation, so logs only go to the file.
    let _guard = match logging::init(cli.verbose, &app_config.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("{} {err:#}", "Warning:".yellow().bold());
            None
        }
    };

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let session =
                open_session(&mut app_config, &mut file_config, config_path.as_deref())?;
            commands::chat::run(session).await
        }
        Commands::Ask { text } => {
            let session =
                open_session(&mut app_config, &mut file_config, config_path.as_deref())?;
            commands::ask::run(session, &text, cli.format).await
        }
        Commands::Fetch { url } => commands::fetch::run(&app_config, &url, cli.format).await,
        Commands::Search { query, num_results } => {
            commands::search::run(&app_config, &query, num_results, cli.format).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn open_session(
    app_config: &mut AppConfig,
    file_config: &mut CliConfig,
    path: Option<&Path>,
) -> Result<Session> {
    ensure_api_key(app_config, file_config, path)?;
    Ok(Session::from_config(app_config)?)
}
