//! minibot CLI: run the long-polling bot until ctrl-c. Config from env and
//! optional CLI args.

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use minibot_telegram::Bot;
use tracing::info;

use cli::{load_config, parse_command_arg, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            token,
            welcome,
            commands,
        } => run(token, welcome, commands).await,
    }
}

async fn run(token: Option<String>, welcome: Option<String>, commands: Vec<String>) -> Result<()> {
    let config = load_config(token)?;
    minibot_core::init_tracing(config.log_file.as_deref())?;

    let bot = Arc::new(Bot::new(config));

    if let Some(welcome) = welcome.or_else(|| std::env::var("WELCOME_MESSAGE").ok()) {
        bot.set_welcome_message(&welcome).await;
    }
    for raw in &commands {
        let (trigger, reply) = parse_command_arg(raw)?;
        bot.add_command(trigger, reply).await;
    }

    bot.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("ctrl-c received, shutting down");
    bot.stop().await;

    Ok(())
}
