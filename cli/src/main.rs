//! CLI entrypoint for quizcord
//!
//! Wires the infrastructure adapters into the session use case using
//! dependency injection and runs one quiz session on the console.

use anyhow::Result;
use clap::{Parser, Subcommand};
use quizcord_application::{RunQuizSession, ScoreLedger, SessionError, SessionOutcome};
use quizcord_domain::{ChannelId, GuildId, UserId};
use quizcord_infrastructure::{
    ConfigLoader, ConsoleQuizUi, JsonScoreLedger, OpenTriviaProvider, WikipediaResolver,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizcord", about = "Channel quiz sessions on the console")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Explicit config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Run one quiz session in a channel
    Play {
        #[arg(long)]
        channel: u64,
        #[arg(long)]
        guild: u64,
    },
    /// Look up a user's cumulative score
    Score {
        #[arg(long)]
        user: u64,
        #[arg(long)]
        guild: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?;
    let ledger = Arc::new(
        JsonScoreLedger::open(
            config.ledger.resolved_path(),
            config.ledger.active_flag_ttl_secs,
        )
        .await?,
    );

    match cli.command {
        Command::Play { channel, guild } => {
            info!("starting quiz session");

            // === Dependency Injection ===
            let ui = Arc::new(ConsoleQuizUi::new());
            let shutdown = CancellationToken::new();
            let pump = ui.spawn_input_pump(shutdown.clone());

            let provider = Arc::new(OpenTriviaProvider::new(config.api.base_url.clone()));
            let session = RunQuizSession::new(
                ui,
                provider,
                ledger,
                config.session_params(),
            )
            .with_reference(Arc::new(WikipediaResolver::new()));

            let result = session
                .execute(ChannelId(channel), GuildId(guild))
                .await;
            shutdown.cancel();
            pump.abort();

            match result {
                Ok(SessionOutcome::Completed { .. }) => {}
                Ok(SessionOutcome::Cancelled) => println!("Quiz cancelled."),
                Err(SessionError::AlreadyActive) => {
                    println!("A quiz is already running in this channel.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Score { user, guild } => {
            let score = ledger.get_score(UserId(user), GuildId(guild)).await?;
            if score > 0 {
                println!("Score for user {user}: {score}");
            } else {
                println!("User {user} has not attempted the quiz yet.");
            }
        }
    }

    Ok(())
}
