/// Encore - weekly recommendation playlist archiver
use clap::{Parser, Subcommand};
use encore_archiver::archive;
use encore_archiver::bootstrap;
use encore_archiver::config::ArchiverConfig;
use encore_client::EncoreClient;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Archives the weekly recommendation playlist", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Archive this week's recommendations into the permanent playlist
    Run {
        /// Keep going after a failed authentication instead of aborting.
        /// Requests will then fail downstream; kept for compatibility with
        /// the historical behavior.
        #[arg(long)]
        ignore_auth_failure: bool,
    },
    /// Interactively obtain a refresh token for unattended runs
    Authorize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ignore_auth_failure,
        } => {
            run(ignore_auth_failure).await?;
        }
        Commands::Authorize => {
            authorize().await?;
        }
    }

    Ok(())
}

async fn run(ignore_auth_failure: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    tracing::info!("Started discover weekly archiving");

    let config = ArchiverConfig::from_env()?;
    config.require_refresh_token()?;

    let mut client = EncoreClient::new(config.service_config())?;
    if let Err(e) = client.authenticate().await {
        tracing::error!(error = %e, "Error while authenticating the service client");
        if !ignore_auth_failure {
            return Err(e.into());
        }
        // Legacy mode: proceed with the unauthenticated client and let the
        // next call fail instead.
    }

    let playlists = client.playlists()?;

    // A missing weekly playlist or an empty track page terminates the run.
    let weekly_id = archive::find_weekly_playlist(&playlists).await?;
    let week = archive::parse_current_week(&playlists, &weekly_id).await?;
    tracing::info!(week = %week.week_label, "Found this week's playlist");

    // Archival failures are logged and swallowed; the next scheduled run
    // retries naturally since no local state exists.
    tracing::info!("Adding to the weekly archive");
    match archive::merge_into_archive(&playlists, &config.username, &week).await {
        Ok(outcome) => {
            tracing::info!(
                playlist_id = %outcome.playlist_id,
                created = outcome.created,
                added = outcome.added,
                "Merge complete"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Error while archiving this week's tracks");
        }
    }

    tracing::info!(
        elapsed_secs = %format!("{:.3}", started.elapsed().as_secs_f64()),
        "Done discover weekly archiving"
    );
    Ok(())
}

async fn authorize() -> anyhow::Result<()> {
    let config = ArchiverConfig::from_env()?;
    bootstrap::run_authorize(&config).await?;
    Ok(())
}
