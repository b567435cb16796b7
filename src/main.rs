//! tunetidy - Normalize, strip, tag and download music files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod download;
mod library;
mod naming;
mod tagging;

use cli::{Cli, Commands};
use tagging::TagRequest;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "tunetidy=debug,reqwest=debug"
    } else {
        "tunetidy=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Rename { path, dry_run } => {
            cli::commands::rename(path, dry_run)?;
        }
        Commands::Strip {
            pattern,
            path,
            dry_run,
        } => {
            cli::commands::strip(pattern, path, dry_run)?;
        }
        Commands::Tag {
            path,
            force,
            artist,
            album,
            genre,
            dry_run,
        } => {
            let request = TagRequest {
                artist,
                album,
                genre,
            };
            cli::commands::tag(path, force, request, dry_run)?;
        }
        Commands::Download {
            url,
            output,
            update,
            yt_dlp,
        } => {
            cli::commands::download(url, output, update, yt_dlp).await?;
        }
        Commands::Completion { shell } => {
            cli::commands::completion(shell);
        }
    }

    Ok(())
}
