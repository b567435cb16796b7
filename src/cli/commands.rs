//! CLI command handlers

use anyhow::{Context, Result};
use clap_complete::generate;
use colored::Colorize;
use dialoguer::Input;
use std::io;
use std::path::PathBuf;

use crate::config::{RunConfig, expand_home};
use crate::download::{DownloadOutcome, Downloader, YtDlp, default_download_dir, is_playlist, validate_url};
use crate::library::{self, RenameSummary};
use crate::tagging::{self, TagRequest};

/// Handle the `rename` command
pub fn rename(path: Option<String>, dry_run: bool) -> Result<()> {
    let config = RunConfig::resolve(path)?.with_dry_run(dry_run);

    println!(
        "{} {}",
        "Normalizing names under".cyan(),
        config.target_path.display()
    );
    if config.dry_run {
        println!("{}", "Dry run: nothing will be renamed".yellow());
    }
    println!();

    let summary = library::normalize_library(&config.target_path, config.dry_run)?;
    print_rename_summary(&summary, config.dry_run);
    println!("  Directories visited: {}", summary.directories);

    Ok(())
}

/// Handle the `strip` command
pub fn strip(pattern: Option<String>, path: Option<String>, dry_run: bool) -> Result<()> {
    let config = RunConfig::resolve(path)?
        .with_pattern_to_strip(pattern)?
        .with_dry_run(dry_run);
    let pattern = config
        .pattern_to_strip
        .as_deref()
        .context("No pattern to strip")?;

    println!(
        "{} {:?} {} {}",
        "Removing".cyan(),
        pattern,
        "from filenames in".cyan(),
        config.target_path.display()
    );
    println!();

    let summary = library::strip_pattern(&config.target_path, pattern, config.dry_run)?;
    print_rename_summary(&summary, config.dry_run);

    Ok(())
}

/// Handle the `tag` command
pub fn tag(
    path: Option<String>,
    force: Option<bool>,
    request: TagRequest,
    dry_run: bool,
) -> Result<()> {
    let config = RunConfig::resolve(path)?
        .with_force_retag(force)?
        .with_dry_run(dry_run);

    println!(
        "{} {}",
        "Tagging audio files in".cyan(),
        config.target_path.display()
    );
    println!();

    let summary = tagging::tag_directory(&config, &request)?;

    println!();
    if summary.files == 0 {
        println!("{}", "No audio files found.".yellow());
        return Ok(());
    }

    let verb = if config.dry_run { "Would tag" } else { "Tagged" };
    println!("{}", "Tagging complete!".green().bold());
    println!("  {}: {}", verb, summary.updated);
    println!("  Already tagged: {}", summary.skipped);
    if summary.failed > 0 {
        println!("  {}: {}", "Failed".red(), summary.failed);
    }

    Ok(())
}

/// Handle the `download` command
pub async fn download(
    url: Option<String>,
    output: Option<String>,
    update: bool,
    yt_dlp: String,
) -> Result<()> {
    let raw_url = match url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("YouTube video or playlist URL")
            .interact_text()
            .context("Failed to read URL")?,
    };
    let url = validate_url(&raw_url)?;

    let root = match output {
        Some(output) => expand_home(output.trim())?,
        None => default_download_dir().context("Could not determine home directory")?,
    };
    std::fs::create_dir_all(&root)
        .with_context(|| format!("Failed to create download directory {}", root.display()))?;

    let ytdlp = YtDlp::new(PathBuf::from(yt_dlp));
    if update {
        ytdlp.self_update().await;
    }

    let downloader = Downloader::new(ytdlp, root.clone())?;

    if is_playlist(&url) {
        println!("{}", "Fetching playlist...".cyan());
        let summary = downloader.download_playlist(url.as_str()).await?;

        println!();
        println!("{}", "Playlist download complete!".green().bold());
        if !summary.title.is_empty() {
            println!("  Playlist: {}", summary.title);
        }
        println!("  Downloaded: {}", summary.downloaded);
        println!("  Already present: {}", summary.skipped);
        if summary.failed > 0 {
            println!("  {}: {}", "Failed".red(), summary.failed);
        }
    } else {
        println!("{}", "Downloading...".cyan());
        match downloader.download_one(url.as_str(), None).await? {
            DownloadOutcome::Downloaded(path) => {
                println!("{} {}", "Downloaded".green().bold(), path.display());
            }
            DownloadOutcome::AlreadyExists(path) => {
                println!("{} {}", "Already exists:".yellow(), path.display());
            }
        }
    }

    Ok(())
}

/// Handle the `completion` command
pub fn completion(shell: clap_complete::Shell) {
    let mut cmd = super::Cli::command();
    generate(shell, &mut cmd, "tunetidy", &mut io::stdout());
}

fn print_rename_summary(summary: &RenameSummary, dry_run: bool) {
    println!();
    if summary.renamed == 0 && summary.failed == 0 && summary.skipped == 0 {
        println!("{}", "Everything is already tidy.".green());
        return;
    }

    let verb = if dry_run { "Would rename" } else { "Renamed" };
    println!("{}", "Done!".green().bold());
    println!("  {}: {}", verb, summary.renamed);
    if summary.skipped > 0 {
        println!("  {}: {}", "Skipped (target exists)".yellow(), summary.skipped);
    }
    if summary.failed > 0 {
        println!("  {}: {}", "Failed".red(), summary.failed);
    }
}

// Extension trait for Cli to get clap Command
impl super::Cli {
    fn command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }
}
