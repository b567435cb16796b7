//! CLI module for tunetidy

use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "tunetidy", about = "Tidy a personal music library")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize file and folder names, recursively
    Rename {
        /// Library directory (prompted for when omitted)
        #[arg(value_name = "PATH", env = "TUNETIDY_PATH")]
        path: Option<String>,

        /// Show what would be renamed without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove a piece of text from every audio filename in a directory
    Strip {
        /// Text to remove (prompted for when omitted)
        #[arg(short, long)]
        pattern: Option<String>,

        /// Target directory (prompted for when omitted)
        #[arg(value_name = "PATH", env = "TUNETIDY_PATH")]
        path: Option<String>,

        /// Show what would be renamed without renaming
        #[arg(long)]
        dry_run: bool,
    },

    /// Write artist, album and genre tags to the audio files of a directory
    Tag {
        /// Album directory (prompted for when omitted)
        #[arg(value_name = "PATH", env = "TUNETIDY_PATH")]
        path: Option<String>,

        /// Retag files that already have every tag (prompted for when omitted)
        #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
        force: Option<bool>,

        /// Artist to apply
        #[arg(long)]
        artist: Option<String>,

        /// Album to apply
        #[arg(long)]
        album: Option<String>,

        /// Genre to apply
        #[arg(long)]
        genre: Option<String>,

        /// Show what would be tagged without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Download the audio of a YouTube video or playlist as mp3
    Download {
        /// Video or playlist URL (prompted for when omitted)
        url: Option<String>,

        /// Download directory (defaults to ~/download)
        #[arg(short, long, env = "TUNETIDY_DOWNLOAD_DIR")]
        output: Option<String>,

        /// Update yt-dlp before downloading
        #[arg(long)]
        update: bool,

        /// yt-dlp executable to use
        #[arg(long, env = "TUNETIDY_YTDLP", default_value = "yt-dlp")]
        yt_dlp: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
