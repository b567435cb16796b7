//! Run configuration shared by every command
//!
//! Values are resolved once per invocation: command-line flag or environment
//! variable first, an interactive prompt only for what is still missing.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Explicit settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Absolute directory to operate on
    pub target_path: PathBuf,
    /// Rewrite tags even when artist, album and genre are already set
    pub force_retag: bool,
    /// Literal text removed by the `strip` command
    pub pattern_to_strip: Option<String>,
    /// Report what would change without touching the filesystem
    pub dry_run: bool,
}

impl RunConfig {
    pub fn new(target_path: PathBuf) -> Self {
        Self {
            target_path,
            force_retag: false,
            pattern_to_strip: None,
            dry_run: false,
        }
    }

    /// Build a config from an optional path, prompting when it is absent
    pub fn resolve(path: Option<String>) -> Result<Self> {
        let raw = match path {
            Some(path) => path,
            None => Input::<String>::new()
                .with_prompt("Target directory path")
                .interact_text()
                .context("Failed to read target directory")?,
        };

        let target_path = resolve_target_path(&raw)?;
        debug!("Resolved target path: {}", target_path.display());
        Ok(Self::new(target_path))
    }

    pub fn with_force_retag(mut self, force: Option<bool>) -> Result<Self> {
        self.force_retag = match force {
            Some(force) => force,
            None => Confirm::new()
                .with_prompt("Force/redo tags even if they are already set?")
                .default(false)
                .interact()
                .context("Failed to read retag choice")?,
        };
        Ok(self)
    }

    pub fn with_pattern_to_strip(mut self, pattern: Option<String>) -> Result<Self> {
        let pattern = match pattern {
            Some(pattern) => pattern,
            None => Input::<String>::new()
                .with_prompt("Text to remove from filenames")
                .interact_text()
                .context("Failed to read pattern to strip")?,
        };
        if pattern.is_empty() {
            anyhow::bail!("Pattern to strip must not be empty");
        }
        self.pattern_to_strip = Some(pattern);
        Ok(self)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Expand `~`, make absolute and check the path is an existing directory
pub fn resolve_target_path(raw: &str) -> Result<PathBuf> {
    let expanded = expand_home(raw.trim())?;
    let absolute = std::path::absolute(&expanded)
        .with_context(|| format!("Failed to resolve path {:?}", expanded))?;

    if !absolute.exists() {
        anyhow::bail!("Path does not exist: {}", absolute.display());
    }
    if !absolute.is_dir() {
        anyhow::bail!("Path is not a directory: {}", absolute.display());
    }

    Ok(absolute)
}

/// Expand a leading `~` to the home directory
pub fn expand_home(raw: &str) -> Result<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return Ok(PathBuf::from(raw)),
    };

    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(if rest.is_empty() {
        home
    } else {
        home.join(Path::new(rest))
    })
}
