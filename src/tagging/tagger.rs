//! Directory-wide artist/album/genre tagging

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::genre::{VALID_GENRES, most_common, normalize_genre};
use super::tags::{AudioTags, read_tags, write_tags};
use crate::config::RunConfig;
use crate::library::{EntryKind, renamer::list_entries};
use crate::naming::{Filename, normalize};

/// Tag values given up front on the command line
#[derive(Debug, Clone, Default)]
pub struct TagRequest {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
}

/// Counters reported after tagging a directory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagSummary {
    pub files: usize,
    pub skipped: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Tag every audio file directly inside the configured directory
///
/// Files that already carry artist, album and genre are left alone unless
/// `force_retag` is set. Missing values are taken from the request, then the
/// most common existing value, then asked for interactively.
pub fn tag_directory(config: &RunConfig, request: &TagRequest) -> Result<TagSummary> {
    let files = audio_files(&config.target_path)?;
    let mut summary = TagSummary {
        files: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        warn!("No audio files found in: {}", config.target_path.display());
        return Ok(summary);
    }
    info!("Found {} audio file(s)", files.len());

    let mut existing = Vec::with_capacity(files.len());
    let mut to_process = Vec::new();

    for path in &files {
        let tags = read_tags(path).unwrap_or_else(|e| {
            warn!("Could not read tags from {}: {:#}", display_name(path), e);
            AudioTags::default()
        });

        if !config.force_retag && tags.is_complete() {
            debug!("{}: already tagged, skipping", display_name(path));
            summary.skipped += 1;
        } else {
            to_process.push(path.clone());
        }
        existing.push(tags);
    }

    if to_process.is_empty() {
        info!("All files already have complete tags");
        return Ok(summary);
    }

    let candidates = candidate_values(request, &existing, config.force_retag);
    let values = resolve_values(candidates)?;
    info!(
        "Tags to apply: artist={:?} album={:?} genre={:?}",
        values.artist, values.album, values.genre
    );

    if values.is_empty() {
        warn!("No tag values to apply");
        return Ok(summary);
    }

    for path in &to_process {
        if config.dry_run {
            info!("Would update: {}", display_name(path));
            summary.updated += 1;
            continue;
        }
        match write_tags(path, &values) {
            Ok(()) => {
                info!("Updated: {}", display_name(path));
                summary.updated += 1;
            }
            Err(e) => {
                warn!("Failed to update {}: {:#}", display_name(path), e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Raw values before prompting: explicit request, then (unless forced) the
/// most common existing value
pub fn candidate_values(request: &TagRequest, existing: &[AudioTags], force: bool) -> AudioTags {
    let common = |field: fn(&AudioTags) -> Option<&str>| {
        if force {
            None
        } else {
            most_common(existing.iter().map(field))
        }
    };

    AudioTags {
        artist: request.artist.clone().or_else(|| common(|t| t.artist.as_deref())),
        album: request.album.clone().or_else(|| common(|t| t.album.as_deref())),
        genre: request.genre.clone().or_else(|| common(|t| t.genre.as_deref())),
    }
}

/// Normalize artist and album names; empty values are dropped
pub fn normalize_names(values: &AudioTags) -> AudioTags {
    let clean = |value: &Option<String>| {
        value
            .as_deref()
            .map(normalize)
            .filter(|normalized| !normalized.is_empty())
    };

    AudioTags {
        artist: clean(&values.artist),
        album: clean(&values.album),
        genre: values.genre.clone(),
    }
}

/// Prompt for missing values, normalize names and validate the genre
fn resolve_values(candidates: AudioTags) -> Result<AudioTags> {
    let artist = match candidates.artist {
        Some(artist) => Some(artist),
        None => prompt_optional("Artist name")?,
    };
    let album = match candidates.album {
        Some(album) => Some(album),
        None => prompt_optional("Album name")?,
    };
    let genre = match candidates.genre {
        Some(genre) => Some(genre),
        None => prompt_optional(&format!("Genre ({})", VALID_GENRES.join(", ")))?,
    };

    let genre = match genre.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match normalize_genre(raw) {
            Some(valid) => Some(valid.to_string()),
            None => Some(select_genre(raw)?.to_string()),
        },
    };

    let mut values = normalize_names(&AudioTags {
        artist,
        album,
        genre: None,
    });
    values.genre = genre;
    Ok(values)
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;

    let value = value.trim().to_string();
    Ok((!value.is_empty()).then_some(value))
}

fn select_genre(invalid: &str) -> Result<&'static str> {
    let index = Select::new()
        .with_prompt(format!("Invalid genre '{}', pick one", invalid))
        .items(VALID_GENRES)
        .default(0)
        .interact()
        .context("Failed to read genre selection")?;
    Ok(VALID_GENRES[index])
}

fn audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(list_entries(dir)?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File && Filename::parse(&entry.name).is_audio())
        .map(|entry| dir.join(entry.name))
        .collect())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
