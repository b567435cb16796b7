//! Reading and writing artist/album/genre tags via lofty

use anyhow::{Context, Result};
use lofty::config::WriteOptions;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use std::path::Path;
use tracing::debug;

/// The tag fields this tool manages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioTags {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
}

impl AudioTags {
    /// True when artist, album and genre are all set
    pub fn is_complete(&self) -> bool {
        [&self.artist, &self.album, &self.genre]
            .iter()
            .all(|value| value.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.album.is_none() && self.genre.is_none()
    }
}

/// Read the managed fields from an audio file
///
/// Uses the primary tag when present, otherwise the first tag found.
pub fn read_tags(path: &Path) -> Result<AudioTags> {
    let tagged_file = Probe::open(path)
        .context("Failed to open audio file")?
        .read()
        .context("Failed to read audio file tags")?;

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        debug!("No tags in {}", path.display());
        return Ok(AudioTags::default());
    };

    Ok(AudioTags {
        artist: tag.artist().map(|v| v.into_owned()),
        album: tag.album().map(|v| v.into_owned()),
        genre: tag.genre().map(|v| v.into_owned()),
    })
}

/// Write every field that is set, leaving the others untouched
///
/// A tag of the file's primary type is created when the file has none.
pub fn write_tags(path: &Path, tags: &AudioTags) -> Result<()> {
    let mut tagged_file = Probe::open(path)
        .context("Failed to open audio file")?
        .read()
        .context("Failed to read audio file tags")?;

    if tagged_file.primary_tag().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .primary_tag_mut()
        .context("Failed to create tag")?;

    if let Some(artist) = &tags.artist {
        tag.set_artist(artist.clone());
    }
    if let Some(album) = &tags.album {
        tag.set_album(album.clone());
    }
    if let Some(genre) = &tags.genre {
        tag.set_genre(genre.clone());
    }

    tagged_file
        .save_to_path(path, WriteOptions::default())
        .context("Failed to save audio file tags")?;

    debug!("Wrote tags to {}", path.display());
    Ok(())
}
