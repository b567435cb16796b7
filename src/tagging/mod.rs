//! Artist/album/genre tagging of audio files

pub mod genre;
pub mod tagger;
pub mod tags;

pub use tagger::{TagRequest, tag_directory};
