//! Filename normalization and shared-pattern detection

mod artifact;
mod filename;
mod normalize;
mod patterns;
mod track;

pub use artifact::strip_html_entity_artifact;
pub use filename::Filename;
pub use normalize::normalize;
pub use patterns::{Pattern, PatternKind, apply_patterns, detect_patterns};
pub use track::{should_strip_track_numbers, strip_track_number};
