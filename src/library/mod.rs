//! Library-wide renaming: planning, directory walking and bulk stripping

pub mod planner;
pub mod renamer;
pub mod strip;

pub use planner::EntryKind;
pub use renamer::{RenameSummary, normalize_library};
pub use strip::strip_pattern;
