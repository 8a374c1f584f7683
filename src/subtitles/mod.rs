//! SubRip (SRT) transcript handling: timecode conversion and cue parsing.

use serde::{Deserialize, Serialize};

pub mod parser;
pub mod timecode;

// Re-export main types for easy access
pub use parser::parse_srt;
pub use timecode::{format_clock, parse_timecode};

/// One timed subtitle cue from an SRT transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Cue number as written in the file (not necessarily contiguous).
    pub index: i64,
    /// Start time in milliseconds from the beginning of the video.
    pub start_ms: u64,
    /// End time in milliseconds from the beginning of the video.
    pub end_ms: u64,
    /// Spoken text with internal whitespace collapsed to single spaces.
    pub text: String,
}

impl Cue {
    /// Playback position of this cue in whole seconds, clamped to zero.
    pub fn start_sec(&self) -> u64 {
        self.start_ms / 1000
    }

    /// End position in whole seconds, never before `start_sec`.
    pub fn end_sec(&self) -> u64 {
        (self.end_ms / 1000).max(self.start_sec())
    }
}
