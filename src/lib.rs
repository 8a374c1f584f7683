//! Transcript search for episodic videos.
//!
//! Parses SubRip transcripts into timed cues, caches them per episode and
//! transcript revision, and answers phrase queries with playback URLs that
//! jump straight to the spoken line.

pub mod cache;
pub mod config;
pub mod registry;
pub mod search;
pub mod subtitles;
pub mod youtube;

#[cfg(feature = "api")]
pub mod api;

// Re-export main types for easy access
pub use crate::cache::TranscriptCache;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::registry::{EpisodeConfig, EpisodeRegistry, TranscriptVariant};
pub use crate::search::{
    nearest_result, normalize_for_search, SearchEngine, SearchError, SearchResponse,
    SearchResult, SearchScope, MIN_QUERY_CHARS, RESULT_CAP,
};
pub use crate::subtitles::{format_clock, parse_srt, parse_timecode, Cue};
pub use crate::youtube::extract_video_id;

#[cfg(feature = "api")]
pub use crate::api::ApiServer;
