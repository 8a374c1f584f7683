//! API data models

use serde::{Deserialize, Serialize};

use crate::registry::TranscriptVariant;

/// Query parameters for the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Raw search phrase
    #[serde(default)]
    pub q: String,

    /// Episode key, or "all" for the whole series
    #[serde(default = "default_scope")]
    pub episode: String,

    /// Transcript revision to search
    #[serde(default)]
    pub variant: TranscriptVariant,

    /// Deep-link target second; fills `selected` in the response
    pub seconds: Option<u64>,
}

fn default_scope() -> String {
    "all".to_string()
}

/// Episode listing for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodesResponse {
    pub episodes: Vec<String>,
    pub count: usize,
}
