//! Phrase search across episode transcripts.
//!
//! The engine validates the query, expands the search scope to concrete
//! episode keys, scans each episode's cached cue sequence in order and
//! builds playback URLs for every hit, stopping at the global result cap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::cache::TranscriptCache;
use crate::config::Config;
use crate::registry::{EpisodeRegistry, TranscriptVariant};
use crate::subtitles::timecode::format_clock;
use crate::youtube;

pub mod nearest;
pub mod normalize;

// Re-export main types for easy access
pub use nearest::nearest_result;
pub use normalize::normalize_for_search;

/// Hard ceiling on results per search, across all episodes.
pub const RESULT_CAP: usize = 50;

/// Minimum length of the normalized query, in characters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Which episodes a search covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Every episode in the registry, in document order.
    All,
    /// An explicit list of episode keys.
    Episodes(Vec<String>),
}

impl SearchScope {
    /// Scope from a request parameter: the `all` wildcard or one episode key.
    pub fn from_param(param: &str) -> Self {
        if param == "all" {
            SearchScope::All
        } else {
            SearchScope::Episodes(vec![param.to_string()])
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::All => f.write_str("all"),
            SearchScope::Episodes(keys) => f.write_str(&keys.join(",")),
        }
    }
}

/// Why a search request was rejected.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query must not be empty")]
    EmptyQuery,
    #[error("query too short: needs at least 2 searchable characters")]
    QueryTooShort,
    #[error("unknown episode: {0}")]
    UnknownEpisode(String),
    #[error("registry unavailable: {0}")]
    Registry(#[from] anyhow::Error),
}

/// One matching cue with everything a player needs to jump to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Episode the cue belongs to.
    pub episode_key: String,
    /// Cue number within the transcript file.
    pub cue_index: i64,
    /// Playback position of the cue in whole seconds.
    pub start_sec: u64,
    /// End of the cue in whole seconds, never before `start_sec`.
    pub end_sec: u64,
    /// Human-readable clock label for the start position.
    pub time: String,
    /// Cue text as written in the transcript.
    pub text: String,
    /// Direct watch link starting playback at the cue.
    pub youtube_url: String,
    /// Privacy-enhanced embed link starting playback at the cue.
    pub embed_url: String,
}

/// Full search outcome, shaped like the wire response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Echo of the requested scope (`all` or the episode key).
    pub episode_key: String,
    /// Query as received, trimmed.
    pub query: String,
    /// Episode keys actually scanned, in traversal order.
    pub episodes_searched: Vec<String>,
    /// Number of results returned.
    pub results_count: usize,
    /// Matching cues in episode traversal order, capped at [`RESULT_CAP`].
    pub results: Vec<SearchResult>,
    /// Index into `results` nearest a deep-link target second, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
}

/// Transcript search engine shared by the CLI and the HTTP API.
#[derive(Debug)]
pub struct SearchEngine {
    registry: Arc<EpisodeRegistry>,
    cache: TranscriptCache,
}

impl SearchEngine {
    pub fn new(config: &Config) -> Self {
        let registry = Arc::new(EpisodeRegistry::new(&config.data.dir));
        let cache = TranscriptCache::new(registry.clone(), &config.data.dir);
        Self { registry, cache }
    }

    /// Registry backing this engine, for episode listings.
    pub fn registry(&self) -> &EpisodeRegistry {
        &self.registry
    }

    /// Run a phrase search over the given scope.
    ///
    /// Episodes missing from the registry or without a resolvable YouTube
    /// video id are skipped silently, except that a search scoped to exactly
    /// one unknown episode is rejected with [`SearchError::UnknownEpisode`].
    pub async fn search(
        &self,
        query: &str,
        scope: &SearchScope,
        variant: TranscriptVariant,
    ) -> Result<SearchResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let needle = normalize_for_search(query);
        if needle.chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::QueryTooShort);
        }

        let episode_keys = self.expand_scope(scope).await?;

        let mut results = Vec::new();
        'episodes: for episode_key in &episode_keys {
            let config = match self.registry.get(episode_key).await? {
                Some(config) => config,
                None => continue,
            };
            let video_id = match youtube::extract_video_id(&config.youtube_url) {
                Some(video_id) => video_id,
                None => {
                    debug!(
                        "Skipping episode {} with unresolvable video URL",
                        episode_key
                    );
                    continue;
                }
            };

            let cues = self.cache.load(episode_key, variant).await?;
            for cue in cues.iter() {
                if cue.text.is_empty() {
                    continue;
                }
                if !normalize_for_search(&cue.text).contains(&needle) {
                    continue;
                }

                let start_sec = cue.start_sec();
                results.push(SearchResult {
                    episode_key: episode_key.clone(),
                    cue_index: cue.index,
                    start_sec,
                    end_sec: cue.end_sec(),
                    time: format_clock(start_sec as f64),
                    text: cue.text.clone(),
                    youtube_url: youtube::watch_url(&video_id, start_sec),
                    embed_url: youtube::embed_url(&video_id, start_sec),
                });
                if results.len() >= RESULT_CAP {
                    break 'episodes;
                }
            }
        }

        debug!(
            "Query \"{}\" matched {} cue(s) across {} episode(s)",
            query,
            results.len(),
            episode_keys.len()
        );

        Ok(SearchResponse {
            episode_key: scope.to_string(),
            query: query.to_string(),
            episodes_searched: episode_keys,
            results_count: results.len(),
            results,
            selected: None,
        })
    }

    /// Search one episode and mark the result nearest to `target_sec`.
    ///
    /// This resolves deep links of the form "this phrase, around this moment".
    pub async fn locate(
        &self,
        query: &str,
        episode_key: &str,
        target_sec: u64,
        variant: TranscriptVariant,
    ) -> Result<SearchResponse, SearchError> {
        let scope = SearchScope::Episodes(vec![episode_key.to_string()]);
        let mut response = self.search(query, &scope, variant).await?;
        response.selected = nearest_result(&response.results, target_sec);
        Ok(response)
    }

    async fn expand_scope(&self, scope: &SearchScope) -> Result<Vec<String>, SearchError> {
        match scope {
            SearchScope::All => Ok(self
                .registry
                .all()
                .await?
                .into_iter()
                .map(|(key, _)| key)
                .collect()),
            SearchScope::Episodes(keys) => {
                // A single unknown key is a caller mistake worth a hard error;
                // unknown keys inside a larger list are skipped during the scan.
                if let [key] = keys.as_slice() {
                    if self.registry.get(key).await?.is_none() {
                        return Err(SearchError::UnknownEpisode(key.clone()));
                    }
                }
                Ok(keys.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_param() {
        assert_eq!(SearchScope::from_param("all"), SearchScope::All);
        assert_eq!(
            SearchScope::from_param("s1e1"),
            SearchScope::Episodes(vec!["s1e1".to_string()])
        );
        // The wildcard is case-sensitive.
        assert_eq!(
            SearchScope::from_param("All"),
            SearchScope::Episodes(vec!["All".to_string()])
        );
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(SearchScope::All.to_string(), "all");
        let scope = SearchScope::Episodes(vec!["s1e1".to_string(), "s1e2".to_string()]);
        assert_eq!(scope.to_string(), "s1e1,s1e2");
    }

    #[test]
    fn test_response_wire_shape() {
        let response = SearchResponse {
            episode_key: "all".to_string(),
            query: "hello".to_string(),
            episodes_searched: vec!["s1e1".to_string()],
            results_count: 1,
            results: vec![SearchResult {
                episode_key: "s1e1".to_string(),
                cue_index: 3,
                start_sec: 61,
                end_sec: 64,
                time: "01:01".to_string(),
                text: "Hello world".to_string(),
                youtube_url: "https://www.youtube.com/watch?v=abc&t=61s".to_string(),
                embed_url: "https://www.youtube-nocookie.com/embed/abc?start=61".to_string(),
            }],
            selected: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["episodeKey"], "all");
        assert_eq!(value["resultsCount"], 1);
        assert_eq!(value["episodesSearched"][0], "s1e1");
        assert_eq!(value["results"][0]["cueIndex"], 3);
        assert_eq!(value["results"][0]["startSec"], 61);
        assert_eq!(value["results"][0]["endSec"], 64);
        assert_eq!(value["results"][0]["youtubeUrl"], "https://www.youtube.com/watch?v=abc&t=61s");
        // Absent unless a deep-link target was given.
        assert!(value.get("selected").is_none());
    }

    #[test]
    fn test_selected_serializes_when_present() {
        let response = SearchResponse {
            episode_key: "s1e1".to_string(),
            query: "hello".to_string(),
            episodes_searched: vec!["s1e1".to_string()],
            results_count: 0,
            results: Vec::new(),
            selected: Some(2),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["selected"], 2);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "query must not be empty");
        assert_eq!(
            SearchError::UnknownEpisode("s9e9".to_string()).to_string(),
            "unknown episode: s9e9"
        );
    }
}
