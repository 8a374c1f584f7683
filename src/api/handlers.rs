//! API request handlers

use anyhow::Result;
use serde_json::Value;

use crate::search::{nearest_result, SearchEngine, SearchError, SearchResponse, SearchScope};

use super::models::{EpisodesResponse, SearchParams};

/// Handle health check requests
pub async fn health_check() -> Result<Value> {
    Ok(serde_json::json!({
        "status": "healthy",
        "service": "transcript-search",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle search requests
///
/// Runs the phrase search over the requested scope. When the request carries
/// a deep-link target second, the response additionally marks the result
/// nearest to it.
pub async fn search(
    engine: &SearchEngine,
    params: &SearchParams,
) -> Result<SearchResponse, SearchError> {
    let scope = SearchScope::from_param(&params.episode);
    let mut response = engine.search(&params.q, &scope, params.variant).await?;

    if let Some(target_sec) = params.seconds {
        response.selected = nearest_result(&response.results, target_sec);
    }

    Ok(response)
}

/// Handle episode listing requests
pub async fn list_episodes(engine: &SearchEngine) -> Result<EpisodesResponse> {
    let episodes = engine.registry().keys().await?;
    Ok(EpisodesResponse {
        count: episodes.len(),
        episodes,
    })
}
