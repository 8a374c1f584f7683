//! In-memory transcript cache keyed by episode and variant.
//!
//! Cue sequences are parsed once and shared behind `Arc`, so concurrent
//! searches over the same episode never reparse the file. Soft failures
//! (unknown episode, missing variant, unreadable file) cache an empty
//! sequence; only registry failures propagate.

use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::registry::{EpisodeRegistry, TranscriptVariant};
use crate::subtitles::{parse_srt, Cue};

type CacheKey = (String, TranscriptVariant);

/// Cache of parsed cue sequences, one per episode and transcript variant.
#[derive(Debug)]
pub struct TranscriptCache {
    registry: Arc<EpisodeRegistry>,
    data_dir: PathBuf,
    cues: RwLock<HashMap<CacheKey, Arc<[Cue]>>>,
}

impl TranscriptCache {
    pub fn new(registry: Arc<EpisodeRegistry>, data_dir: &Path) -> Self {
        Self {
            registry,
            data_dir: data_dir.to_path_buf(),
            cues: RwLock::new(HashMap::new()),
        }
    }

    /// Cue sequence for an episode, parsing and caching it on first access.
    ///
    /// When two tasks race on the same uncached key, the first stored
    /// sequence wins and the loser's parse is discarded, so callers always
    /// converge on one shared sequence.
    pub async fn load(
        &self,
        episode_key: &str,
        variant: TranscriptVariant,
    ) -> Result<Arc<[Cue]>> {
        let cache_key = (episode_key.to_string(), variant);
        {
            let cues = self.cues.read().await;
            if let Some(sequence) = cues.get(&cache_key) {
                return Ok(sequence.clone());
            }
        }

        let parsed = self.load_uncached(episode_key, variant).await?;
        let mut cues = self.cues.write().await;
        let sequence = cues
            .entry(cache_key)
            .or_insert_with(|| parsed.into())
            .clone();
        Ok(sequence)
    }

    /// Number of cached sequences.
    pub async fn len(&self) -> usize {
        self.cues.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cues.read().await.is_empty()
    }

    /// Drop all cached sequences, forcing a reparse on next access.
    pub async fn clear(&self) {
        let mut cues = self.cues.write().await;
        let dropped = cues.len();
        cues.clear();
        debug!("🗑️ Cleared {} cached transcripts", dropped);
    }

    async fn load_uncached(
        &self,
        episode_key: &str,
        variant: TranscriptVariant,
    ) -> Result<Vec<Cue>> {
        let config = match self.registry.get(episode_key).await? {
            Some(config) => config,
            None => {
                debug!("Cache miss: unknown episode {}", episode_key);
                return Ok(Vec::new());
            }
        };

        let source = match config.subtitle_source(variant) {
            Some(source) => source,
            None => {
                debug!(
                    "Cache miss: episode {} has no {:?} transcript",
                    episode_key, variant
                );
                return Ok(Vec::new());
            }
        };

        let path = self.data_dir.join(source.strip_prefix("./").unwrap_or(source));
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let cues = parse_srt(&content);
                debug!(
                    "Parsed {} cues for {} from {}",
                    cues.len(),
                    episode_key,
                    path.display()
                );
                Ok(cues)
            }
            Err(e) => {
                warn!("Failed to read transcript {}: {}", path.display(), e);
                Ok(Vec::new())
            }
        }
    }
}
