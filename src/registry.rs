//! Episode registry backed by a JSON document in the data directory.
//!
//! The registry maps episode keys (`s1e1`) to their YouTube URL and subtitle
//! file paths. It is read once per process on first use; a failed read is
//! retried on the next access so a missing document does not wedge the
//! process until restart.

use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::info;

/// File name of the registry document inside the data directory.
pub const REGISTRY_FILE: &str = "index.json";

/// Which transcript revision of an episode to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptVariant {
    /// Manually authored subtitles, the default.
    #[default]
    Original,
    /// Machine-generated transcript, when the episode has one.
    Ai,
}

/// Registry entry for a single episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Watch URL of the episode on YouTube.
    pub youtube_url: String,
    /// Path of the original subtitle file, relative to the data directory.
    pub srt: String,
    /// Path of the machine-generated subtitle file, if one exists.
    pub srt_ai: Option<String>,
}

impl EpisodeConfig {
    /// Subtitle path for the requested variant, or `None` when the episode
    /// has no file for it.
    pub fn subtitle_source(&self, variant: TranscriptVariant) -> Option<&str> {
        match variant {
            TranscriptVariant::Original => Some(self.srt.as_str()),
            TranscriptVariant::Ai => self.srt_ai.as_deref(),
        }
    }
}

/// Parsed registry document.
///
/// Keeps entries in document order, which defines the episode traversal
/// order for whole-series searches. A key listed twice keeps its first
/// position but the later entry wins, mirroring JSON object semantics.
#[derive(Debug, Clone)]
pub struct EpisodeIndex {
    entries: Vec<(String, EpisodeConfig)>,
    by_key: HashMap<String, usize>,
}

impl EpisodeIndex {
    pub fn get(&self, key: &str) -> Option<&EpisodeConfig> {
        self.by_key.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[(String, EpisodeConfig)] {
        &self.entries
    }
}

impl<'de> Deserialize<'de> for EpisodeIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = EpisodeIndex;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of episode keys to episode configs")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut by_key = HashMap::new();
                while let Some((key, config)) = map.next_entry::<String, EpisodeConfig>()? {
                    match by_key.get(&key) {
                        Some(&pos) => entries[pos] = (key, config),
                        None => {
                            by_key.insert(key.clone(), entries.len());
                            entries.push((key, config));
                        }
                    }
                }
                Ok(EpisodeIndex { entries, by_key })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}

/// Lazily loaded episode registry.
#[derive(Debug)]
pub struct EpisodeRegistry {
    index_path: PathBuf,
    index: OnceCell<EpisodeIndex>,
}

impl EpisodeRegistry {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            index_path: data_dir.join(REGISTRY_FILE),
            index: OnceCell::new(),
        }
    }

    /// Look up one episode by key.
    pub async fn get(&self, key: &str) -> Result<Option<EpisodeConfig>> {
        Ok(self.index().await?.get(key).cloned())
    }

    /// All entries in registry document order.
    pub async fn all(&self) -> Result<Vec<(String, EpisodeConfig)>> {
        Ok(self.index().await?.entries().to_vec())
    }

    /// Episode keys sorted alphabetically, for listings.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .index()
            .await?
            .entries()
            .iter()
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn index(&self) -> Result<&EpisodeIndex> {
        self.index.get_or_try_init(|| self.load_index()).await
    }

    async fn load_index(&self) -> Result<EpisodeIndex> {
        let raw = tokio::fs::read_to_string(&self.index_path)
            .await
            .with_context(|| {
                format!("failed to read registry document {}", self.index_path.display())
            })?;
        let index: EpisodeIndex = serde_json::from_str(&raw).with_context(|| {
            format!("malformed registry document {}", self.index_path.display())
        })?;
        info!(
            "📚 Loaded {} episodes from {}",
            index.len(),
            self.index_path.display()
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn episode(url: &str, srt: &str) -> String {
        format!(r#"{{ "youtube_url": "{}", "srt": "{}" }}"#, url, srt)
    }

    async fn registry_with(document: &str) -> (TempDir, EpisodeRegistry) {
        let dir = TempDir::new().unwrap();
        tokio::fs::write(dir.path().join(REGISTRY_FILE), document)
            .await
            .unwrap();
        let registry = EpisodeRegistry::new(dir.path());
        (dir, registry)
    }

    #[tokio::test]
    async fn test_get_known_and_unknown_keys() {
        let document = format!(
            r#"{{ "s1e1": {} }}"#,
            episode("https://www.youtube.com/watch?v=abc", "./s1e1.srt")
        );
        let (_dir, registry) = registry_with(&document).await;

        let config = registry.get("s1e1").await.unwrap().unwrap();
        assert_eq!(config.youtube_url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(config.srt, "./s1e1.srt");
        assert_eq!(config.srt_ai, None);

        assert!(registry.get("s9e9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_document_order_preserved_and_keys_sorted() {
        let document = format!(
            r#"{{ "s1e2": {}, "s1e1": {} }}"#,
            episode("https://youtu.be/bbb", "s1e2.srt"),
            episode("https://youtu.be/aaa", "s1e1.srt")
        );
        let (_dir, registry) = registry_with(&document).await;

        let order: Vec<String> = registry
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(order, vec!["s1e2", "s1e1"]);

        assert_eq!(registry.keys().await.unwrap(), vec!["s1e1", "s1e2"]);
    }

    #[tokio::test]
    async fn test_duplicate_key_keeps_position_takes_later_value() {
        let document = format!(
            r#"{{ "s1e1": {}, "s1e2": {}, "s1e1": {} }}"#,
            episode("https://youtu.be/old", "old.srt"),
            episode("https://youtu.be/two", "s1e2.srt"),
            episode("https://youtu.be/new", "new.srt")
        );
        let (_dir, registry) = registry_with(&document).await;

        let entries = registry.all().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "s1e1");
        assert_eq!(entries[0].1.srt, "new.srt");
        assert_eq!(entries[1].0, "s1e2");
    }

    #[tokio::test]
    async fn test_missing_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let registry = EpisodeRegistry::new(dir.path());
        assert!(registry.get("s1e1").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_load_retries_after_document_appears() {
        let dir = TempDir::new().unwrap();
        let registry = EpisodeRegistry::new(dir.path());
        assert!(registry.keys().await.is_err());

        let document = format!(
            r#"{{ "s1e1": {} }}"#,
            episode("https://youtu.be/abc", "s1e1.srt")
        );
        tokio::fs::write(dir.path().join(REGISTRY_FILE), document)
            .await
            .unwrap();
        assert_eq!(registry.keys().await.unwrap(), vec!["s1e1"]);
    }

    #[tokio::test]
    async fn test_malformed_document_is_an_error() {
        let (_dir, registry) = registry_with("{ not json").await;
        assert!(registry.all().await.is_err());
    }

    #[test]
    fn test_subtitle_source_per_variant() {
        let config = EpisodeConfig {
            youtube_url: "https://youtu.be/abc".to_string(),
            srt: "ep.srt".to_string(),
            srt_ai: Some("ep.ai.srt".to_string()),
        };
        assert_eq!(
            config.subtitle_source(TranscriptVariant::Original),
            Some("ep.srt")
        );
        assert_eq!(config.subtitle_source(TranscriptVariant::Ai), Some("ep.ai.srt"));

        let without_ai = EpisodeConfig { srt_ai: None, ..config };
        assert_eq!(without_ai.subtitle_source(TranscriptVariant::Ai), None);
    }

    #[test]
    fn test_variant_wire_names() {
        assert_eq!(
            serde_json::to_string(&TranscriptVariant::Original).unwrap(),
            r#""original""#
        );
        let parsed: TranscriptVariant = serde_json::from_str(r#""ai""#).unwrap();
        assert_eq!(parsed, TranscriptVariant::Ai);
    }
}
