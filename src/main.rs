use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "api")]
use transcript_search::api::ApiServer;
use transcript_search::config::Config;
use transcript_search::registry::TranscriptVariant;
use transcript_search::search::{SearchEngine, SearchScope};

#[derive(Parser)]
#[command(name = "transcript-search")]
#[command(about = "Find spoken lines in episode transcripts and jump playback to them", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding index.json and the subtitle files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP search API
    #[cfg(feature = "api")]
    Serve {
        /// Port to listen on, overriding the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search for a phrase across one or all episodes
    Search {
        /// Phrase to look for
        query: String,
        /// Episode key, or "all" for the whole series
        #[arg(long, default_value = "all")]
        episode: String,
        /// Search the machine-generated transcript revision
        #[arg(long)]
        ai: bool,
    },
    /// Search one episode and pick the match nearest a playback second
    Locate {
        /// Phrase to look for
        query: String,
        /// Episode key
        #[arg(long)]
        episode: String,
        /// Playback second the link pointed at
        #[arg(long)]
        seconds: u64,
        /// Search the machine-generated transcript revision
        #[arg(long)]
        ai: bool,
    },
    /// List registered episodes
    Episodes,
}

fn variant_for(ai: bool) -> TranscriptVariant {
    if ai {
        TranscriptVariant::Ai
    } else {
        TranscriptVariant::Original
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve configuration before logging so the configured filter applies.
    let (mut config, config_err) = match &cli.config {
        Some(path) => (Config::load_path(path)?, None),
        None => match Config::load() {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e)),
        },
    };
    if let Some(dir) = &cli.data_dir {
        config.data.dir = dir.clone();
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(e) = config_err {
        warn!("Failed to load config, using defaults: {}", e);
    }

    match cli.command {
        #[cfg(feature = "api")]
        Commands::Serve { port } => {
            config.validate()?;
            let port = port.unwrap_or(config.server.port);
            let host = config.server.host.clone();

            info!("🚀 Transcript search starting...");
            info!("📁 Data directory: {}", config.data.dir.display());

            let engine = std::sync::Arc::new(SearchEngine::new(&config));
            ApiServer::new(engine, host, port).start().await?;
        }

        Commands::Search { query, episode, ai } => {
            let engine = SearchEngine::new(&config);
            let scope = SearchScope::from_param(&episode);
            let response = engine.search(&query, &scope, variant_for(ai)).await?;

            if response.results.is_empty() {
                println!("nothing found for \"{}\"", response.query);
            } else {
                for result in &response.results {
                    println!(
                        "[{}] {} #{} {}",
                        result.time, result.episode_key, result.cue_index, result.text
                    );
                    println!("    {}", result.youtube_url);
                }
                info!(
                    "🔎 {} match(es) across {} episode(s)",
                    response.results_count,
                    response.episodes_searched.len()
                );
            }
        }

        Commands::Locate {
            query,
            episode,
            seconds,
            ai,
        } => {
            let engine = SearchEngine::new(&config);
            let response = engine
                .locate(&query, &episode, seconds, variant_for(ai))
                .await?;

            match response.selected {
                Some(idx) => {
                    let result = &response.results[idx];
                    println!(
                        "[{}] {} #{} {}",
                        result.time, result.episode_key, result.cue_index, result.text
                    );
                    println!("    {}", result.youtube_url);
                }
                None => println!("nothing found for \"{}\"", response.query),
            }
        }

        Commands::Episodes => {
            let engine = SearchEngine::new(&config);
            let keys = engine.registry().keys().await?;

            if keys.is_empty() {
                info!("📭 No episodes registered");
                return Ok(());
            }

            info!("📚 Found {} registered episode(s):", keys.len());
            for key in &keys {
                if let Some(episode) = engine.registry().get(key).await? {
                    let marker = if episode.srt_ai.is_some() { " [ai]" } else { "" };
                    println!("{}  {}{}", key, episode.youtube_url, marker);
                }
            }
        }
    }

    Ok(())
}
