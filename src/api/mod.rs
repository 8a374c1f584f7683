//! API module for the transcript search service
//!
//! Provides REST endpoints for the web player and external integrations.

use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::search::SearchEngine;

pub mod handlers;
pub mod models;
pub mod server;

/// API server wrapping a shared search engine
#[derive(Debug)]
pub struct ApiServer {
    engine: Arc<SearchEngine>,
    host: String,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(engine: Arc<SearchEngine>, host: String, port: u16) -> Self {
        Self { engine, host, port }
    }

    /// Start the API server in the background
    pub fn start_background(self) -> JoinHandle<Result<()>> {
        tokio::spawn(async move { self.start().await })
    }

    /// Start the API server
    pub async fn start(self) -> Result<()> {
        info!("🚀 Starting API server on port {}", self.port);

        server::start_http_server(self.engine, &self.host, self.port).await
    }
}
