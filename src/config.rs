use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the transcript search service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the registry document and subtitle files
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP API
    pub host: String,

    /// Port for the HTTP API
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, overridden by RUST_LOG when set
    pub filter: String,
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        // Try to load from various locations
        let config_paths = ["transcript-search.toml", "config/transcript-search.toml"];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        // Try environment variables
        Self::from_env()
    }

    /// Load configuration from an explicit path
    pub fn load_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Fails when no TRANSCRIPT_SEARCH_* variable is set, so callers can
    /// tell "configured via env" apart from "no configuration at all".
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        let mut found = false;

        // Override with environment variables
        if let Ok(dir) = std::env::var("TRANSCRIPT_SEARCH_DATA_DIR") {
            config.data.dir = PathBuf::from(dir);
            found = true;
        }

        if let Ok(port) = std::env::var("TRANSCRIPT_SEARCH_PORT") {
            config.server.port = port.parse().unwrap_or(8080);
            found = true;
        }

        if let Ok(filter) = std::env::var("TRANSCRIPT_SEARCH_LOG") {
            config.logging.filter = filter;
            found = true;
        }

        if found {
            Ok(config)
        } else {
            Err(anyhow!("No configuration file found"))
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.data.dir.exists() {
            return Err(anyhow!(
                "data directory does not exist: {}",
                self.data.dir.display()
            ));
        }

        if self.server.port == 0 {
            return Err(anyhow!("server port must be greater than 0"));
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Transcript Search Configuration:\n\
            - Data Directory: {}\n\
            - Server: {}:{}\n\
            - Log Filter: {}",
            self.data.dir.display(),
            self.server.host,
            self.server.port,
            self.logging.filter
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data"),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "transcript_search=info,warn".to_string(),
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.config.data.dir = dir;
        self
    }

    pub fn with_host(mut self, host: String) -> Self {
        self.config.server.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.config.server.port = port;
        self
    }

    pub fn with_log_filter(mut self, filter: String) -> Self {
        self.config.logging.filter = filter;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
