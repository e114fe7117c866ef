use flickpick_core::{FlickpickError, Result};
use serde::{Deserialize, Serialize};

/// Recommendation Engine Configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Data file configuration
    #[serde(default)]
    pub data: DataConfig,

    /// Recommendation sizing configuration
    #[serde(default)]
    pub recommendations: RecommendationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (default: 8087)
    pub port: u16,

    /// Worker threads
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// Catalog CSV path
    pub catalog_path: String,

    /// Precomputed similarity table path
    pub similarity_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Rows returned when a request does not name a limit (default: 10)
    pub default_limit: usize,

    /// Cap on the featured listing (default: 50)
    pub featured_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8087,
            workers: None,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            catalog_path: "data/movies.csv".to_string(),
            similarity_path: "data/similarity.bin".to_string(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            featured_limit: 50,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            recommendations: RecommendationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment and config file
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/flickpick").required(false))
            .add_source(
                config::Environment::with_prefix("FLICKPICK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| FlickpickError::Config(e.to_string()))?;

        let config: Self = settings
            .try_deserialize()
            .map_err(|e| FlickpickError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(FlickpickError::Config(
                "server.port must be nonzero".to_string(),
            ));
        }
        if self.recommendations.default_limit == 0 {
            return Err(FlickpickError::Config(
                "recommendations.default_limit must be at least 1".to_string(),
            ));
        }
        if self.recommendations.featured_limit == 0 {
            return Err(FlickpickError::Config(
                "recommendations.featured_limit must be at least 1".to_string(),
            ));
        }
        if self.data.catalog_path.is_empty() {
            return Err(FlickpickError::Config(
                "data.catalog_path must not be empty".to_string(),
            ));
        }
        if self.data.similarity_path.is_empty() {
            return Err(FlickpickError::Config(
                "data.similarity_path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
