use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got '{0}'")]
    InvalidPort(String),

    #[error("invalid bind address '{0}'")]
    InvalidAddress(String),
}

/// Server configuration loaded from environment variables.
///
/// | Env Var             | Default     |
/// |---------------------|-------------|
/// | `HOST`              | `127.0.0.1` |
/// | `PORT`              | `8001`      |
/// | `CORS_ORIGINS`      | `*`         |
/// | `CATALOG_SEED_PATH` | embedded    |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Allowed origins. `*` (or an empty list) allows any origin.
    pub cors_origins: Vec<String>,
    pub seed_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8001,
            cors_origins: vec!["*".to_string()],
            seed_path: None,
        }
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => defaults.port,
        };

        let cors_origins = std::env::var("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let seed_path = std::env::var("CATALOG_SEED_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            cors_origins,
            seed_path,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
