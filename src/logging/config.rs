use std::path::PathBuf;

/// Logging settings read from `ENVIRONMENT`, `LOG_LEVEL` and `LOG_DIR`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub environment: String,
    pub level: String,
    pub directory: PathBuf,
}

impl LogConfig {
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        Self::new(
            environment,
            std::env::var("LOG_LEVEL").ok(),
            std::env::var("LOG_DIR").ok(),
        )
    }

    fn new(environment: String, level: Option<String>, directory: Option<String>) -> Self {
        let level = level.unwrap_or_else(|| {
            if environment == "production" {
                "info".to_string()
            } else {
                "debug".to_string()
            }
        });

        Self {
            environment,
            level,
            directory: PathBuf::from(directory.unwrap_or_else(|| "logs".to_string())),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Filter used when `RUST_LOG` is not set.
    pub fn default_filter(&self) -> String {
        format!(
            "storefront_catalog={},tower_http=debug,axum=debug,sqlx=warn",
            self.level
        )
    }
}
