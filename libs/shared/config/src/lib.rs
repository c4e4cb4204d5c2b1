use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_api_key: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: env::var("HMS_DATABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("HMS_DATABASE_URL not set, using empty value");
                    String::new()
                }),
            database_api_key: env::var("HMS_DATABASE_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("HMS_DATABASE_API_KEY not set, using empty value");
                    String::new()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty()
    }
}
