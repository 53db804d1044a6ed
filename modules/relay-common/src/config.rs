use std::env;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Apify
    pub apify_api_token: String,
    pub apify_base_url: String,
    pub reddit_actor_id: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let web_port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            apify_api_token: lookup("APIFY_API_TOKEN")
                .or_else(|| lookup("VITE_APIFY_API_KEY"))
                .unwrap_or_default(),
            apify_base_url: lookup("APIFY_BASE_URL")
                .unwrap_or_else(|| apify_client::DEFAULT_BASE_URL.to_string()),
            reddit_actor_id: lookup("APIFY_REDDIT_ACTOR")
                .unwrap_or_else(|| apify_client::REDDIT_SCRAPER.to_string()),
            web_host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            web_port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }

    fn log_keys(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  APIFY_API_TOKEN: {}", preview(&self.apify_api_token));
        tracing::info!("  APIFY_BASE_URL: {}", self.apify_base_url);
        tracing::info!("  APIFY_REDDIT_ACTOR: {}", self.reddit_actor_id);
        if self.apify_api_token.is_empty() {
            tracing::warn!("No Apify token configured; every scrape will be rejected by the platform");
        }
    }
}

/// First five characters of a secret plus its length, for startup logs.
fn preview(val: &str) -> String {
    if val.is_empty() {
        return "<not set>".to_string();
    }
    let head: String = val.chars().take(5).collect();
    format!("{}...({} chars)", head, val.chars().count())
}
