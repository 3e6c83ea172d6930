use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub rust_log: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Session lifetime in minutes. Fixed per session; no renewal.
    pub ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let ttl_minutes: i64 = env::var("SESSION_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;

        Ok(Config {
            server: ServerConfig {
                port,
                host,
                rust_log,
            },
            session: SessionConfig { ttl_minutes },
        })
    }
}
