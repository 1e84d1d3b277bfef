use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Everything has a default; a redis backend is only used when one is configured.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` selects the in-process cache.
    pub redis_url: Option<String>,
    pub max_upload_bytes: usize,
    pub upload_cache_ttl_secs: u64,
    pub analysis_cache_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let redis_url = match optional_env("REDIS_URL") {
            Some(url) => Some(url),
            None => redis_url_from_parts(
                &optional_env("REDIS_HOST").unwrap_or_default(),
                &optional_env("REDIS_PORT").unwrap_or_else(|| "6379".to_string()),
                &optional_env("REDIS_PASSWORD").unwrap_or_default(),
            ),
        };

        Ok(Config {
            redis_url,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            upload_cache_ttl_secs: parse_env("UPLOAD_CACHE_TTL_SECS", 3600)?,
            analysis_cache_ttl_secs: parse_env("ANALYSIS_CACHE_TTL_SECS", 1800)?,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis_url: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            upload_cache_ttl_secs: 3600,
            analysis_cache_ttl_secs: 1800,
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

/// Builds a redis URL from host/port/password parts. An empty host means no redis.
pub fn redis_url_from_parts(host: &str, port: &str, password: &str) -> Option<String> {
    let host = host.trim();
    if host.is_empty() {
        return None;
    }
    let port = if port.trim().is_empty() { "6379" } else { port.trim() };
    if password.is_empty() {
        Some(format!("redis://{host}:{port}/"))
    } else {
        Some(format!("redis://:{password}@{host}:{port}/"))
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}
