//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development. The backend URL is
//! optional at startup; handlers that need it fail with a configuration error.

use std::env;
use std::time::Duration;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the fitness backend, without trailing slash
    pub backend_url: Option<String>,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Timeout for ordinary backend calls
    pub backend_timeout: Duration,
    /// Timeout for recommendation fetches (AI generation is slow)
    pub recommendation_timeout: Duration,
    /// Mark the session cookie `Secure`
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = match var("BACKEND_URL") {
            Some(url) => Some(normalize_base_url("BACKEND_URL", &url)?),
            None => None,
        };

        Ok(Self {
            backend_url,
            frontend_url: var("FRONTEND_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_or("PORT", var("PORT"), 8080)?,
            backend_timeout: Duration::from_secs(parse_or(
                "BACKEND_TIMEOUT_SECS",
                var("BACKEND_TIMEOUT_SECS"),
                10,
            )?),
            recommendation_timeout: Duration::from_secs(parse_or(
                "RECOMMENDATION_TIMEOUT_SECS",
                var("RECOMMENDATION_TIMEOUT_SECS"),
                15,
            )?),
            secure_cookies: parse_or("COOKIE_SECURE", var("COOKIE_SECURE"), false)?,
        })
    }

    /// Config for tests: no backend, short timeouts.
    pub fn test_default() -> Self {
        Self {
            backend_url: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: 8080,
            backend_timeout: Duration::from_secs(5),
            recommendation_timeout: Duration::from_secs(5),
            secure_cookies: false,
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }
}

fn normalize_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).expect("Config should load");

        assert_eq!(config.backend_url, None);
        assert_eq!(config.frontend_url, "http://localhost:3000");
        assert_eq!(config.port, 8080);
        assert_eq!(config.backend_timeout, Duration::from_secs(10));
        assert_eq!(config.recommendation_timeout, Duration::from_secs(15));
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_explicit_values() {
        let config = load(&[
            ("BACKEND_URL", "http://localhost:8081/"),
            ("PORT", "9000"),
            ("BACKEND_TIMEOUT_SECS", "3"),
            ("COOKIE_SECURE", "true"),
        ])
        .expect("Config should load");

        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:8081"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.backend_timeout, Duration::from_secs(3));
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_blank_backend_url_is_unset() {
        let config = load(&[("BACKEND_URL", "   ")]).unwrap();
        assert_eq!(config.backend_url, None);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let err = load(&[("BACKEND_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BACKEND_URL", .. }));

        let err = load(&[("BACKEND_URL", "ftp://files.example.com")]).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));

        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn test_with_backend_url_strips_slash() {
        let config = Config::test_default().with_backend_url("http://127.0.0.1:9999/");
        assert_eq!(config.backend_url.as_deref(), Some("http://127.0.0.1:9999"));
    }
}
