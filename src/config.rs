use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com";
pub const DEFAULT_SERP_URL: &str = "https://serpapi.com";
pub const DEFAULT_TRENDS_URL: &str = "https://trends.google.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Startup configuration read from the process environment.
///
/// `main` loads a local `.env` through `dotenvy` before calling
/// [`Config::from_env`], so either source works.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub serp_api_key: String,
    pub groq_model: String,
    pub groq_url: String,
    pub serp_url: String,
    pub trends_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let groq_api_key = get("GROQ_API_KEY").ok_or(ConfigError::MissingVar("GROQ_API_KEY"))?;
        let serp_api_key = get("SERP_API_KEY").ok_or(ConfigError::MissingVar("SERP_API_KEY"))?;

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: "BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        Ok(Self {
            groq_api_key,
            serp_api_key,
            groq_model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            groq_url: trim_base(get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_URL.to_string())),
            serp_url: trim_base(get("SERP_API_URL").unwrap_or_else(|| DEFAULT_SERP_URL.to_string())),
            trends_url: trim_base(get("TRENDS_URL").unwrap_or_else(|| DEFAULT_TRENDS_URL.to_string())),
            bind_addr,
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup(&[("GROQ_API_KEY", "g"), ("SERP_API_KEY", "s")])).unwrap();

        assert_eq!(config.groq_api_key, "g");
        assert_eq!(config.serp_api_key, "s");
        assert_eq!(config.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(config.serp_url, DEFAULT_SERP_URL);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_missing_groq_key() {
        let err = Config::from_lookup(lookup(&[("SERP_API_KEY", "s")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("GROQ_API_KEY"));
    }

    #[test]
    fn test_blank_serp_key_is_missing() {
        let err =
            Config::from_lookup(lookup(&[("GROQ_API_KEY", "g"), ("SERP_API_KEY", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("SERP_API_KEY"));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = Config::from_lookup(lookup(&[
            ("GROQ_API_KEY", "g"),
            ("SERP_API_KEY", "s"),
            ("BIND_ADDR", "not-an-addr"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "BIND_ADDR", .. }));
    }

    #[test]
    fn test_base_urls_trimmed() {
        let config = Config::from_lookup(lookup(&[
            ("GROQ_API_KEY", "g"),
            ("SERP_API_KEY", "s"),
            ("SERP_API_URL", "http://localhost:9000/"),
        ]))
        .unwrap();
        assert_eq!(config.serp_url, "http://localhost:9000");
    }
}
