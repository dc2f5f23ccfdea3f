//! Application configuration parsed from environment variables.

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {var}")]
    Missing { var: String },
    #[error("invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Remote API base URL, without a trailing slash.
    pub api_base_url: String,
    pub port: u16,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Treat expired self-describing (JWT) tokens as absent in the route guard.
    pub verify_token_expiry: bool,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `API_BASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: inferred from an `https://` base URL when absent
    /// - `GUARD_VERIFY_TOKEN_EXPIRY`: default false
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .map(|raw| raw.trim().trim_end_matches('/').to_owned())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::Missing { var: "API_BASE_URL".into() })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT".into(), value: raw })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE".into(), value: raw })?,
            None => api_base_url.starts_with("https://"),
        };

        let verify_token_expiry = match lookup("GUARD_VERIFY_TOKEN_EXPIRY") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                var: "GUARD_VERIFY_TOKEN_EXPIRY".into(),
                value: raw,
            })?,
            None => false,
        };

        Ok(Self { api_base_url, port, cookie_secure, verify_token_expiry })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
