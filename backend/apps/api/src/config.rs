//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
/// Longest accepted token lifetime (one year)
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 3600;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// In-memory storage when absent
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub frontend_origins: Vec<String>,
}

impl ApiConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let mut auth = match get("TOKEN_SECRET") {
            Some(encoded) => AuthConfig {
                token_secret: platform::crypto::from_base64(&encoded)
                    .context("TOKEN_SECRET must be base64")?,
                ..AuthConfig::default()
            },
            None if cfg!(debug_assertions) => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret");
                AuthConfig::with_random_secret()
            }
            None => bail!("TOKEN_SECRET must be set in production"),
        };

        if auth.token_secret.len() < platform::token::MIN_SECRET_LEN {
            bail!(
                "TOKEN_SECRET must decode to at least {} bytes",
                platform::token::MIN_SECRET_LEN
            );
        }

        if let Some(raw) = get("TOKEN_TTL_SECS") {
            let secs: u64 = raw
                .parse()
                .context("TOKEN_TTL_SECS must be a number of seconds")?;
            if secs == 0 {
                bail!("TOKEN_TTL_SECS must be greater than zero");
            }
            if secs > MAX_TOKEN_TTL_SECS {
                bail!("TOKEN_TTL_SECS must be at most {MAX_TOKEN_TTL_SECS}");
            }
            auth.token_ttl = Duration::from_secs(secs);
        }

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            auth,
            frontend_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    fn secret() -> String {
        platform::crypto::to_base64(&[7u8; 32])
    }

    #[test]
    fn test_defaults() {
        let secret = secret();
        let config = load(&[("TOKEN_SECRET", secret.as_str())]).unwrap();
        assert_eq!(config.bind_addr.port(), 31113);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.auth.token_ttl_secs(), 43200);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_overrides() {
        let secret = secret();
        let config = load(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/courses"),
            ("DATABASE_MAX_CONNECTIONS", "20"),
            ("TOKEN_SECRET", secret.as_str()),
            ("TOKEN_TTL_SECS", "60"),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example,"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/courses")
        );
        assert_eq!(config.database_max_connections, 20);
        assert_eq!(config.auth.token_secret, vec![7u8; 32]);
        assert_eq!(config.auth.token_ttl_secs(), 60);
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_token_ttl_upper_bound() {
        let secret = secret();
        let config = load(&[
            ("TOKEN_SECRET", secret.as_str()),
            ("TOKEN_TTL_SECS", "31536000"),
        ])
        .unwrap();
        assert_eq!(config.auth.token_ttl_secs(), MAX_TOKEN_TTL_SECS);
        assert!(config.auth.authenticator().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let short = platform::crypto::to_base64(&[1u8; 8]);
        assert!(load(&[("TOKEN_SECRET", short.as_str())]).is_err());
        assert!(load(&[("TOKEN_SECRET", "not base64!")]).is_err());
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let secret = secret();
        let secret = secret.as_str();
        assert!(load(&[("TOKEN_SECRET", secret), ("TOKEN_TTL_SECS", "0")]).is_err());
        assert!(load(&[("TOKEN_SECRET", secret), ("TOKEN_TTL_SECS", "soon")]).is_err());
        assert!(
            load(&[("TOKEN_SECRET", secret), ("TOKEN_TTL_SECS", "18446744073709551615")]).is_err()
        );
        assert!(load(&[("TOKEN_SECRET", secret), ("TOKEN_TTL_SECS", "31536001")]).is_err());
        assert!(load(&[("TOKEN_SECRET", secret), ("BIND_ADDR", "nowhere")]).is_err());
    }

    #[test]
    fn test_debug_build_generates_secret() {
        if cfg!(debug_assertions) {
            let config = load(&[]).unwrap();
            assert_eq!(config.auth.token_secret.len(), 32);
        }
    }
}
