//! Configuration types shared across crates.

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Prefix for structured environment overrides (e.g. `INVENTORY_SERVER__BIND`).
pub const ENV_PREFIX: &str = "INVENTORY_";

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// API key configuration.
///
/// One shared secret guards every product endpoint. It has no per-user
/// identity, expiry, or rotation.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Expected value of the `X-API-KEY` header.
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: String,
}

impl AuthConfig {
    /// Create a test configuration with the key `testing`.
    ///
    /// **For testing only.**
    pub fn for_testing() -> Self {
        Self {
            api_key: "testing".to_string(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Environment values are parsed loosely, so a numeric key such as
/// `API_KEY=12345` arrives as an integer rather than a string.
fn deserialize_secret<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct SecretVisitor;

    impl serde::de::Visitor<'_> for SecretVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a string")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(SecretVisitor)
}

/// Inventory store configuration.
///
/// Without a `database_url` the store lives in process memory and is lost on
/// restart.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite connection URL (e.g. `sqlite://data/inventory.db`).
    #[serde(default)]
    pub database_url: Option<String>,
    /// Pool size for the relational backend.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seed the fixture products when the store starts empty.
    #[serde(default = "default_seed_fixtures")]
    pub seed_fixtures: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_seed_fixtures() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: default_max_connections(),
            seed_fixtures: default_seed_fixtures(),
        }
    }
}

impl StoreConfig {
    /// Connection URL safe to show to clients and logs.
    pub fn redacted_url(&self) -> String {
        match &self.database_url {
            Some(url) => redact_credentials(url),
            None => "memory://".to_string(),
        }
    }
}

/// Replace any `user:password` userinfo in a URL with `***:***`.
pub fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://***:***{}", &rest[at..]),
        None => url.to_string(),
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// API key configuration (required).
    pub auth: AuthConfig,
    /// Inventory store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Create a test configuration with sensible defaults.
    ///
    /// **For testing only.** Uses the in-memory store with fixtures and the
    /// API key `testing`.
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::for_testing(),
            store: StoreConfig::default(),
        }
    }

    /// Build the layered configuration sources.
    ///
    /// Later sources win: the TOML file (skipped when missing), then
    /// `INVENTORY_`-prefixed variables, then the bare `API_KEY` and
    /// `DATABASE_URL` variables.
    pub fn figment(config_path: impl AsRef<Path>) -> Figment {
        Figment::new()
            .merge(Toml::file(config_path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().filter_map(|key| {
                if key.as_str().eq_ignore_ascii_case("API_KEY") {
                    Some("auth.api_key".into())
                } else if key.as_str().eq_ignore_ascii_case("DATABASE_URL") {
                    Some("store.database_url".into())
                } else {
                    None
                }
            }))
    }

    /// Load and validate configuration.
    pub fn load(config_path: impl AsRef<Path>) -> crate::Result<Self> {
        let config: Self = Self::figment(config_path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.auth.api_key.trim().is_empty() {
            return Err(crate::Error::InvalidConfig(
                "auth.api_key must not be empty".to_string(),
            ));
        }
        if self.store.database_url.is_some() && self.store.max_connections == 0 {
            return Err(crate::Error::InvalidConfig(
                "store.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
