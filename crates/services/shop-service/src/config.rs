//! Shop service configuration.

use std::env;
use std::time::Duration;

use common::{parse_or, DatabaseConfig, PasswordHashConfig, DEFAULT_DATABASE_URL};

/// Shop service configuration.
#[derive(Debug, Clone, Default)]
pub struct ShopServiceConfig {
    /// Connection pool settings (URL redacted in `Debug`)
    pub database: DatabaseConfig,
    /// Argon2id cost parameters for new hashes
    pub password_hash: PasswordHashConfig,
    /// Deadline applied to every use-case call, if set
    pub request_timeout: Option<Duration>,
}

impl ShopServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first. Missing or malformed numbers fall back to defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_defaults = DatabaseConfig::default();
        let hash_defaults = PasswordHashConfig::default();

        Self {
            database: DatabaseConfig {
                url: lookup("SHOP_SERVICE_DATABASE_URL")
                    .or_else(|| lookup("DATABASE_URL"))
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_or(
                    lookup("DATABASE_MAX_CONNECTIONS"),
                    db_defaults.max_connections,
                ),
                min_connections: parse_or(
                    lookup("DATABASE_MIN_CONNECTIONS"),
                    db_defaults.min_connections,
                ),
                connect_timeout_secs: parse_or(
                    lookup("DATABASE_CONNECT_TIMEOUT_SECS"),
                    db_defaults.connect_timeout_secs,
                ),
            },
            password_hash: PasswordHashConfig {
                memory_kib: parse_or(lookup("PASSWORD_HASH_MEMORY_KIB"), hash_defaults.memory_kib),
                iterations: parse_or(lookup("PASSWORD_HASH_ITERATIONS"), hash_defaults.iterations),
                parallelism: parse_or(
                    lookup("PASSWORD_HASH_PARALLELISM"),
                    hash_defaults.parallelism,
                ),
            },
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}
