use crate::account_actor::{AccountError, CredentialHasher};
use std::path::PathBuf;

/// Store configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the CSV files
    pub data_dir: PathBuf,
    /// Stock at or below this level counts as low
    pub low_stock_threshold: u32,
    /// Mailbox size of each actor
    pub channel_buffer: usize,
    /// Seed the default catalog and accounts when the files are empty
    pub seed_defaults: bool,
    /// Username the console places orders for
    pub console_user: String,
    /// Argon2 memory cost in KiB, argon2 default when unset
    pub hash_memory_kib: Option<u32>,
    /// Argon2 iteration count, argon2 default when unset
    pub hash_iterations: Option<u32>,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("CANDY_STORE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            low_stock_threshold: env_parse("CANDY_STORE_LOW_STOCK_THRESHOLD")
                .unwrap_or(defaults.low_stock_threshold),
            channel_buffer: env_parse("CANDY_STORE_CHANNEL_BUFFER")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.channel_buffer),
            seed_defaults: env_parse("CANDY_STORE_SEED_DEFAULTS").unwrap_or(defaults.seed_defaults),
            console_user: std::env::var("CANDY_STORE_CONSOLE_USER")
                .unwrap_or(defaults.console_user),
            hash_memory_kib: env_parse("CANDY_STORE_HASH_MEMORY_KIB"),
            hash_iterations: env_parse("CANDY_STORE_HASH_ITERATIONS"),
        }
    }

    /// Config for a throwaway store under `data_dir`, with cheap hashing.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            hash_memory_kib: Some(8),
            hash_iterations: Some(1),
            ..Self::default()
        }
    }

    pub fn hasher(&self) -> Result<CredentialHasher, AccountError> {
        match (self.hash_memory_kib, self.hash_iterations) {
            (None, None) => Ok(CredentialHasher::default()),
            (memory, iterations) => CredentialHasher::new(
                memory.unwrap_or(argon2::Params::DEFAULT_M_COST),
                iterations.unwrap_or(argon2::Params::DEFAULT_T_COST),
            ),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            low_stock_threshold: 10,
            channel_buffer: 32,
            seed_defaults: true,
            console_user: "customer".to_string(),
            hash_memory_kib: None,
            hash_iterations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.low_stock_threshold, 10);
        assert!(config.seed_defaults);
        assert!(config.hasher().is_ok());
    }

    #[test]
    fn test_bad_hash_params_fail() {
        let config = StoreConfig {
            hash_memory_kib: Some(0),
            ..StoreConfig::default()
        };
        assert!(matches!(config.hasher(), Err(AccountError::Hashing(_))));
    }
}
