//! Configuration for the bank

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for persisted state (account directory snapshot and
    /// per-account transaction logs)
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data/bank"),
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(data_dir) = std::env::var("BANK_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("./data/bank"));
    }

    #[test]
    fn test_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bank.toml");
        std::fs::write(&path, "data_dir = \"/var/lib/bank\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/bank"));
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("bank.toml");
        std::fs::write(&path, "data_dir = [nope").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)), "got {err:?}");
    }
}
