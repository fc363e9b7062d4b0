//! Storefront configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Configuration for the storefront server and clients.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. Default: "tienda.db".
    pub database_path: Option<String>,
    /// HTTP bind address. Default: "127.0.0.1:8080".
    pub bind_addr: Option<String>,
    /// Client-facing API base URL.
    pub api_base_url: Option<String>,
    /// External auth uids allowed to use the admin endpoints.
    #[serde(default)]
    pub admin_uids: Vec<String>,
    /// Number of read connections in the pool. Default: 4.
    pub read_pool_size: Option<usize>,
}

impl StoreConfig {
    /// Load a config from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns the effective database path.
    pub fn effective_database_path(&self) -> &str {
        self.database_path
            .as_deref()
            .unwrap_or(constants::DEFAULT_DATABASE_PATH)
    }

    /// Returns the effective bind address.
    pub fn effective_bind_addr(&self) -> &str {
        self.bind_addr
            .as_deref()
            .unwrap_or(constants::DEFAULT_BIND_ADDR)
    }

    /// Returns the effective API base URL.
    pub fn effective_api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(constants::DEFAULT_API_BASE_URL)
    }

    /// Returns the effective read pool size.
    pub fn effective_read_pool_size(&self) -> usize {
        self.read_pool_size
            .unwrap_or(constants::DEFAULT_READ_POOL_SIZE)
    }

    /// Whether the given external auth uid is on the admin allow-list.
    pub fn is_admin(&self, uid: &str) -> bool {
        self.admin_uids.iter().any(|u| u == uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_when_fields_absent() {
        let cfg: StoreConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.effective_database_path(), "tienda.db");
        assert_eq!(cfg.effective_read_pool_size(), 4);
        assert!(!cfg.is_admin("anyone"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database_path = \"store.db\"\nadmin_uids = [\"uid-admin-1\"]"
        )
        .unwrap();

        let cfg = StoreConfig::from_toml_path(file.path()).unwrap();
        assert_eq!(cfg.effective_database_path(), "store.db");
        assert!(cfg.is_admin("uid-admin-1"));
        assert!(!cfg.is_admin("uid-other"));
    }
}
