use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DB_ENV: &str = "POCKETLEDGER_DB";
pub(crate) const LOG_ENV: &str = "POCKETLEDGER_LOG";
pub(crate) const CURRENCY_ENV: &str = "POCKETLEDGER_CURRENCY";

const DEFAULT_LOG_FILTER: &str = "pocketledger=info";
const DEFAULT_CURRENCY: &str = "₹";

/// Runtime settings, resolved once at startup from the environment and the
/// platform data directory.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
    pub(crate) currency_symbol: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "pocketledger", "PocketLedger")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Ok(Self::resolve(data_dir, |key| std::env::var(key).ok()))
    }

    /// Build a config from a data directory and an environment lookup.
    pub(crate) fn resolve(data_dir: PathBuf, env: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let db_path = non_empty(DB_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("pocketledger.db"));

        Self {
            db_path,
            log_filter: non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            currency_symbol: non_empty(CURRENCY_ENV)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            data_dir,
        }
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.data_dir.join("pocketledger.log")
    }
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
    fn test_defaults() {
        let cfg = Config::resolve(PathBuf::from("/data"), lookup(&[]));
        assert_eq!(cfg.db_path, PathBuf::from("/data/pocketledger.db"));
        assert_eq!(cfg.log_filter, "pocketledger=info");
        assert_eq!(cfg.currency_symbol, "₹");
        assert_eq!(cfg.log_path(), PathBuf::from("/data/pocketledger.log"));
    }

    #[test]
    fn test_env_overrides() {
        let cfg = Config::resolve(
            PathBuf::from("/data"),
            lookup(&[
                (DB_ENV, "/tmp/other.db"),
                (LOG_ENV, "debug"),
                (CURRENCY_ENV, "$"),
            ]),
        );
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.currency_symbol, "$");
    }

    #[test]
    fn test_blank_env_ignored() {
        let cfg = Config::resolve(PathBuf::from("/data"), lookup(&[(DB_ENV, "  ")]));
        assert_eq!(cfg.db_path, PathBuf::from("/data/pocketledger.db"));
    }
}
