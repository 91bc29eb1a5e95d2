use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use dashboard_core::DEFAULT_PAGE_SIZE;
use dashboard_logging::dash_info;
use dashboard_store::StoreSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "dashboard.ron";
const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
const ONE_WEEK_SECS: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let store = StoreSettings::default();
        Self {
            path: store.database,
            collection: store.collection,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    /// Seconds between full reloads from the database.
    pub refresh_interval_secs: u64,
    pub page_size: usize,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            refresh_interval_secs: ONE_WEEK_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Load from `$DASHBOARD_CONFIG`, else `./dashboard.ron`. The default
    /// file may be absent; an explicitly named one must exist.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Self::from_optional_file(Path::new(CONFIG_FILENAME)),
        }
    }

    pub fn from_optional_file(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = ron::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero");
        }
        if self.page_size == 0 {
            bail!("page_size must be greater than zero");
        }
        self.store_settings()
            .validated_collection()
            .context("database.collection")?;
        Ok(())
    }

    pub fn store_settings(&self) -> StoreSettings {
        StoreSettings {
            database: self.database.path.clone(),
            collection: self.database.collection.clone(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn log_summary(&self) {
        dash_info!(
            "Config: database={} collection={} bind={} refresh={}s page_size={}",
            self.database.path.display(),
            self.database.collection,
            self.bind_address(),
            self.refresh_interval_secs,
            self.page_size
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::parse(
            r#"(
                database: (path: "/var/lib/dashboard/recipes.db"),
                server: (port: 9000),
            )"#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/var/lib/dashboard/recipes.db"));
        assert_eq!(config.database.collection, "recipes");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.refresh_interval(), Duration::from_secs(604_800));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.log, LogDestination::Terminal);
    }

    #[test]
    fn full_file_parses() {
        let config = AppConfig::parse(
            r#"(
                database: (path: "recipes.db", collection: "drafts"),
                server: (host: "0.0.0.0", port: 8080),
                refresh_interval_secs: 60,
                page_size: 25,
                log: Both,
            )"#,
        )
        .unwrap();
        assert_eq!(config.database.collection, "drafts");
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.page_size, 25);
        assert_eq!(config.log, LogDestination::Both);
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let shipped = include_str!("../../../../dashboard.ron");
        assert_eq!(AppConfig::parse(shipped).unwrap(), AppConfig::default());
    }

    #[test]
    fn rejects_zero_interval_and_bad_collection() {
        assert!(AppConfig::parse("(refresh_interval_secs: 0)").is_err());
        assert!(AppConfig::parse("(page_size: 0)").is_err());
        assert!(AppConfig::parse(r#"(database: (collection: "a b"))"#).is_err());
    }

    #[test]
    fn missing_default_file_means_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig::from_optional_file(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(AppConfig::from_file(&dir.path().join("absent.ron")).is_err());
    }

    #[test]
    fn config_file_on_disk_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.ron");
        fs::write(&path, "(server: (port: 8123))").unwrap();
        assert_eq!(AppConfig::from_file(&path).unwrap().server.port, 8123);
    }
}
