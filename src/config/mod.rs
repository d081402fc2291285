use crate::api::Role;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Rows per page in list views
    pub per_page: usize,

    /// Page sizes the pagination control cycles through
    pub page_sizes: Vec<usize>,

    /// Top-level sections whose last visited path is remembered
    pub tracked_sections: Vec<String>,

    /// Location shown on start-up
    pub start_path: String,

    /// Role of the operator using the console
    pub role: Role,

    /// Directory with fixture overrides (users.json, centers.json, jobs.json, permissions.json)
    pub fixtures_dir: Option<PathBuf>,

    /// Prefix of page URLs in pagination descriptors
    pub api_base_path: String,

    /// Interval between UI ticks in milliseconds
    pub tick_rate_ms: u64,

    /// Enable mouse support
    pub mouse_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            per_page: 10,
            page_sizes: vec![5, 10, 20, 50],
            tracked_sections: vec!["/manage".to_string(), "/jobs".to_string()],
            start_path: "/dashboard".to_string(),
            role: Role::Admin,
            fixtures_dir: None,
            api_base_path: "/api".to_string(),
            tick_rate_ms: 250,
            mouse_enabled: true,
        }
    }
}

impl Config {
    /// Initialize configuration from the config file (if any) and the environment
    pub async fn init(explicit_path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match explicit_path {
            Some(path) => Self::load_file(path).await?,
            None => match Self::load_from_file(&Self::default_paths()).await? {
                Some(config) => config,
                None => Self::default(),
            },
        };

        config.load_from_env();
        Ok(config)
    }

    /// Candidate configuration files, in priority order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./.opsdesk.json"), PathBuf::from("./opsdesk.json")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("opsdesk").join("opsdesk.json"));
        }
        paths
    }

    /// Load the first configuration file that exists
    pub async fn load_from_file(paths: &[PathBuf]) -> Result<Option<Self>> {
        for path in paths {
            if path.exists() {
                return Self::load_file(path).await.map(Some);
            }
        }
        Ok(None)
    }

    async fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Override fields from `OPSDESK_*` environment variables
    pub fn load_from_env(&mut self) {
        if let Ok(per_page) = std::env::var("OPSDESK_PER_PAGE") {
            if let Some(per_page) = parse_env_value("OPSDESK_PER_PAGE", &per_page) {
                self.per_page = per_page;
            }
        }

        if let Ok(sizes) = std::env::var("OPSDESK_PAGE_SIZES") {
            let parsed: Vec<usize> = sizes
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if !parsed.is_empty() {
                self.page_sizes = parsed;
            }
        }

        if let Ok(sections) = std::env::var("OPSDESK_TRACKED_SECTIONS") {
            self.tracked_sections = sections
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(start_path) = std::env::var("OPSDESK_START_PATH") {
            self.start_path = start_path;
        }

        if let Ok(role) = std::env::var("OPSDESK_ROLE") {
            match role.parse() {
                Ok(role) => self.role = role,
                Err(e) => tracing::warn!("Ignoring OPSDESK_ROLE: {}", e),
            }
        }

        if let Ok(dir) = std::env::var("OPSDESK_FIXTURES_DIR") {
            self.fixtures_dir = Some(PathBuf::from(dir));
        }

        if let Ok(base) = std::env::var("OPSDESK_API_BASE_PATH") {
            self.api_base_path = base;
        }

        if let Ok(tick) = std::env::var("OPSDESK_TICK_RATE_MS") {
            if let Some(tick) = parse_env_value("OPSDESK_TICK_RATE_MS", &tick) {
                self.tick_rate_ms = tick;
            }
        }

        if let Ok(mouse) = std::env::var("OPSDESK_MOUSE") {
            self.mouse_enabled = mouse.to_lowercase() == "true";
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 {
            return Err(anyhow::anyhow!("per_page must be greater than 0"));
        }

        if self.page_sizes.is_empty() {
            return Err(anyhow::anyhow!("page_sizes must not be empty"));
        }

        if self.page_sizes.iter().any(|&size| size == 0) {
            return Err(anyhow::anyhow!("page_sizes must all be greater than 0"));
        }

        if let Some(section) = self.tracked_sections.iter().find(|s| !s.starts_with('/')) {
            return Err(anyhow::anyhow!(
                "tracked section '{}' must be an absolute path starting with '/'",
                section
            ));
        }

        if let Some(section) = self.tracked_sections.iter().find(|s| s.trim_end_matches('/').is_empty()) {
            return Err(anyhow::anyhow!(
                "tracked section '{}' must name a section below '/'",
                section
            ));
        }

        if !self.start_path.starts_with('/') {
            return Err(anyhow::anyhow!("start_path must start with '/'"));
        }

        if self.tick_rate_ms == 0 {
            return Err(anyhow::anyhow!("tick_rate_ms must be greater than 0"));
        }

        if let Some(dir) = &self.fixtures_dir {
            if !dir.is_dir() {
                return Err(anyhow::anyhow!("fixtures_dir {} is not a directory", dir.display()));
            }
        }

        Ok(())
    }
}

/// Parse a numeric environment override, warning when it is not usable
fn parse_env_value<T: std::str::FromStr>(name: &str, value: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", name, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn test_env_numbers_must_parse() {
        assert_eq!(parse_env_value::<usize>("OPSDESK_PER_PAGE", " 25 "), Some(25));
        assert_eq!(parse_env_value::<usize>("OPSDESK_PER_PAGE", "lots"), None);
        assert_eq!(parse_env_value::<u64>("OPSDESK_TICK_RATE_MS", "-5"), None);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = Config::default();
        config.per_page = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.page_sizes = vec![10, 0];
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.tracked_sections = vec!["manage".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'manage'"));

        let mut config = Config::default();
        config.tracked_sections = vec!["/jobs".into(), "/".into()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'/'"));

        let mut config = Config::default();
        config.start_path = "dashboard".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fixtures_dir = Some(PathBuf::from("/definitely/not/here"));
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("opsdesk.json");
        std::fs::write(&path, r#"{ "per_page": 25, "role": "viewer" }"#).unwrap();

        let config = Config::load_from_file(&[dir.path().join("missing.json"), path])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(config.per_page, 25);
        assert_eq!(config.role, Role::Viewer);
        assert_eq!(config.start_path, "/dashboard");
        assert_eq!(config.tracked_sections, vec!["/manage", "/jobs"]);
    }

    #[tokio::test]
    async fn test_no_file_found() {
        let dir = tempdir().unwrap();
        let found = Config::load_from_file(&[dir.path().join("nope.json")]).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("opsdesk.json");
        std::fs::write(&path, "{ per_page: ").unwrap();

        let err = Config::load_from_file(&[path]).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
