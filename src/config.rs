use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub service: ServiceConfig,
    pub history: HistoryConfig,
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Component id of the main tab container; recorded in history tokens.
    pub host_id: String,
    /// Tab id that receives `!/path?query` location loads.
    pub load_target: String,
    pub tabs: Vec<TabConfig>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            host_id: "main-tabs".to_string(),
            load_target: "home".to_string(),
            tabs: vec![TabConfig {
                id: "home".to_string(),
                title: "Home".to_string(),
                path: "/panel/home".to_string(),
                template_base: None,
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TabConfig {
    pub id: String,
    pub title: String,
    /// Service-relative path the tab's panel body is fetched from.
    pub path: String,
    /// Template controller base path for fragments rendered in this panel.
    /// Fragments in panels without one have no edit affordances.
    #[serde(default)]
    pub template_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceConfig {
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.max(1))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 128 }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.service.request_timeout_ms = self.service.request_timeout_ms.max(1);
        self.history.max_entries = self.history.max_entries.max(2);
        if self.workspace.host_id.is_empty() {
            self.workspace.host_id = WorkspaceConfig::default().host_id;
        }
        if self.workspace.load_target.is_empty() {
            self.workspace.load_target = self
                .workspace
                .tabs
                .first()
                .map(|tab| tab.id.clone())
                .unwrap_or_else(|| WorkspaceConfig::default().load_target);
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("TDK_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("tdk").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("tdk")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("tdk").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::Config;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("tdk_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [service]
            request_timeout_ms = 0

            [history]
            max_entries = 0

            [workspace]
            host_id = "deck"
            load_target = ""

            [[workspace.tabs]]
            id = "reports"
            title = "Reports"
            path = "/panel/reports"
            template_base = "/tpl"
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.service.request_timeout_ms, 1);
        assert_eq!(config.history.max_entries, 2);
        assert_eq!(config.workspace.host_id, "deck");
        assert_eq!(config.workspace.load_target, "reports");
        assert_eq!(config.workspace.tabs.len(), 1);
        assert_eq!(
            config.workspace.tabs[0].template_base.as_deref(),
            Some("/tpl")
        );

        fs::remove_file(&path).expect("config file should be removed");
    }
}
