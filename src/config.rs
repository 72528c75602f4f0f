use anyhow::{Context, Result};
use huelog::JsonEntryStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config file location (used by the integration tests)
const CONFIG_ENV: &str = "HUELOG_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub(crate) struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub(crate) struct StoreConfig {
    /// Entry store file; the platform data directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct AnalysisConfig {
    /// Days covered by `huelog trend` when `--days` is not given
    #[serde(default = "default_trend_window_days")]
    pub trend_window_days: u32,
    /// Swatches listed by `huelog frequency` when `--top` is not given
    #[serde(default = "default_top_colors")]
    pub top_colors: usize,
}

fn default_trend_window_days() -> u32 {
    7
}

fn default_top_colors() -> usize {
    3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_window_days: default_trend_window_days(),
            top_colors: default_top_colors(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LogConfig {
    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("com", "huelog", "huelog")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from file, creating default if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// A config that fails to parse is reported and replaced by defaults for
    /// this run; the file itself is left alone so it can be fixed by hand.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let data = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    // Logging is configured from this file, so it is not up yet.
                    eprintln!(
                        "Warning: Failed to parse config at {}: {}",
                        path.display(),
                        e
                    );
                    eprintln!("Using default configuration.");
                    Ok(Config::default())
                }
            }
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;

        Ok(())
    }

    /// Configured store path with `~` expanded, or the default data file
    pub fn store_path(&self) -> PathBuf {
        match &self.store.path {
            Some(path) => expand_tilde(path),
            None => JsonEntryStore::default_path(),
        }
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
