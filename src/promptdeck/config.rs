use crate::error::{DeckError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const KV_FILENAME: &str = "kv.json";
const DEFAULT_PAGE_SIZE: usize = 9;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Overrides the data directory. Mostly for tests and portable setups.
pub const HOME_ENV: &str = "PROMPTDECK_HOME";

/// Configuration for promptdeck, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    /// Cards per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether text search also looks at the prompt body
    #[serde(default = "default_search_content")]
    pub search_content: bool,

    /// Quiet time before interactive search input is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Where cards come from: a JSON file, a directory of markdown prompts
    /// or an http(s) URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_content() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_content: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            source: None,
        }
    }
}

impl DeckConfig {
    pub const KEYS: &'static [&'static str] =
        &["page-size", "search-content", "debounce-ms", "source"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DeckError::Io)?;
        let config: DeckConfig =
            serde_json::from_str(&content).map_err(DeckError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DeckError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DeckError::Serialization)?;
        fs::write(config_path, content).map_err(DeckError::Io)?;
        Ok(())
    }

    /// Display value of a key. Accepts `page-size` and `page_size` spellings.
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "page-size" => Some(self.page_size.to_string()),
            "search-content" => Some(self.search_content.to_string()),
            "debounce-ms" => Some(self.debounce_ms.to_string()),
            "source" => Some(self.source.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match normalize_key(key).as_str() {
            "page-size" => {
                let size: usize = value
                    .parse()
                    .map_err(|_| format!("page-size must be a number, got '{}'", value))?;
                if size == 0 {
                    return Err("page-size must be at least 1".to_string());
                }
                self.page_size = size;
            }
            "search-content" => {
                self.search_content = parse_bool(value)
                    .ok_or_else(|| format!("search-content must be true or false, got '{}'", value))?;
            }
            "debounce-ms" => {
                self.debounce_ms = value
                    .parse()
                    .map_err(|_| format!("debounce-ms must be a number, got '{}'", value))?;
            }
            "source" => {
                self.source = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All keys with their display values, in a fixed order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Where config and favorites live: `$PROMPTDECK_HOME`, else the platform
/// data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "promptdeck", "promptdeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DeckError::Store("Could not determine data directory".to_string()))
}

/// Favorites file inside a data directory.
pub fn kv_path(data_dir: &Path) -> PathBuf {
    data_dir.join(KV_FILENAME)
}
