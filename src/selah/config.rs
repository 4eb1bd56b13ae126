use crate::error::{Result, SelahError};
use crate::share::DEFAULT_ATTRIBUTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Reader configuration, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelahConfig {
    /// Closing line of shared verses
    #[serde(default = "default_attribution")]
    pub attribution: String,

    /// Cap on search results; `None` returns every match
    #[serde(default)]
    pub search_limit: Option<usize>,

    /// Corpus file to load instead of the bundled sample
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

impl Default for SelahConfig {
    fn default() -> Self {
        Self {
            attribution: default_attribution(),
            search_limit: None,
            corpus_path: None,
        }
    }
}

pub const CONFIG_KEYS: [&str; 3] = ["attribution", "search-limit", "corpus"];

/// Value shown for an unset optional key; also accepted by `set` to clear one.
const UNSET: &str = "none";

impl SelahConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `config.json`, creating the directory when needed.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let dir = config_dir.as_ref();
        fs::create_dir_all(dir)?;
        fs::write(dir.join(CONFIG_FILENAME), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Display value of a key, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "attribution" => self.attribution.clone(),
            "search-limit" => self
                .search_limit
                .map_or_else(|| UNSET.to_string(), |n| n.to_string()),
            "corpus" => self
                .corpus_path
                .as_ref()
                .map_or_else(|| UNSET.to_string(), |p| p.display().to_string()),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let cleared = value.eq_ignore_ascii_case(UNSET);
        match key {
            "attribution" if value.is_empty() => {
                return Err(SelahError::Api("Attribution cannot be empty".to_string()))
            }
            "attribution" => self.attribution = value.to_string(),
            "search-limit" if cleared => self.search_limit = None,
            "search-limit" => {
                let limit = value.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                    SelahError::Api(format!(
                        "search-limit must be a positive number or '{}', got '{}'",
                        UNSET, value
                    ))
                })?;
                self.search_limit = Some(limit);
            }
            "corpus" if cleared || value.is_empty() => self.corpus_path = None,
            "corpus" => self.corpus_path = Some(PathBuf::from(value)),
            other => return Err(SelahError::Api(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}
