use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rows per page when the records view opens
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Directory exported documents are written to; empty means the
    /// current working directory
    #[serde(default)]
    pub export_dir: String,
    /// Override for the records store file; empty means
    /// ~/.gestao-tui/records.json
    #[serde(default)]
    pub store_path: String,
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            export_dir: String::new(),
            store_path: String::new(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".gestao-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Resolve the export directory, defaulting to the working directory
    pub fn export_dir(&self) -> PathBuf {
        if self.export_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.export_dir)
        }
    }
}
