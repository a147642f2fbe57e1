use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Origin of the task API, e.g. "http://localhost:8000".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Tasks requested per page (the `limit` query parameter).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Skip TLS certificate verification (self-signed servers).
    #[serde(default)]
    pub allow_insecure_certs: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            allow_insecure_certs: false,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(test_dir) = env::var("TASKPAGER_CONFIG_DIR") {
            let path = PathBuf::from(test_dir);
            if !path.exists() {
                let _ = fs::create_dir_all(&path);
            }
            return Some(path.join("config.toml"));
        }

        if let Some(proj) = ProjectDirs::from("com", "taskpager", "taskpager") {
            let config_dir = proj.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    pub fn load() -> Result<Self> {
        let path = Self::get_path().ok_or_else(|| anyhow::anyhow!("No config directory"))?;
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// A page size of 0 would request nothing forever; treat it as 1.
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.max(1)
    }
}
