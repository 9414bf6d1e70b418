//! Site configuration, sharing the agent's `~/.dinopal/config.toml`.
//!
//! Missing file means defaults (fallback-only rendering); malformed file is
//! a startup error.

use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL of the remote data source; empty renders fallback only.
    pub endpoint: String,
    pub api_key: String,
    pub refresh_interval_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Home directory not found".to_string())?;
    Ok(home.join(".dinopal").join(CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<SiteConfig, String> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read config {}: {}", path.display(), err))?;
    toml::from_str::<SiteConfig>(&content)
        .map_err(|err| format!("Failed to parse config {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(&temp_dir.path().join(CONFIG_FILE)).expect("config");
        assert!(config.endpoint.is_empty());
        assert_eq!(config.refresh_interval_secs, 30);
    }

    #[test]
    fn agent_fields_in_shared_config_are_ignored() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "endpoint = \"https://example.supabase.co\"\nusername = \"Rex\"\npoll_interval_secs = 3\n",
        )
        .expect("write");

        let config = load_config(&path).expect("config");
        assert_eq!(config.endpoint, "https://example.supabase.co");
        assert_eq!(config.refresh_interval_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "refresh_interval_secs = \"soon\"").expect("write");
        assert!(load_config(&path).is_err());
    }
}
