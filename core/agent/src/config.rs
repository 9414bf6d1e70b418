//! Agent configuration and on-disk identity.
//!
//! Config lives at `~/.dinopal/config.toml`; a missing file means defaults,
//! a malformed file is an error the caller surfaces at startup. The user id
//! is minted once and persisted next to the config so the remote row is
//! stable across restarts.

use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use ulid::Ulid;

const CONFIG_FILE: &str = "config.toml";
const USER_ID_FILE: &str = "user-id";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
const DEFAULT_REPORT_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Base URL of the remote data source; empty disables reporting.
    pub endpoint: String,
    pub api_key: String,
    pub username: String,
    pub poll_interval_secs: u64,
    pub report_interval_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            username: "Anonymous Dino".to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            report_interval_secs: DEFAULT_REPORT_INTERVAL_SECS,
        }
    }
}

pub fn dinopal_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "Home directory not found".to_string())?;
    Ok(home.join(".dinopal"))
}

pub fn load_config(dir: &Path) -> Result<AgentConfig, String> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(AgentConfig::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read config {}: {}", path.display(), err))?;
    toml::from_str::<AgentConfig>(&content)
        .map_err(|err| format!("Failed to parse config {}: {}", path.display(), err))
}

/// Reads the persisted user id, minting and saving one on first run.
pub fn load_or_create_user_id(dir: &Path) -> Result<String, String> {
    let path = dir.join(USER_ID_FILE);
    match fs::read_to_string(&path) {
        Ok(content) => {
            let id = content.trim().to_string();
            if !id.is_empty() {
                return Ok(id);
            }
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(format!("Failed to read user id: {}", err)),
    }

    let id = Ulid::new().to_string();
    fs::create_dir_all(dir).map_err(|err| format!("Failed to create {}: {}", dir.display(), err))?;
    fs::write(&path, &id).map_err(|err| format!("Failed to persist user id: {}", err))?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let config = load_config(temp_dir.path()).expect("config");
        assert_eq!(config.poll_interval_secs, 3);
        assert_eq!(config.report_interval_secs, 30);
        assert_eq!(config.username, "Anonymous Dino");
        assert!(config.endpoint.is_empty());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "endpoint = \"https://example.supabase.co\"\nusername = \"Rex\"\n",
        )
        .expect("write config");

        let config = load_config(temp_dir.path()).expect("config");
        assert_eq!(config.endpoint, "https://example.supabase.co");
        assert_eq!(config.username, "Rex");
        assert_eq!(config.poll_interval_secs, 3);
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "endpoint = [not toml").expect("write");
        assert!(load_config(temp_dir.path()).is_err());
    }

    #[test]
    fn user_id_is_stable_across_calls() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let first = load_or_create_user_id(temp_dir.path()).expect("first id");
        let second = load_or_create_user_id(temp_dir.path()).expect("second id");
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
