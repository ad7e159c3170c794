use crate::error::ConfigError;
use crate::types::Config;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the config file path: `<config dir>/stardrift/config.json`.
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("stardrift").join("config.json")
}

/// A config as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    /// False when the file exists but could not be read or parsed; saving
    /// would then clobber whatever the user has there.
    pub writable: bool,
}

/// Load the config from the default location, returning defaults if the file
/// is missing or unreadable.
pub fn load_config() -> LoadedConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> LoadedConfig {
    if !path.exists() {
        return LoadedConfig {
            config: Config::default(),
            writable: true,
        };
    }
    match read_config(path) {
        Ok(config) => LoadedConfig {
            config,
            writable: true,
        },
        Err(e) => {
            log::warn!("Using default config, {}: {}", path.display(), e);
            LoadedConfig {
                config: Config::default(),
                writable: false,
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("nope.json"));
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.writable);
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let cfg = Config {
            fps: 30,
            pixel_scale: 2,
            seed: Some(99),
            show_overlay: false,
        };
        save_config_to(&path, &cfg).unwrap();
        let loaded = load_config_from(&path);
        assert_eq!(loaded.config, cfg);
        assert!(loaded.writable);
    }

    #[test]
    fn garbage_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let loaded = load_config_from(&path);
        assert_eq!(loaded.config, Config::default());
        assert!(!loaded.writable);
    }
}
