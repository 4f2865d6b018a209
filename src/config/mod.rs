mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/facility-rank/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("facility-rank"))
}

/// Get the default config file path (~/.config/facility-rank/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, the default path is tried
///   and built-in defaults are used when it does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)
        }
        None => match get_config_path() {
            Some(path) if path.exists() => read_config(&path),
            _ => {
                log::debug!("No config file found, using built-in scoring table");
                Ok(Config::default())
            }
        },
    }
}

fn read_config(path: &Path) -> Result<Config> {
    log::debug!("Loading config from {}", path.display());

    let config_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_missing_explicit_config_is_error() {
        let temp_path = env::temp_dir().join("facility_rank_test_missing_config.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_config(Some(temp_path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_partial_config() {
        let temp_path = env::temp_dir().join("facility_rank_test_partial_config.yaml");
        fs::write(
            &temp_path,
            "columns:\n  provider_name: \"Facility\"\nscoring:\n  divisor: 10\n",
        )
        .unwrap();

        let config = load_config(Some(temp_path.clone())).unwrap();
        assert_eq!(config.columns.provider_name, "Facility");
        assert_eq!(config.columns.penalties, "Total Number of Penalties");
        assert_eq!(config.scoring.divisor, 10.0);
        assert_eq!(config.scoring.pt_hours.above, 0.09);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let temp_path = env::temp_dir().join("facility_rank_test_bad_config.yaml");
        fs::write(&temp_path, "scoring:\n  divisor: [1, 2\n").unwrap();

        let err = load_config(Some(temp_path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unknown_section_is_error() {
        let temp_path = env::temp_dir().join("facility_rank_test_unknown_config.yaml");
        fs::write(&temp_path, "queries: []\n").unwrap();

        assert!(load_config(Some(temp_path.clone())).is_err());

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_empty_config_document() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
