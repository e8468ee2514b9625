mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ThemePreference, DEFAULT_AUTOSAVE_DELAY};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/footprint/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("footprint"))
}

/// Get the default config file path (~/.config/footprint/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<()> {
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory at {}", config_dir.display())
        })?;
    }
    Ok(())
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/footprint/config.yaml), and a missing default file simply
///   means "use defaults".
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let (config_path, explicit) = match path {
        Some(p) => (p, true),
        None => (get_config_path()?, false),
    };

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Validate the whole config at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref scoring) = config.scoring {
        if let Err(scoring_errors) = crate::scoring::validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }

    if let Some(ref delay) = config.autosave_delay {
        match humantime::parse_duration(delay) {
            Ok(d) if d.is_zero() => {
                errors.push("autosave_delay: must be greater than zero".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("autosave_delay: invalid '{}' - {}", delay, e)),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use std::env;

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = env::temp_dir().join("footprint_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let path = env::temp_dir().join("footprint_test_load_config.yaml");
        fs::write(&path, "theme: light\nautosave_delay: 2s\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.theme, Some(ThemePreference::Light));
        assert_eq!(config.autosave_delay.as_deref(), Some("2s"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let path = env::temp_dir().join("footprint_test_bad_config.yaml");
        fs::write(&path, "scoring: [not, a, map]\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
        assert!(validate_config(&Config::with_defaults()).is_ok());
    }

    #[test]
    fn test_validate_collects_scoring_and_delay_errors() {
        let config = Config {
            scoring: Some(ScoringConfig {
                contribution_floor: Some(3.0),
                top_contributors: None,
                zones: None,
            }),
            autosave_delay: Some("soon".to_string()),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("scoring.contribution_floor"));
        assert!(errors[1].contains("autosave_delay"));
    }

    #[test]
    fn test_validate_zero_delay() {
        let config = Config {
            autosave_delay: Some("0s".to_string()),
            ..Config::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
