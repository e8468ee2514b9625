use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{get_config_path, Config};

/// Write a config file with every option set to its default.
///
/// Refuses to replace an existing file unless `force` is set. Returns the
/// path that was written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite.",
            config_path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&Config::with_defaults())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open {} for writing", config_path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", config_path.display()))?;

    Ok(config_path)
}
