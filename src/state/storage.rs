use super::types::{SavedState, STATE_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default state file path (~/.config/footprint/state.json)
pub fn get_state_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("state.json"))
}

/// Load saved state from a JSON file
///
/// If the file doesn't exist, returns a new empty state.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_state(path: &Path) -> Result<SavedState> {
    if !path.exists() {
        return Ok(SavedState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open state file at {}", path.display()))?;

    let state: SavedState = serde_json::from_reader(file).context("Failed to load saved state")?;

    if state.version != STATE_VERSION {
        anyhow::bail!("Unsupported state file version: {}", state.version);
    }

    Ok(state)
}

/// Save state to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if it
/// doesn't exist.
pub fn save_state(path: &Path, state: &SavedState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize saved state")?;

    file.commit().context("Failed to save state")?;

    Ok(())
}

/// Remove the saved form from the state file, keeping the theme.
/// Returns true if there was a form to remove.
pub fn clear_saved_form(path: &Path) -> Result<bool> {
    let mut state = load_state(path)?;
    let had_form = state.clear_form();
    if had_form {
        save_state(path, &state)?;
    }
    Ok(had_form)
}
