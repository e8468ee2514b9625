use anyhow::{Context, Result};
use std::path::Path;

/// Open an exported report with the system's default viewer
///
/// # Errors
/// Returns error if no viewer can be launched
pub fn open_path(path: &Path) -> Result<()> {
    let target = path
        .canonicalize()
        .with_context(|| format!("Report not found at {}", path.display()))?;
    let target = target.to_string_lossy();
    webbrowser::open(&target)
        .with_context(|| format!("Failed to open report: {}", target))?;
    Ok(())
}
