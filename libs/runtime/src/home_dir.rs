use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory into an absolute path.
///
/// - `None` => platform base (`%APPDATA%` on Windows, `$HOME` elsewhere) joined with `default_subdir`.
/// - A leading `~` is expanded against the user home.
/// - Relative paths are resolved against the current working directory.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match configured {
        None => platform_base()?.join(default_subdir),
        Some(raw) => expand_tilde(raw.trim())?,
    };

    let path = if path.is_relative() {
        std::env::current_dir()
            .context("current_dir is not available")?
            .join(path)
    } else {
        path
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("failed to create home_dir {}", path.display()))?;
    }
    Ok(path)
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home directory"))
}

#[cfg(target_os = "windows")]
fn platform_base() -> Result<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("APPDATA is not set"))
}

#[cfg(not(target_os = "windows"))]
fn platform_base() -> Result<PathBuf> {
    user_home()
}
