mod settings;

pub use settings::{BackendSettings, Config, UiSettings};

use crate::error::{CajaError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.caja or XDG config)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "caja") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.caja/
    let home = dirs_home().ok_or_else(|| {
        CajaError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".caja"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load the main config.toml
pub fn load_config(config_dir: &PathBuf) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(CajaError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| CajaError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[backend]
# Base URL of the PetGlow backend the terminal talks to.
base_url = "http://localhost:5000"
timeout_secs = 10
# Anti-forgery token fallback, used only when the invoice page
# does not carry a csrf-token meta tag.
# token = ""

[ui]
currency_symbol = "S/"
"#;
