use std::path::Path;

use crate::error::ReplayError;

use super::types::ReplayConfig;

const LOCAL_CONFIG: &str = "uireplay.toml";

/// Load replay configuration.
///
/// Priority: the explicit `path` if given, else `./uireplay.toml` when
/// present, else built-in defaults. Environment variables override the file
/// in all cases.
pub fn load_config(path: Option<&Path>) -> Result<ReplayConfig, ReplayError> {
    let mut cfg = match path {
        Some(p) => read_file(p)?,
        None => {
            let local = Path::new(LOCAL_CONFIG);
            if local.exists() {
                read_file(local)?
            } else {
                ReplayConfig::default()
            }
        }
    };

    apply_env_overrides(&mut cfg)?;
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<ReplayConfig, ReplayError> {
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| ReplayError::Config(format!("{}: {e}", path.display())))
}

fn apply_env_overrides(cfg: &mut ReplayConfig) -> Result<(), ReplayError> {
    if let Ok(v) = std::env::var("UIREPLAY_MAX_RETRIES") {
        if !v.trim().is_empty() {
            cfg.max_retries = v
                .trim()
                .parse()
                .map_err(|_| ReplayError::Config(format!("UIREPLAY_MAX_RETRIES: '{v}'")))?;
        }
    }
    if let Ok(v) = std::env::var("UIREPLAY_SPEED_MULTIPLIER") {
        if !v.trim().is_empty() {
            cfg.speed_multiplier = v
                .trim()
                .parse()
                .map_err(|_| ReplayError::Config(format!("UIREPLAY_SPEED_MULTIPLIER: '{v}'")))?;
        }
    }
    if let Ok(v) = std::env::var("UIREPLAY_STOP_ON_ERROR") {
        match v.trim() {
            "" => {}
            "1" | "true" | "yes" => cfg.stop_on_error = true,
            "0" | "false" | "no" => cfg.stop_on_error = false,
            other => {
                return Err(ReplayError::Config(format!(
                    "UIREPLAY_STOP_ON_ERROR: '{other}'"
                )))
            }
        }
    }
    Ok(())
}
